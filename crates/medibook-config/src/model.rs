use serde::{Deserialize, Serialize};

/// Service preferences persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// ISO currency code passed to the payment authority.
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// How many of the most recent appointments the dashboard returns.
    #[serde(default = "Config::default_dashboard_latest_count")]
    pub dashboard_latest_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            dashboard_latest_count: Self::default_dashboard_latest_count(),
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "INR".into()
    }

    pub fn default_dashboard_latest_count() -> usize {
        5
    }
}
