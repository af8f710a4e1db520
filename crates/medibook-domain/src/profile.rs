//! Display snapshots embedded in appointments at booking time.
//!
//! Snapshots are point-in-time copies for rendering. They are never
//! re-validated against current directory records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speciality: Option<String>,
    pub fee_minor: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientSnapshot {
    pub name: String,
}
