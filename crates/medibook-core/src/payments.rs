//! The external payment authority interface.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Order states reported by the payment authority.
pub enum PaymentOrderStatus {
    Created,
    Attempted,
    Paid,
    Failed,
}

impl fmt::Display for PaymentOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentOrderStatus::Created => "created",
            PaymentOrderStatus::Attempted => "attempted",
            PaymentOrderStatus::Paid => "paid",
            PaymentOrderStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// An order held by the payment authority.
pub struct PaymentOrder {
    /// Authority-issued handle, used to fetch the order back.
    pub reference: String,
    /// Amount in minor currency units, matching the authority's
    /// expected denomination.
    pub amount_minor: i64,
    pub currency: String,
    /// Links the order back to the appointment it pays for.
    pub reconciliation_key: Uuid,
    pub status: PaymentOrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Abstraction over the payment authority.
///
/// Calls may block on the network; implementations must not require
/// callers to hold any lock across them.
pub trait PaymentAuthority: Send + Sync {
    fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        reconciliation_key: Uuid,
    ) -> Result<PaymentOrder, CoreError>;

    /// Fetches the authority's current record for `reference`. An
    /// unknown reference is an upstream failure.
    fn fetch_order(&self, reference: &str) -> Result<PaymentOrder, CoreError>;
}
