//! medibook-core
//!
//! Reservation, lifecycle, and payment-reconciliation logic for the
//! booking core. Depends on medibook-domain. No transport, no terminal
//! I/O, no concrete storage; collaborators enter through traits.

pub mod cancellation_service;
pub mod dashboard_service;
pub mod directory;
pub mod error;
pub mod fulfillment_service;
pub mod ledger;
pub mod payment_service;
pub mod payments;
pub mod query_service;
pub mod reconciliation;
pub mod reservation_service;
pub mod store;

pub use cancellation_service::*;
pub use dashboard_service::*;
pub use directory::*;
pub use error::{CoreError, CoreResult};
pub use fulfillment_service::*;
pub use ledger::*;
pub use payment_service::*;
pub use payments::*;
pub use query_service::*;
pub use reconciliation::*;
pub use reservation_service::*;
pub use store::*;
