//! Durable appointment persistence.

use medibook_domain::Appointment;
use uuid::Uuid;

use crate::CoreError;

/// Abstraction over appointment persistence backends.
///
/// Records are only ever mutated by operations addressing their own
/// identifier, so no cross-appointment locking is required of
/// implementations. Returned lists carry `created_at` so callers can
/// order explicitly; no physical ordering is assumed.
pub trait AppointmentStore: Send + Sync {
    fn create(&self, appointment: &Appointment) -> Result<(), CoreError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, CoreError>;
    fn find_by_provider(&self, provider_id: Uuid) -> Result<Vec<Appointment>, CoreError>;
    fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, CoreError>;
    fn list_all(&self) -> Result<Vec<Appointment>, CoreError>;
    /// Persists the full record, replacing the stored copy. Fails with
    /// `AppointmentNotFound` when the id was never created.
    fn update(&self, appointment: &Appointment) -> Result<(), CoreError>;
}
