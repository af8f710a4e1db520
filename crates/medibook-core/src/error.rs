use medibook_domain::{SlotTimeError, TransitionError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Provider not found: {0}")]
    ProviderNotFound(Uuid),
    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),
    /// The requested slot is already held. An expected workflow
    /// outcome, not a system fault; callers offer another time.
    #[error("Slot not available: {0}")]
    SlotUnavailable(String),
    /// Payment operations against a cancelled appointment.
    #[error("Appointment cancelled: {0}")]
    AppointmentCancelled(Uuid),
    #[error("Upstream failure: {0}")]
    Upstream(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Whether the failure is a normal workflow outcome callers should
    /// render as such rather than as a system error.
    pub fn is_workflow_outcome(&self) -> bool {
        matches!(
            self,
            CoreError::SlotUnavailable(_) | CoreError::AppointmentCancelled(_)
        )
    }
}

impl From<SlotTimeError> for CoreError {
    fn from(err: SlotTimeError) -> Self {
        CoreError::InvalidRequest(err.to_string())
    }
}

impl From<TransitionError> for CoreError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Cancelled => {
                CoreError::InvalidRequest("appointment is cancelled".into())
            }
        }
    }
}
