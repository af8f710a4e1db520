//! Recording the external fulfillment signal.

use std::sync::Arc;

use uuid::Uuid;

use crate::{AppointmentStore, CoreError, CoreResult};

/// Marks appointments completed on an explicit fulfillment event.
/// Completion is never inferred from the appointment time having
/// passed.
pub struct FulfillmentService {
    store: Arc<dyn AppointmentStore>,
}

impl FulfillmentService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Sets `completed`. Idempotent; a cancelled appointment rejects
    /// the signal.
    pub fn complete(&self, appointment_id: Uuid) -> CoreResult<()> {
        let mut appointment = self
            .store
            .find_by_id(appointment_id)?
            .ok_or(CoreError::AppointmentNotFound(appointment_id))?;

        if appointment.cancelled {
            return Err(CoreError::AppointmentCancelled(appointment_id));
        }
        if appointment.completed {
            return Ok(());
        }

        appointment.mark_completed()?;
        self.store.update(&appointment)?;
        tracing::info!(appointment = %appointment_id, "appointment completed");
        Ok(())
    }
}
