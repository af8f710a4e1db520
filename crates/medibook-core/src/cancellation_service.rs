//! Terminal cancellation and slot release.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    AppointmentStore, CoreError, CoreResult, OrphanedSlot, ReconciliationLog, ReleaseOutcome,
    SlotLedger,
};

/// Cancels appointments and frees their slots. Both the patient-facing
/// and the administrative cancel paths go through here.
pub struct CancellationService {
    slots: Arc<dyn SlotLedger>,
    store: Arc<dyn AppointmentStore>,
    orphans: Arc<dyn ReconciliationLog>,
}

impl CancellationService {
    pub fn new(
        slots: Arc<dyn SlotLedger>,
        store: Arc<dyn AppointmentStore>,
        orphans: Arc<dyn ReconciliationLog>,
    ) -> Self {
        Self {
            slots,
            store,
            orphans,
        }
    }

    /// Marks the appointment cancelled and releases its slot.
    ///
    /// Idempotent: cancelling an already-cancelled appointment
    /// succeeds without side effects. A slot found already free is
    /// tolerated; a release failure after the cancel is persisted is
    /// recorded for the reconciliation sweep and surfaced.
    pub fn cancel(&self, appointment_id: Uuid, actor_id: Uuid) -> CoreResult<()> {
        let mut appointment = self
            .store
            .find_by_id(appointment_id)?
            .ok_or(CoreError::AppointmentNotFound(appointment_id))?;

        if appointment.cancelled {
            tracing::info!(appointment = %appointment_id, actor = %actor_id, "already cancelled");
            return Ok(());
        }

        appointment.mark_cancelled();
        self.store.update(&appointment)?;

        let key = appointment.slot_key();
        match self.slots.release(&key) {
            Ok(ReleaseOutcome::Released) | Ok(ReleaseOutcome::NotHeld) => {}
            Err(err) => {
                self.orphans.record(OrphanedSlot::new(
                    key.clone(),
                    "slot release failed after cancellation",
                ))?;
                tracing::error!(appointment = %appointment_id, slot = %key, error = %err,
                    "cancelled but slot release failed, orphan recorded");
                return Err(err);
            }
        }

        tracing::info!(appointment = %appointment_id, actor = %actor_id, slot = %key, "appointment cancelled");
        Ok(())
    }
}
