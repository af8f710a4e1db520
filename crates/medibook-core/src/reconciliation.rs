//! Recovery for slot reservations left behind by partial failures.
//!
//! Booking touches two records without a transaction manager. When the
//! compensating release after a failed booking itself fails, the slot
//! stays blocked with no appointment behind it. Such slots are recorded
//! durably and released by an out-of-band sweep.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use medibook_domain::SlotKey;
use serde::{Deserialize, Serialize};

use crate::{AppointmentStore, CoreResult, ReleaseOutcome, SlotLedger};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A slot reservation with no live appointment accounting for it.
pub struct OrphanedSlot {
    pub key: SlotKey,
    pub recorded_at: DateTime<Utc>,
    pub reason: String,
}

impl OrphanedSlot {
    pub fn new(key: SlotKey, reason: impl Into<String>) -> Self {
        Self {
            key,
            recorded_at: Utc::now(),
            reason: reason.into(),
        }
    }
}

/// Durable log of inconsistencies awaiting the sweep.
pub trait ReconciliationLog: Send + Sync {
    fn record(&self, orphan: OrphanedSlot) -> CoreResult<()>;
    /// Removes and returns every pending record.
    fn drain(&self) -> CoreResult<Vec<OrphanedSlot>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Outcome of one reconciliation sweep.
pub struct SweepReport {
    /// Orphaned slots released back to availability.
    pub released: usize,
    /// Records dropped because a live appointment holds the slot.
    pub superseded: usize,
    /// Records re-queued after a failed release.
    pub retained: usize,
}

/// Releases orphaned slot reservations recorded after failed booking
/// compensation.
pub struct ReconciliationService {
    slots: Arc<dyn SlotLedger>,
    store: Arc<dyn AppointmentStore>,
    log: Arc<dyn ReconciliationLog>,
}

impl ReconciliationService {
    pub fn new(
        slots: Arc<dyn SlotLedger>,
        store: Arc<dyn AppointmentStore>,
        log: Arc<dyn ReconciliationLog>,
    ) -> Self {
        Self { slots, store, log }
    }

    /// Processes every pending orphan record once.
    ///
    /// A record is stale when some live appointment now legitimately
    /// occupies the slot (the slot was re-booked after release, or the
    /// record raced an ordinary retry); stale records are dropped
    /// without touching the ledger.
    pub fn sweep(&self) -> CoreResult<SweepReport> {
        let mut report = SweepReport::default();
        for orphan in self.log.drain()? {
            if self.slot_has_live_appointment(&orphan.key)? {
                report.superseded += 1;
                continue;
            }
            match self.slots.release(&orphan.key) {
                Ok(ReleaseOutcome::Released) => {
                    tracing::info!(slot = %orphan.key, reason = %orphan.reason, "released orphaned slot");
                    report.released += 1;
                }
                Ok(ReleaseOutcome::NotHeld) => {
                    // Already freed elsewhere; the record is settled.
                    report.released += 1;
                }
                Err(err) => {
                    tracing::warn!(slot = %orphan.key, error = %err, "orphan release failed, re-queueing");
                    self.log.record(orphan)?;
                    report.retained += 1;
                }
            }
        }
        Ok(report)
    }

    fn slot_has_live_appointment(&self, key: &SlotKey) -> CoreResult<bool> {
        let appointments = self.store.find_by_provider(key.provider_id)?;
        Ok(appointments.iter().any(|appt| {
            appt.is_live() && appt.slot_date == key.date && appt.slot_time == key.time
        }))
    }
}
