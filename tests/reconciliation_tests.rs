mod common;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use common::request;
use medibook::core::{
    AppointmentStore, CancellationService, CoreError, CoreResult, ReconciliationLog,
    ReconciliationService, ReleaseOutcome, ReservationService, ReserveOutcome, SlotLedger,
};
use medibook::domain::SlotKey;
use medibook::storage_memory::{
    MemoryAppointmentStore, MemoryDirectory, MemoryReconciliationLog,
};
use uuid::Uuid;

/// Slot ledger wrapper whose release can be made to fail, standing in
/// for a storage outage between the two halves of a booking or
/// cancellation.
#[derive(Clone)]
struct FlakyLedger {
    inner: MemoryDirectory,
    fail_release: Arc<AtomicBool>,
}

impl FlakyLedger {
    fn new(inner: MemoryDirectory) -> Self {
        Self {
            inner,
            fail_release: Arc::new(AtomicBool::new(false)),
        }
    }

    fn arm(&self) {
        self.fail_release.store(true, Ordering::SeqCst);
    }

    fn disarm(&self) {
        self.fail_release.store(false, Ordering::SeqCst);
    }
}

impl SlotLedger for FlakyLedger {
    fn is_held(&self, key: &SlotKey) -> CoreResult<bool> {
        self.inner.is_held(key)
    }

    fn reserve(&self, key: &SlotKey) -> CoreResult<ReserveOutcome> {
        self.inner.reserve(key)
    }

    fn release(&self, key: &SlotKey) -> CoreResult<ReleaseOutcome> {
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(CoreError::Upstream("slot storage unreachable".into()));
        }
        self.inner.release(key)
    }
}

struct Harness {
    directory: MemoryDirectory,
    ledger: FlakyLedger,
    store: MemoryAppointmentStore,
    orphans: MemoryReconciliationLog,
    reservations: ReservationService,
    cancellations: CancellationService,
    reconciliation: ReconciliationService,
}

fn harness() -> Harness {
    let directory = MemoryDirectory::new();
    let ledger = FlakyLedger::new(directory.clone());
    let store = MemoryAppointmentStore::new();
    let orphans = MemoryReconciliationLog::new();

    let slots: Arc<dyn SlotLedger> = Arc::new(ledger.clone());
    let store_arc = Arc::new(store.clone());
    let orphans_arc = Arc::new(orphans.clone());

    Harness {
        reservations: ReservationService::new(
            Arc::new(directory.clone()),
            Arc::new(directory.clone()),
            slots.clone(),
            store_arc.clone(),
            orphans_arc.clone(),
        ),
        cancellations: CancellationService::new(
            slots.clone(),
            store_arc.clone(),
            orphans_arc.clone(),
        ),
        reconciliation: ReconciliationService::new(slots, store_arc, orphans_arc),
        directory,
        ledger,
        store,
        orphans,
    }
}

#[test]
fn failed_compensation_records_an_orphan_and_sweep_frees_the_slot() {
    let h = harness();
    let provider = h
        .directory
        .add_provider("Dr. Rao", None, 300)
        .expect("provider");
    let patient = h.directory.add_patient("Asha").expect("patient");
    let ghost = Uuid::new_v4();

    h.ledger.arm();
    let err = h
        .reservations
        .book_slot(&request(ghost, provider, "2025-12-01", "10:30 am"))
        .expect_err("unknown patient");
    assert!(matches!(err, CoreError::PatientNotFound(_)));
    assert_eq!(h.orphans.pending().expect("pending"), 1, "orphan recorded");

    // Slot is still blocked until the sweep runs.
    let err = h
        .reservations
        .book_slot(&request(patient, provider, "2025-12-01", "10:30 am"))
        .expect_err("slot blocked by orphaned reservation");
    assert!(matches!(err, CoreError::SlotUnavailable(_)));

    h.ledger.disarm();
    let report = h.reconciliation.sweep().expect("sweep");
    assert_eq!(report.released, 1);
    assert_eq!(report.retained, 0);

    h.reservations
        .book_slot(&request(patient, provider, "2025-12-01", "10:30 am"))
        .expect("slot free after sweep");
}

#[test]
fn sweep_drops_records_superseded_by_a_live_appointment() {
    let h = harness();
    let provider = h
        .directory
        .add_provider("Dr. Rao", None, 300)
        .expect("provider");
    let patient = h.directory.add_patient("Asha").expect("patient");

    let appointment = h
        .reservations
        .book_slot(&request(patient, provider, "2025-12-01", "10:30 am"))
        .expect("booking");

    // A stale record pointing at a legitimately held slot.
    h.orphans
        .record(medibook::core::OrphanedSlot::new(
            appointment.slot_key(),
            "stale record",
        ))
        .expect("record");

    let report = h.reconciliation.sweep().expect("sweep");
    assert_eq!(report.superseded, 1);
    assert_eq!(report.released, 0);
    assert!(
        h.ledger.is_held(&appointment.slot_key()).expect("is_held"),
        "live appointment keeps its slot"
    );
}

#[test]
fn cancellation_release_failure_is_recoverable() {
    let h = harness();
    let provider = h
        .directory
        .add_provider("Dr. Rao", None, 300)
        .expect("provider");
    let patient = h.directory.add_patient("Asha").expect("patient");
    let rebooker = h.directory.add_patient("Vikram").expect("patient");

    let appointment = h
        .reservations
        .book_slot(&request(patient, provider, "2025-12-01", "10:30 am"))
        .expect("booking");

    h.ledger.arm();
    let err = h
        .cancellations
        .cancel(appointment.id, patient)
        .expect_err("release failure surfaces");
    assert!(matches!(err, CoreError::Upstream(_)));

    let stored = h
        .store
        .find_by_id(appointment.id)
        .expect("lookup")
        .expect("exists");
    assert!(stored.cancelled, "cancellation itself was committed");
    assert_eq!(h.orphans.pending().expect("pending"), 1);

    h.ledger.disarm();
    let report = h.reconciliation.sweep().expect("sweep");
    assert_eq!(report.released, 1);

    h.reservations
        .book_slot(&request(rebooker, provider, "2025-12-01", "10:30 am"))
        .expect("slot free after sweep");
}

#[test]
fn sweep_requeues_records_while_storage_stays_down() {
    let h = harness();
    let provider = h
        .directory
        .add_provider("Dr. Rao", None, 300)
        .expect("provider");
    h.directory.add_patient("Asha").expect("patient");

    h.ledger.arm();
    let _ = h
        .reservations
        .book_slot(&request(Uuid::new_v4(), provider, "2025-12-01", "10:30 am"))
        .expect_err("unknown patient");
    assert_eq!(h.orphans.pending().expect("pending"), 1);

    // Storage still down: the sweep must keep the record.
    let report = h.reconciliation.sweep().expect("sweep");
    assert_eq!(report.retained, 1);
    assert_eq!(h.orphans.pending().expect("pending"), 1);

    h.ledger.disarm();
    let report = h.reconciliation.sweep().expect("second sweep");
    assert_eq!(report.released, 1);
    assert_eq!(h.orphans.pending().expect("pending"), 0);
}
