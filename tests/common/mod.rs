#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use medibook::config::Config;
use medibook::core::{
    AppointmentQueryService, BookingRequest, CancellationService, DashboardService,
    FulfillmentService, PaymentService, ReconciliationService, ReservationService,
};
use medibook::storage_memory::{
    MemoryAppointmentStore, MemoryDirectory, MemoryPaymentAuthority, MemoryReconciliationLog,
};
use uuid::Uuid;

/// Wires every service against the in-memory backends, the way a
/// deployment wires them against real collaborators.
pub struct TestEnv {
    pub directory: MemoryDirectory,
    pub store: MemoryAppointmentStore,
    pub authority: MemoryPaymentAuthority,
    pub orphans: MemoryReconciliationLog,
    pub reservations: ReservationService,
    pub cancellations: CancellationService,
    pub payments: PaymentService,
    pub fulfillment: FulfillmentService,
    pub queries: AppointmentQueryService,
    pub dashboard: DashboardService,
    pub reconciliation: ReconciliationService,
}

impl TestEnv {
    pub fn new() -> Self {
        let directory = MemoryDirectory::new();
        let store = MemoryAppointmentStore::new();
        let authority = MemoryPaymentAuthority::new();
        let orphans = MemoryReconciliationLog::new();
        let config = Config::default();

        let providers = Arc::new(directory.clone());
        let patients = Arc::new(directory.clone());
        let slots = Arc::new(directory.clone());
        let store_arc = Arc::new(store.clone());
        let orphans_arc = Arc::new(orphans.clone());
        let authority_arc = Arc::new(authority.clone());

        Self {
            reservations: ReservationService::new(
                providers.clone(),
                patients.clone(),
                slots.clone(),
                store_arc.clone(),
                orphans_arc.clone(),
            ),
            cancellations: CancellationService::new(
                slots.clone(),
                store_arc.clone(),
                orphans_arc.clone(),
            ),
            payments: PaymentService::new(
                authority_arc,
                store_arc.clone(),
                config.currency.clone(),
            ),
            fulfillment: FulfillmentService::new(store_arc.clone()),
            queries: AppointmentQueryService::new(store_arc.clone()),
            dashboard: DashboardService::with_latest_limit(
                providers,
                patients,
                store_arc.clone(),
                config.dashboard_latest_count,
            ),
            reconciliation: ReconciliationService::new(slots, store_arc, orphans_arc),
            directory,
            store,
            authority,
            orphans,
        }
    }

    pub fn add_provider(&self, name: &str, fee_minor: i64) -> Uuid {
        self.directory
            .add_provider(name, Some("General Medicine"), fee_minor)
            .expect("add provider")
    }

    pub fn add_patient(&self, name: &str) -> Uuid {
        self.directory.add_patient(name).expect("add patient")
    }
}

pub fn request(patient_id: Uuid, provider_id: Uuid, date: &str, time: &str) -> BookingRequest {
    BookingRequest {
        patient_id,
        provider_id,
        slot_date: date.parse::<NaiveDate>().expect("date"),
        slot_time: time.into(),
    }
}
