//! Atomic slot reservation and appointment creation.

use std::sync::Arc;

use chrono::NaiveDate;
use medibook_domain::{Appointment, SlotKey};
use uuid::Uuid;

use crate::{
    AppointmentStore, CoreError, CoreResult, OrphanedSlot, PatientDirectory, ProviderDirectory,
    ReconciliationLog, ReserveOutcome, SlotLedger,
};

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub slot_date: NaiveDate,
    pub slot_time: String,
}

/// Books slots: checks availability and creates the appointment, or
/// fails with no observable partial state.
pub struct ReservationService {
    providers: Arc<dyn ProviderDirectory>,
    patients: Arc<dyn PatientDirectory>,
    slots: Arc<dyn SlotLedger>,
    store: Arc<dyn AppointmentStore>,
    orphans: Arc<dyn ReconciliationLog>,
}

impl ReservationService {
    pub fn new(
        providers: Arc<dyn ProviderDirectory>,
        patients: Arc<dyn PatientDirectory>,
        slots: Arc<dyn SlotLedger>,
        store: Arc<dyn AppointmentStore>,
        orphans: Arc<dyn ReconciliationLog>,
    ) -> Self {
        Self {
            providers,
            patients,
            slots,
            store,
            orphans,
        }
    }

    /// Reserves the requested slot and persists a Booked appointment.
    ///
    /// The reserve step is the serialization point: of N concurrent
    /// calls for the same (provider, date, time), exactly one proceeds
    /// past it. Failures after the reserve compensate by releasing the
    /// slot; a failed compensation is recorded for the reconciliation
    /// sweep rather than leaking a blocked slot.
    pub fn book_slot(&self, request: &BookingRequest) -> CoreResult<Appointment> {
        let key = validate(request)?;

        let provider = self
            .providers
            .get_provider(request.provider_id)?
            .ok_or(CoreError::ProviderNotFound(request.provider_id))?;

        match self.slots.reserve(&key)? {
            ReserveOutcome::Reserved => {}
            ReserveOutcome::AlreadyHeld => {
                return Err(CoreError::SlotUnavailable(key.to_string()));
            }
        }

        let patient = match self.patients.get_patient(request.patient_id) {
            Ok(Some(patient)) => patient,
            Ok(None) => {
                self.release_or_record(&key, "patient lookup failed after reserve");
                return Err(CoreError::PatientNotFound(request.patient_id));
            }
            Err(err) => {
                self.release_or_record(&key, "patient directory unreachable after reserve");
                return Err(err);
            }
        };

        let appointment = Appointment::book(
            patient.id,
            provider.id,
            key.date,
            key.time.clone(),
            provider.fee_minor,
        )
        .with_snapshots(provider.snapshot(), patient.snapshot());

        if let Err(err) = self.store.create(&appointment) {
            self.release_or_record(&key, "appointment create failed after reserve");
            return Err(err);
        }

        tracing::info!(
            appointment = %appointment.id,
            slot = %key,
            amount_minor = appointment.amount_minor,
            "slot booked"
        );
        Ok(appointment)
    }

    /// Compensating release. On failure the orphaned reservation is
    /// recorded durably; losing it silently would block the slot with
    /// no appointment behind it.
    fn release_or_record(&self, key: &SlotKey, reason: &str) {
        if let Err(err) = self.slots.release(key) {
            tracing::error!(slot = %key, error = %err, "compensating release failed");
            if let Err(log_err) = self.orphans.record(OrphanedSlot::new(key.clone(), reason)) {
                tracing::error!(slot = %key, error = %log_err, "failed to record orphaned slot");
            }
        } else {
            tracing::warn!(slot = %key, reason, "booking compensated, slot released");
        }
    }
}

fn validate(request: &BookingRequest) -> CoreResult<SlotKey> {
    if request.patient_id.is_nil() {
        return Err(CoreError::InvalidRequest("patient id is required".into()));
    }
    if request.provider_id.is_nil() {
        return Err(CoreError::InvalidRequest("provider id is required".into()));
    }
    let key = SlotKey::new(request.provider_id, request.slot_date, &request.slot_time)?;
    Ok(key)
}
