//! In-memory appointment persistence.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use medibook_core::{AppointmentStore, CoreError};
use medibook_domain::Appointment;
use uuid::Uuid;

/// Keyed by appointment id. No physical ordering is promised; readers
/// sort by `created_at` themselves.
#[derive(Clone, Default)]
pub struct MemoryAppointmentStore {
    inner: Arc<Mutex<HashMap<Uuid, Appointment>>>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Appointment>>, CoreError> {
        self.inner
            .lock()
            .map_err(|_| CoreError::Storage("appointment store lock poisoned".into()))
    }
}

impl AppointmentStore for MemoryAppointmentStore {
    fn create(&self, appointment: &Appointment) -> Result<(), CoreError> {
        let mut records = self.lock()?;
        if records.contains_key(&appointment.id) {
            return Err(CoreError::Storage(format!(
                "duplicate appointment id {}",
                appointment.id
            )));
        }
        records.insert(appointment.id, appointment.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, CoreError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn find_by_provider(&self, provider_id: Uuid) -> Result<Vec<Appointment>, CoreError> {
        Ok(self
            .lock()?
            .values()
            .filter(|appt| appt.provider_id == provider_id)
            .cloned()
            .collect())
    }

    fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, CoreError> {
        Ok(self
            .lock()?
            .values()
            .filter(|appt| appt.patient_id == patient_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Appointment>, CoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn update(&self, appointment: &Appointment) -> Result<(), CoreError> {
        let mut records = self.lock()?;
        if !records.contains_key(&appointment.id) {
            return Err(CoreError::AppointmentNotFound(appointment.id));
        }
        records.insert(appointment.id, appointment.clone());
        Ok(())
    }
}
