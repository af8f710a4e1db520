//! Provider/patient directory with the slot map held per provider.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use medibook_core::{
    CoreError, PatientDirectory, PatientRecord, ProviderDirectory, ProviderRecord, ReleaseOutcome,
    ReserveOutcome, SlotLedger,
};
use medibook_domain::{SlotKey, SlotMap};
use uuid::Uuid;

struct ProviderState {
    record: ProviderRecord,
    slots: SlotMap,
}

#[derive(Default)]
struct DirectoryState {
    providers: HashMap<Uuid, ProviderState>,
    patients: HashMap<Uuid, PatientRecord>,
}

/// In-memory provider and patient directory.
///
/// Also implements [`SlotLedger`]: the slot map lives with its provider
/// record, and reserve's check-and-insert runs under one lock
/// acquisition, which makes it indivisible with respect to concurrent
/// reservations.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    inner: Arc<Mutex<DirectoryState>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider and returns its id.
    pub fn add_provider(
        &self,
        name: &str,
        speciality: Option<&str>,
        fee_minor: i64,
    ) -> Result<Uuid, CoreError> {
        let record = ProviderRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            speciality: speciality.map(str::to_string),
            fee_minor,
        };
        let id = record.id;
        let mut state = self.lock()?;
        state.providers.insert(
            id,
            ProviderState {
                record,
                slots: SlotMap::new(),
            },
        );
        Ok(id)
    }

    pub fn add_patient(&self, name: &str) -> Result<Uuid, CoreError> {
        let record = PatientRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        let id = record.id;
        self.lock()?.patients.insert(id, record);
        Ok(id)
    }

    /// Updates a provider's current fee. Existing appointments keep
    /// the amount they were booked with.
    pub fn set_provider_fee(&self, id: Uuid, fee_minor: i64) -> Result<(), CoreError> {
        let mut state = self.lock()?;
        let provider = state
            .providers
            .get_mut(&id)
            .ok_or(CoreError::ProviderNotFound(id))?;
        provider.record.fee_minor = fee_minor;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, DirectoryState>, CoreError> {
        self.inner
            .lock()
            .map_err(|_| CoreError::Storage("directory lock poisoned".into()))
    }
}

impl ProviderDirectory for MemoryDirectory {
    fn get_provider(&self, id: Uuid) -> Result<Option<ProviderRecord>, CoreError> {
        Ok(self.lock()?.providers.get(&id).map(|p| p.record.clone()))
    }

    fn slot_map(&self, id: Uuid) -> Result<Option<SlotMap>, CoreError> {
        Ok(self.lock()?.providers.get(&id).map(|p| p.slots.clone()))
    }

    fn provider_count(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.providers.len())
    }
}

impl PatientDirectory for MemoryDirectory {
    fn get_patient(&self, id: Uuid) -> Result<Option<PatientRecord>, CoreError> {
        Ok(self.lock()?.patients.get(&id).cloned())
    }

    fn patient_count(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.patients.len())
    }
}

impl SlotLedger for MemoryDirectory {
    fn is_held(&self, key: &SlotKey) -> Result<bool, CoreError> {
        let state = self.lock()?;
        let provider = state
            .providers
            .get(&key.provider_id)
            .ok_or(CoreError::ProviderNotFound(key.provider_id))?;
        Ok(provider
            .slots
            .get(&key.date)
            .is_some_and(|times| times.contains(&key.time)))
    }

    fn reserve(&self, key: &SlotKey) -> Result<ReserveOutcome, CoreError> {
        let mut state = self.lock()?;
        let provider = state
            .providers
            .get_mut(&key.provider_id)
            .ok_or(CoreError::ProviderNotFound(key.provider_id))?;
        let times = provider.slots.entry(key.date).or_default();
        if times.insert(key.time.clone()) {
            Ok(ReserveOutcome::Reserved)
        } else {
            Ok(ReserveOutcome::AlreadyHeld)
        }
    }

    fn release(&self, key: &SlotKey) -> Result<ReleaseOutcome, CoreError> {
        let mut state = self.lock()?;
        let provider = state
            .providers
            .get_mut(&key.provider_id)
            .ok_or(CoreError::ProviderNotFound(key.provider_id))?;
        let Some(times) = provider.slots.get_mut(&key.date) else {
            return Ok(ReleaseOutcome::NotHeld);
        };
        if !times.remove(&key.time) {
            return Ok(ReleaseOutcome::NotHeld);
        }
        if times.is_empty() {
            provider.slots.remove(&key.date);
        }
        Ok(ReleaseOutcome::Released)
    }
}
