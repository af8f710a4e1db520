//! Provider and patient directories (external collaborators).

use medibook_domain::{PatientSnapshot, ProviderSnapshot, SlotMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speciality: Option<String>,
    /// Current consultation fee in minor currency units. Snapshotted
    /// into each appointment at booking time.
    pub fee_minor: i64,
}

impl ProviderRecord {
    pub fn snapshot(&self) -> ProviderSnapshot {
        ProviderSnapshot {
            name: self.name.clone(),
            speciality: self.speciality.clone(),
            fee_minor: self.fee_minor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: String,
}

impl PatientRecord {
    pub fn snapshot(&self) -> PatientSnapshot {
        PatientSnapshot {
            name: self.name.clone(),
        }
    }
}

/// Read access to provider records. Slot-map mutation goes through
/// [`crate::SlotLedger`] only; the read here serves display and
/// reporting.
pub trait ProviderDirectory: Send + Sync {
    fn get_provider(&self, id: Uuid) -> Result<Option<ProviderRecord>, CoreError>;
    fn slot_map(&self, id: Uuid) -> Result<Option<SlotMap>, CoreError>;
    fn provider_count(&self) -> Result<usize, CoreError>;
}

/// Read-only patient lookup.
pub trait PatientDirectory: Send + Sync {
    fn get_patient(&self, id: Uuid) -> Result<Option<PatientRecord>, CoreError>;
    fn patient_count(&self) -> Result<usize, CoreError>;
}
