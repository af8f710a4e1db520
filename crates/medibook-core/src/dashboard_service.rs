//! Administrative dashboard projection.

use std::sync::Arc;

use medibook_domain::Appointment;
use serde::{Deserialize, Serialize};

use crate::{
    query_service::sort_newest_first, AppointmentStore, CoreResult, PatientDirectory,
    ProviderDirectory,
};

pub const DEFAULT_LATEST_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub provider_count: usize,
    pub patient_count: usize,
    pub appointment_count: usize,
    /// Most recently created appointments, newest first.
    pub latest: Vec<Appointment>,
}

/// Computes read-only summary statistics for administrative consumption.
pub struct DashboardService {
    providers: Arc<dyn ProviderDirectory>,
    patients: Arc<dyn PatientDirectory>,
    store: Arc<dyn AppointmentStore>,
    latest_limit: usize,
}

impl DashboardService {
    pub fn new(
        providers: Arc<dyn ProviderDirectory>,
        patients: Arc<dyn PatientDirectory>,
        store: Arc<dyn AppointmentStore>,
    ) -> Self {
        Self::with_latest_limit(providers, patients, store, DEFAULT_LATEST_LIMIT)
    }

    pub fn with_latest_limit(
        providers: Arc<dyn ProviderDirectory>,
        patients: Arc<dyn PatientDirectory>,
        store: Arc<dyn AppointmentStore>,
        latest_limit: usize,
    ) -> Self {
        Self {
            providers,
            patients,
            store,
            latest_limit: latest_limit.max(1),
        }
    }

    /// Counts plus the latest appointments, explicitly sorted by
    /// creation time descending; storage ordering is never assumed.
    pub fn summary(&self) -> CoreResult<DashboardSummary> {
        let mut appointments = self.store.list_all()?;
        sort_newest_first(&mut appointments);
        let appointment_count = appointments.len();
        appointments.truncate(self.latest_limit);

        Ok(DashboardSummary {
            provider_count: self.providers.provider_count()?,
            patient_count: self.patients.patient_count()?,
            appointment_count,
            latest: appointments,
        })
    }
}
