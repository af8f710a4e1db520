//! Read-side appointment listings.

use std::sync::Arc;

use medibook_domain::Appointment;
use uuid::Uuid;

use crate::{AppointmentStore, CoreResult};

/// Lists appointments for patients, providers, and administrators,
/// newest first.
pub struct AppointmentQueryService {
    store: Arc<dyn AppointmentStore>,
}

impl AppointmentQueryService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub fn for_patient(&self, patient_id: Uuid) -> CoreResult<Vec<Appointment>> {
        let mut appointments = self.store.find_by_patient(patient_id)?;
        sort_newest_first(&mut appointments);
        Ok(appointments)
    }

    pub fn for_provider(&self, provider_id: Uuid) -> CoreResult<Vec<Appointment>> {
        let mut appointments = self.store.find_by_provider(provider_id)?;
        sort_newest_first(&mut appointments);
        Ok(appointments)
    }

    /// Every appointment on record, including terminal ones; history
    /// is retained for audit.
    pub fn all(&self) -> CoreResult<Vec<Appointment>> {
        let mut appointments = self.store.list_all()?;
        sort_newest_first(&mut appointments);
        Ok(appointments)
    }
}

/// Orders by creation time descending. Storage promises no physical
/// ordering, so the sort is always explicit; ties break on id to stay
/// deterministic.
pub(crate) fn sort_newest_first(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};

    fn appointment_created_at(offset_minutes: i64) -> Appointment {
        let mut appt = Appointment::book(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            "10:30 am".into(),
            30_000,
        );
        appt.created_at = Utc::now() + Duration::minutes(offset_minutes);
        appt
    }

    #[test]
    fn sort_puts_latest_creation_first() {
        let oldest = appointment_created_at(-10);
        let middle = appointment_created_at(-5);
        let newest = appointment_created_at(0);
        let mut list = vec![oldest.clone(), newest.clone(), middle.clone()];

        sort_newest_first(&mut list);

        assert_eq!(list[0].id, newest.id);
        assert_eq!(list[1].id, middle.id);
        assert_eq!(list[2].id, oldest.id);
    }

    #[test]
    fn sort_breaks_creation_ties_deterministically() {
        let a = appointment_created_at(0);
        let mut b = appointment_created_at(0);
        b.created_at = a.created_at;
        let mut first = vec![a.clone(), b.clone()];
        let mut second = vec![b, a];

        sort_newest_first(&mut first);
        sort_newest_first(&mut second);

        let first_ids: Vec<_> = first.iter().map(|x| x.id).collect();
        let second_ids: Vec<_> = second.iter().map(|x| x.id).collect();
        assert_eq!(first_ids, second_ids);
    }
}
