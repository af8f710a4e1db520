//! The appointment record and its lifecycle rules.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{Displayable, Identifiable},
    profile::{PatientSnapshot, ProviderSnapshot},
    slot::SlotKey,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub slot_date: NaiveDate,
    pub slot_time: String,
    /// Provider fee at booking time, in minor currency units.
    /// Fixed at creation, never recalculated.
    pub amount_minor: i64,
    pub cancelled: bool,
    pub paid: bool,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_snapshot: Option<ProviderSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_snapshot: Option<PatientSnapshot>,
}

impl Appointment {
    /// Creates a freshly booked appointment: not cancelled, not paid,
    /// not completed.
    pub fn book(
        patient_id: Uuid,
        provider_id: Uuid,
        slot_date: NaiveDate,
        slot_time: String,
        amount_minor: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            patient_id,
            provider_id,
            slot_date,
            slot_time,
            amount_minor,
            cancelled: false,
            paid: false,
            completed: false,
            created_at: now,
            updated_at: now,
            provider_snapshot: None,
            patient_snapshot: None,
        }
    }

    pub fn with_snapshots(
        mut self,
        provider: ProviderSnapshot,
        patient: PatientSnapshot,
    ) -> Self {
        self.provider_snapshot = Some(provider);
        self.patient_snapshot = Some(patient);
        self
    }

    /// The slot this appointment occupies while live.
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            provider_id: self.provider_id,
            date: self.slot_date,
            time: self.slot_time.clone(),
        }
    }

    /// A live appointment holds its slot; a cancelled one does not.
    pub fn is_live(&self) -> bool {
        !self.cancelled
    }

    /// Marks the appointment cancelled. Terminal and idempotent:
    /// cancelling an already-cancelled appointment changes nothing.
    pub fn mark_cancelled(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.touch();
        }
    }

    /// Records a confirmed payment. `paid` only ever moves false to
    /// true; a cancelled appointment rejects the transition.
    pub fn mark_paid(&mut self) -> Result<(), TransitionError> {
        if self.cancelled {
            return Err(TransitionError::Cancelled);
        }
        if !self.paid {
            self.paid = true;
            self.touch();
        }
        Ok(())
    }

    /// Records an external fulfillment signal. Rejected once cancelled.
    pub fn mark_completed(&mut self) -> Result<(), TransitionError> {
        if self.cancelled {
            return Err(TransitionError::Cancelled);
        }
        if !self.completed {
            self.completed = true;
            self.touch();
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Appointment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Appointment {
    fn display_label(&self) -> String {
        format!(
            "appt:{} {} {} [{}]",
            self.id,
            self.slot_date,
            self.slot_time,
            self.state_label()
        )
    }
}

impl Appointment {
    fn state_label(&self) -> &'static str {
        if self.cancelled {
            "cancelled"
        } else if self.completed {
            "completed"
        } else if self.paid {
            "paid"
        } else {
            "booked"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Rejected appointment state transitions.
pub enum TransitionError {
    /// Cancellation is terminal; no further flag may change.
    Cancelled,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::Cancelled => {
                f.write_str("appointment is cancelled and can no longer change state")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booked() -> Appointment {
        Appointment::book(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            "10:30 am".into(),
            30_000,
        )
    }

    #[test]
    fn booking_starts_with_all_flags_clear() {
        let appt = booked();
        assert!(!appt.cancelled);
        assert!(!appt.paid);
        assert!(!appt.completed);
        assert!(appt.is_live());
    }

    #[test]
    fn paid_moves_only_forward() {
        let mut appt = booked();
        appt.mark_paid().unwrap();
        assert!(appt.paid);
        appt.mark_paid().unwrap();
        assert!(appt.paid, "re-confirming stays paid");
    }

    #[test]
    fn cancellation_is_terminal() {
        let mut appt = booked();
        appt.mark_cancelled();
        assert!(!appt.is_live());
        assert_eq!(appt.mark_paid(), Err(TransitionError::Cancelled));
        assert_eq!(appt.mark_completed(), Err(TransitionError::Cancelled));
        assert!(!appt.paid);
        assert!(!appt.completed);
    }

    #[test]
    fn cancelling_twice_matches_cancelling_once() {
        let mut once = booked();
        let mut twice = once.clone();
        once.mark_cancelled();
        twice.mark_cancelled();
        twice.mark_cancelled();
        assert_eq!(once.cancelled, twice.cancelled);
        assert_eq!(once.paid, twice.paid);
        assert_eq!(once.completed, twice.completed);
    }

    #[test]
    fn serde_round_trip_preserves_snapshots() {
        let appt = booked().with_snapshots(
            crate::ProviderSnapshot {
                name: "Dr. Rao".into(),
                speciality: Some("Dermatology".into()),
                fee_minor: 30_000,
            },
            crate::PatientSnapshot {
                name: "Asha".into(),
            },
        );
        let json = serde_json::to_string(&appt).unwrap();
        let back: Appointment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount_minor, 30_000);
        assert_eq!(
            back.provider_snapshot.as_ref().map(|p| p.name.as_str()),
            Some("Dr. Rao")
        );
    }
}
