//! Slot identification and per-provider slot maps.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booked times per calendar day for one provider. The authoritative
/// availability record: a time label is present exactly while a live
/// appointment holds it.
pub type SlotMap = BTreeMap<NaiveDate, BTreeSet<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Identifies one bookable unit: a (provider, date, time) tuple.
pub struct SlotKey {
    pub provider_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
}

impl SlotKey {
    /// Builds a key with a normalized time label.
    pub fn new(provider_id: Uuid, date: NaiveDate, time: &str) -> Result<Self, SlotTimeError> {
        let time = normalize_slot_time(time)?;
        Ok(Self {
            provider_id,
            date,
            time,
        })
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.provider_id, self.date, self.time)
    }
}

/// Trims a slot time label, rejecting empty or unreasonably long input.
/// Labels are opaque (e.g. "10:30 am"); equality is exact after trimming.
pub fn normalize_slot_time(label: &str) -> Result<String, SlotTimeError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(SlotTimeError::Empty);
    }
    if trimmed.len() > MAX_SLOT_TIME_LEN {
        return Err(SlotTimeError::TooLong);
    }
    Ok(trimmed.to_string())
}

const MAX_SLOT_TIME_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors raised when constructing slot time labels.
pub enum SlotTimeError {
    Empty,
    TooLong,
}

impl fmt::Display for SlotTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotTimeError::Empty => f.write_str("slot time label must not be empty"),
            SlotTimeError::TooLong => f.write_str("slot time label is too long"),
        }
    }
}

impl std::error::Error for SlotTimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_surrounding_whitespace() {
        assert_eq!(normalize_slot_time("  10:30 am ").unwrap(), "10:30 am");
    }

    #[test]
    fn normalize_rejects_blank_labels() {
        assert_eq!(normalize_slot_time("   "), Err(SlotTimeError::Empty));
    }

    #[test]
    fn normalize_rejects_oversized_labels() {
        let label = "x".repeat(MAX_SLOT_TIME_LEN + 1);
        assert_eq!(normalize_slot_time(&label), Err(SlotTimeError::TooLong));
    }
}
