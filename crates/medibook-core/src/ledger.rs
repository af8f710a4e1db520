//! The slot ledger: authoritative record of which slots are held.

use medibook_domain::SlotKey;

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    Reserved,
    AlreadyHeld,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released,
    /// Releasing a free slot is a no-op, not an error; retries and
    /// prior partial failures make this a normal outcome.
    NotHeld,
}

/// Abstraction over the per-provider slot map.
///
/// `reserve` must evaluate and apply "insert time into the set for this
/// date unless already present" as one indivisible operation: of N
/// concurrent reservations for the same key, exactly one observes
/// `Reserved`. Implementations resolve contention at the storage layer;
/// callers never hold an in-process lock across a call.
pub trait SlotLedger: Send + Sync {
    fn is_held(&self, key: &SlotKey) -> Result<bool, CoreError>;
    fn reserve(&self, key: &SlotKey) -> Result<ReserveOutcome, CoreError>;
    fn release(&self, key: &SlotKey) -> Result<ReleaseOutcome, CoreError>;
}
