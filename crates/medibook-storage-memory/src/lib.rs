//! medibook-storage-memory
//!
//! In-process reference backends for every collaborator trait in
//! medibook-core, plus a scriptable payment-authority fake. Contention
//! is resolved inside each backend: the slot ledger's conditional
//! reserve is evaluated and applied under a single lock acquisition.

pub mod directory;
pub mod payments;
pub mod reconciliation;
pub mod store;

pub use directory::MemoryDirectory;
pub use payments::MemoryPaymentAuthority;
pub use reconciliation::MemoryReconciliationLog;
pub use store::MemoryAppointmentStore;
