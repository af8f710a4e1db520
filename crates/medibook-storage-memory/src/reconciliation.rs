//! In-memory orphaned-slot log.

use std::sync::{Arc, Mutex, MutexGuard};

use medibook_core::{CoreError, CoreResult, OrphanedSlot, ReconciliationLog};

#[derive(Clone, Default)]
pub struct MemoryReconciliationLog {
    inner: Arc<Mutex<Vec<OrphanedSlot>>>,
}

impl MemoryReconciliationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending records awaiting a sweep.
    pub fn pending(&self) -> CoreResult<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<OrphanedSlot>>, CoreError> {
        self.inner
            .lock()
            .map_err(|_| CoreError::Storage("reconciliation log lock poisoned".into()))
    }
}

impl ReconciliationLog for MemoryReconciliationLog {
    fn record(&self, orphan: OrphanedSlot) -> CoreResult<()> {
        self.lock()?.push(orphan);
        Ok(())
    }

    fn drain(&self) -> CoreResult<Vec<OrphanedSlot>> {
        let mut records = self.lock()?;
        Ok(records.drain(..).collect())
    }
}
