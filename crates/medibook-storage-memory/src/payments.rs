//! Scriptable payment-authority fake.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use chrono::Utc;
use medibook_core::{CoreError, PaymentAuthority, PaymentOrder, PaymentOrderStatus};
use uuid::Uuid;

/// Stands in for the external payment authority. Orders start in
/// `Created`; tests drive them to `Paid` or `Failed` through
/// [`MemoryPaymentAuthority::settle`] / [`MemoryPaymentAuthority::fail`].
#[derive(Clone, Default)]
pub struct MemoryPaymentAuthority {
    orders: Arc<Mutex<HashMap<String, PaymentOrder>>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryPaymentAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an order paid, as a shopper completing checkout would.
    pub fn settle(&self, reference: &str) -> Result<(), CoreError> {
        self.set_status(reference, PaymentOrderStatus::Paid)
    }

    /// Marks an order failed.
    pub fn fail(&self, reference: &str) -> Result<(), CoreError> {
        self.set_status(reference, PaymentOrderStatus::Failed)
    }

    fn set_status(&self, reference: &str, status: PaymentOrderStatus) -> Result<(), CoreError> {
        let mut orders = self.lock()?;
        let order = orders
            .get_mut(reference)
            .ok_or_else(|| CoreError::Upstream(format!("unknown order reference {reference}")))?;
        order.status = status;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, PaymentOrder>>, CoreError> {
        self.orders
            .lock()
            .map_err(|_| CoreError::Storage("payment authority lock poisoned".into()))
    }
}

impl PaymentAuthority for MemoryPaymentAuthority {
    fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        reconciliation_key: Uuid,
    ) -> Result<PaymentOrder, CoreError> {
        if amount_minor <= 0 {
            return Err(CoreError::Upstream(
                "payment authority rejected non-positive amount".into(),
            ));
        }
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let order = PaymentOrder {
            reference: format!("order_{sequence:06}"),
            amount_minor,
            currency: currency.to_string(),
            reconciliation_key,
            status: PaymentOrderStatus::Created,
            created_at: Utc::now(),
        };
        self.lock()?.insert(order.reference.clone(), order.clone());
        Ok(order)
    }

    fn fetch_order(&self, reference: &str) -> Result<PaymentOrder, CoreError> {
        self.lock()?
            .get(reference)
            .cloned()
            .ok_or_else(|| CoreError::Upstream(format!("unknown order reference {reference}")))
    }
}
