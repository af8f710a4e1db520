//! Payment intent creation and confirmation against the authority.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    AppointmentStore, CoreError, CoreResult, PaymentAuthority, PaymentOrder, PaymentOrderStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a payment confirmation attempt.
pub struct PaymentConfirmation {
    pub paid: bool,
}

/// Reconciles appointments with the external payment authority.
///
/// Orders are tagged with the appointment id as reconciliation key, and
/// confirmation resolves the appointment from that key alone.
pub struct PaymentService {
    authority: Arc<dyn PaymentAuthority>,
    store: Arc<dyn AppointmentStore>,
    currency: String,
}

impl PaymentService {
    pub fn new(
        authority: Arc<dyn PaymentAuthority>,
        store: Arc<dyn AppointmentStore>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            authority,
            store,
            currency: currency.into(),
        }
    }

    /// Asks the authority to create an order for the appointment's
    /// amount. No local state changes.
    ///
    /// The appointment amount is already in minor currency units, the
    /// denomination the authority expects, so it is passed unchanged.
    pub fn create_payment_intent(&self, appointment_id: Uuid) -> CoreResult<PaymentOrder> {
        let appointment = self
            .store
            .find_by_id(appointment_id)?
            .ok_or(CoreError::AppointmentNotFound(appointment_id))?;

        if appointment.cancelled {
            return Err(CoreError::AppointmentCancelled(appointment_id));
        }

        let order =
            self.authority
                .create_order(appointment.amount_minor, &self.currency, appointment.id)?;
        tracing::info!(
            appointment = %appointment_id,
            order = %order.reference,
            amount_minor = order.amount_minor,
            "payment intent created"
        );
        Ok(order)
    }

    /// Fetches the authority's record for `reference` and, when it
    /// reports the order paid, marks the linked appointment paid.
    ///
    /// Safe to invoke repeatedly for the same reference: re-confirming
    /// an already-paid appointment is a no-op success. A paid order
    /// whose appointment was cancelled in the meantime never sets
    /// `paid`; the mismatch is surfaced for manual follow-up.
    pub fn confirm_payment(&self, reference: &str) -> CoreResult<PaymentConfirmation> {
        let order = self.authority.fetch_order(reference)?;

        if order.status != PaymentOrderStatus::Paid {
            tracing::info!(order = %reference, status = %order.status, "payment not settled");
            return Ok(PaymentConfirmation { paid: false });
        }

        let appointment_id = order.reconciliation_key;
        let mut appointment = self
            .store
            .find_by_id(appointment_id)?
            .ok_or(CoreError::AppointmentNotFound(appointment_id))?;

        if appointment.cancelled {
            tracing::error!(
                appointment = %appointment_id,
                order = %reference,
                "paid order references a cancelled appointment"
            );
            return Err(CoreError::AppointmentCancelled(appointment_id));
        }

        if appointment.paid {
            return Ok(PaymentConfirmation { paid: true });
        }

        appointment.mark_paid()?;
        self.store.update(&appointment)?;
        tracing::info!(appointment = %appointment_id, order = %reference, "payment confirmed");
        Ok(PaymentConfirmation { paid: true })
    }
}
