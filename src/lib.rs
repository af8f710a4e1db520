#![doc(test(attr(deny(warnings))))]

//! Medibook offers the slot reservation, appointment lifecycle, and
//! payment reconciliation core that powers a single-provider booking
//! workflow.

pub mod utils;

pub use medibook_config as config;
pub use medibook_core as core;
pub use medibook_domain as domain;
pub use medibook_storage_memory as storage_memory;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Medibook tracing initialized.");
    });
}
