//! medibook-domain
//!
//! Pure domain models (Appointment, slot keys, profile snapshots).
//! No I/O, no storage. Only data types and lifecycle rules.

pub mod appointment;
pub mod common;
pub mod profile;
pub mod slot;

pub use appointment::*;
pub use common::*;
pub use profile::*;
pub use slot::*;
