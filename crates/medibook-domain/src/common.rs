//! Shared traits for booking domain entities.

use uuid::Uuid;

/// Exposes a stable identifier for persisted entities.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
