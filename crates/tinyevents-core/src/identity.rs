//! Identity types for handlers and event types

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unique identifier for a handler registration on one bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub u64);

impl HandlerId {
    /// Create a new handler ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler:{}", self.0)
    }
}

/// Identity of a concrete event type
///
/// Two keys are equal exactly when they were built from the same type.
/// The type name is carried along for logs and error messages only.
#[derive(Debug, Clone, Copy)]
pub struct EventKey {
    id: TypeId,
    name: &'static str,
}

impl EventKey {
    /// Key for the type `E`
    pub fn of<E: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
        }
    }

    /// The underlying type ID
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        // Generic arguments may themselves contain paths, so only strip the
        // path in front of the first `<`.
        let head_end = self.name.find('<').unwrap_or(self.name.len());
        let start = self.name[..head_end].rfind("::").map_or(0, |i| i + 2);
        &self.name[start..]
    }
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventKey {}

impl Hash for EventKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
