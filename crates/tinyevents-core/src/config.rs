//! Bus configuration
//!
//! Settings can be built in code or loaded from RON:
//!
//! ```
//! use tinyevents_core::{BusConfig, CancelPolicy};
//!
//! let config = BusConfig::from_ron(
//!     "(catch_panics: false, cancel_policy: StopPropagation)",
//! ).unwrap();
//! assert!(!config.catch_panics);
//! assert_eq!(config.cancel_policy, CancelPolicy::StopPropagation);
//! // Missing fields fall back to their defaults
//! assert_eq!(config.initial_capacity, 16);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default pre-sized capacity for the event type map and handler index
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// What a cancelled event does to the rest of a dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelPolicy {
    /// Every handler runs; handlers check cancellation themselves
    #[default]
    Propagate,
    /// Stop dispatching once the event reports itself cancelled
    StopPropagation,
}

/// Configuration for an [`EventBus`](crate::EventBus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Catch handler panics and report them to the error handler
    ///
    /// When disabled a panicking handler unwinds through `call`.
    pub catch_panics: bool,
    /// How cancellation affects dispatch
    pub cancel_policy: CancelPolicy,
    /// Number of event types and handlers to reserve room for
    pub initial_capacity: usize,
}

impl BusConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| Error::Config(e.to_string()))
    }

    /// Serialize this configuration as pretty RON
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Set whether handler panics are caught
    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    /// Set the cancellation policy
    pub fn with_cancel_policy(mut self, cancel_policy: CancelPolicy) -> Self {
        self.cancel_policy = cancel_policy;
        self
    }

    /// Set the initial capacity
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            catch_panics: true,
            cancel_policy: CancelPolicy::Propagate,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
