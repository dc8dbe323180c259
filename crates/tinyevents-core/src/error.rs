//! Error types for tinyevents-core

use crate::{BoxError, EventKey, HandlerId};
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A handler returned an error while handling an event
    #[error("Handler {name} ({handler}) failed on {event}: {source}")]
    HandlerFailed {
        event: EventKey,
        handler: HandlerId,
        name: String,
        #[source]
        source: BoxError,
    },

    /// A handler panicked while handling an event
    #[error("Handler {name} ({handler}) panicked on {event}: {message}")]
    HandlerPanicked {
        event: EventKey,
        handler: HandlerId,
        name: String,
        message: String,
    },

    #[error("Handler not found: {0}")]
    HandlerNotFound(HandlerId),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The handler this error is about, if any
    pub fn handler_id(&self) -> Option<HandlerId> {
        match self {
            Error::HandlerFailed { handler, .. } | Error::HandlerPanicked { handler, .. } => {
                Some(*handler)
            }
            Error::HandlerNotFound(id) => Some(*id),
            Error::Config(_) => None,
        }
    }

    /// The event type being dispatched when this error occurred, if any
    pub fn event(&self) -> Option<&EventKey> {
        match self {
            Error::HandlerFailed { event, .. } | Error::HandlerPanicked { event, .. } => {
                Some(event)
            }
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Compile-time check that Error is Send + Sync.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
