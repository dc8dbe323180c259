//! The event bus
//!
//! [`EventBus`] owns every handler registration and dispatches events to
//! them in priority order. A failing handler never aborts a dispatch: the
//! failure is turned into an [`Error`] and passed to the bus's error handler,
//! then the next handler runs.

use crate::{
    config::{BusConfig, CancelPolicy},
    event::is_cancelled,
    registry::Registry,
    BoxError, Error, Event, EventKey, Handler, HandlerId, HandlerInfo, Priority, Result,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Callback receiving every handler failure
pub type ErrorHandler = Box<dyn FnMut(&Error) + Send>;

/// Error handler used when none is given: logs the failure
pub fn default_error_handler(error: &Error) {
    tracing::error!(
        event = error.event().map(EventKey::short_name),
        handler = error.handler_id().map(|id| id.raw()),
        "{}",
        error
    );
}

/// Summary of one dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    /// Handlers that were run, including the ones that failed
    pub invoked: usize,
    /// Handlers that returned an error or panicked
    pub failed: usize,
    /// Dispatch ended early because the event was cancelled
    pub stopped: bool,
}

impl Dispatch {
    /// True when no handler failed
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Why a single handler invocation did not succeed
enum Failure {
    Error(BoxError),
    Panic(String),
}

/// Type-keyed, priority-ordered event bus
pub struct EventBus {
    config: BusConfig,
    registry: Registry,
    on_error: ErrorHandler,
}

impl EventBus {
    /// Create a bus with the default configuration and error handler
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Create a bus with a custom configuration
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            registry: Registry::with_capacity(config.initial_capacity),
            config,
            on_error: Box::new(default_error_handler),
        }
    }

    /// Replace the error handler
    pub fn with_error_handler<F>(mut self, on_error: F) -> Self
    where
        F: FnMut(&Error) + Send + 'static,
    {
        self.on_error = Box::new(on_error);
        self
    }

    /// Replace the error handler in place
    pub fn set_error_handler<F>(&mut self, on_error: F)
    where
        F: FnMut(&Error) + Send + 'static,
    {
        self.on_error = Box::new(on_error);
    }

    /// Current configuration
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Register a handler for events of type `E` at its own priority
    pub fn register<E, H>(&mut self, handler: H) -> HandlerId
    where
        E: Event,
        H: Handler<E> + 'static,
    {
        let priority = handler.priority();
        self.register_with_priority(priority, handler)
    }

    /// Register a handler at an explicit priority, ignoring the handler's own
    pub fn register_with_priority<E, H>(&mut self, priority: Priority, handler: H) -> HandlerId
    where
        E: Event,
        H: Handler<E> + 'static,
    {
        let id = self.registry.insert::<E>(priority, Box::new(handler));
        let key = EventKey::of::<E>();
        tracing::debug!(
            handler = %id,
            event = %key,
            priority,
            "registered handler"
        );
        id
    }

    /// Remove a handler
    ///
    /// Fails with [`Error::HandlerNotFound`] when the ID is unknown or was
    /// already removed.
    pub fn unregister(&mut self, id: HandlerId) -> Result<()> {
        match self.registry.remove(id) {
            Some(key) => {
                tracing::debug!(handler = %id, event = %key, "unregistered handler");
                Ok(())
            }
            None => {
                tracing::debug!(handler = %id, "cannot unregister unknown handler");
                Err(Error::HandlerNotFound(id))
            }
        }
    }

    /// Dispatch an event to every handler registered for its type
    ///
    /// Handlers run by descending priority, ties in registration order.
    /// Under [`CancelPolicy::StopPropagation`] the cancel state is checked
    /// before each handler, including the first.
    pub fn call<E: Event>(&mut self, event: &mut E) -> Dispatch {
        let mut dispatch = Dispatch::default();
        let Some(list) = self.registry.list_mut::<E>() else {
            return dispatch;
        };

        let key = EventKey::of::<E>();
        let stop_on_cancel = self.config.cancel_policy == CancelPolicy::StopPropagation;

        for entry in list.entries_mut() {
            if stop_on_cancel && is_cancelled(event) {
                dispatch.stopped = true;
                break;
            }

            dispatch.invoked += 1;
            let error = match invoke(&mut *entry.handler, event, self.config.catch_panics) {
                Ok(()) => continue,
                Err(Failure::Error(source)) => Error::HandlerFailed {
                    event: key,
                    handler: entry.id,
                    name: entry.name.clone(),
                    source,
                },
                Err(Failure::Panic(message)) => Error::HandlerPanicked {
                    event: key,
                    handler: entry.id,
                    name: entry.name.clone(),
                    message,
                },
            };
            dispatch.failed += 1;
            (self.on_error)(&error);
        }

        tracing::trace!(
            event = %key,
            invoked = dispatch.invoked,
            failed = dispatch.failed,
            stopped = dispatch.stopped,
            "dispatched event"
        );
        dispatch
    }

    /// Dispatch an owned event and hand it back afterwards
    pub fn emit<E: Event>(&mut self, mut event: E) -> E {
        self.call(&mut event);
        event
    }

    /// Number of handlers registered for `E`
    pub fn handler_count<E: Event>(&self) -> usize {
        self.registry.handler_count(&EventKey::of::<E>())
    }

    /// Handlers registered for `E`, in dispatch order
    pub fn handlers<E: Event>(&self) -> Vec<HandlerInfo> {
        self.registry.infos(&EventKey::of::<E>())
    }

    /// Event types with at least one handler, in first-registration order
    pub fn event_types(&self) -> impl Iterator<Item = &EventKey> {
        self.registry.event_types()
    }

    /// Number of event types with at least one handler
    pub fn event_type_count(&self) -> usize {
        self.registry.event_type_count()
    }

    /// Whether a handler ID is currently registered
    pub fn contains(&self, id: HandlerId) -> bool {
        self.registry.contains(id)
    }

    /// Total number of registered handlers
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every registration
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("config", &self.config)
            .field("event_types", &self.event_type_count())
            .field("handlers", &self.len())
            .finish_non_exhaustive()
    }
}

fn invoke<E: Event>(
    handler: &mut dyn Handler<E>,
    event: &mut E,
    catch_panics: bool,
) -> std::result::Result<(), Failure> {
    if !catch_panics {
        return handler.handle(event).map_err(Failure::Error);
    }
    match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(event))) {
        Ok(result) => result.map_err(Failure::Error),
        Err(payload) => Err(Failure::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
