//! Event traits
//!
//! Any `'static + Send + Debug` type becomes dispatchable by implementing
//! [`Event`]. Dispatch is keyed on the exact concrete type, so there is no
//! notion of a parent event receiving its children.

use std::fmt;

/// An event that can be dispatched through an [`EventBus`](crate::EventBus)
///
/// # Example
///
/// ```
/// use tinyevents_core::{Cancellable, Event};
///
/// #[derive(Debug, Default)]
/// struct Chat {
///     message: String,
///     cancelled: bool,
/// }
///
/// impl Event for Chat {
///     fn as_cancellable(&self) -> Option<&dyn Cancellable> {
///         Some(self)
///     }
/// }
///
/// impl Cancellable for Chat {
///     fn set_cancelled(&mut self, state: bool) {
///         self.cancelled = state;
///     }
///
///     fn is_cancelled(&self) -> bool {
///         self.cancelled
///     }
/// }
///
/// let mut chat = Chat::default();
/// chat.cancel();
/// assert!(chat.as_cancellable().is_some_and(|c| c.is_cancelled()));
/// ```
pub trait Event: fmt::Debug + Send + 'static {
    /// View of this event's cancellation state, for events that have one
    fn as_cancellable(&self) -> Option<&dyn Cancellable> {
        None
    }
}

/// Cancellation state carried by an event
pub trait Cancellable {
    /// Set the cancel state
    fn set_cancelled(&mut self, state: bool);

    /// Get the current cancel state
    fn is_cancelled(&self) -> bool;

    /// Mark the event as cancelled
    fn cancel(&mut self) {
        self.set_cancelled(true);
    }

    /// Flip the cancel state
    fn toggle_cancelled(&mut self) {
        let state = self.is_cancelled();
        self.set_cancelled(!state);
    }
}

/// Whether an event is currently cancelled (`false` for non-cancellable events)
pub(crate) fn is_cancelled<E: Event>(event: &E) -> bool {
    event.as_cancellable().is_some_and(|c| c.is_cancelled())
}
