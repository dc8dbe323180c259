//! TinyEvents Core - a tiny, type-keyed, priority-ordered event bus
//!
//! This crate provides:
//! - [`Event`] and [`Cancellable`] traits for event types
//! - [`Handler`] for listeners (closures taking `&mut E` are handlers too)
//! - [`EventBus`] to register handlers, dispatch events and unregister again
//!
//! ## Dispatch Rules
//!
//! - Events are routed by their exact concrete type
//! - Higher [`Priority`] runs first; equal priorities run in registration order
//! - A handler that errors or panics is reported to the bus's error handler
//!   and the remaining handlers still run
//!
//! ## Example
//!
//! ```
//! use tinyevents_core::{Event, EventBus};
//!
//! #[derive(Debug)]
//! struct Login {
//!     user: String,
//!     greeting: Option<String>,
//! }
//!
//! impl Event for Login {}
//!
//! let mut bus = EventBus::new();
//! let id = bus.register(|event: &mut Login| {
//!     event.greeting = Some(format!("welcome back, {}", event.user));
//! });
//!
//! let login = bus.emit(Login { user: "ada".into(), greeting: None });
//! assert_eq!(login.greeting.as_deref(), Some("welcome back, ada"));
//!
//! bus.unregister(id).unwrap();
//! assert_eq!(bus.handler_count::<Login>(), 0);
//! ```

mod bus;
pub mod config;
mod error;
mod event;
mod handler;
mod identity;
mod registry;

pub use bus::{default_error_handler, Dispatch, ErrorHandler, EventBus};
pub use config::{BusConfig, CancelPolicy};
pub use error::{Error, Result};
pub use event::{Cancellable, Event};
pub use handler::{
    fallible, BoxError, Fallible, Handler, HandlerInfo, HandlerResult, Priority, DEFAULT_PRIORITY,
};
pub use identity::{EventKey, HandlerId};
