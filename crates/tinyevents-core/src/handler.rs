//! Handler traits and adapters

use crate::{Event, HandlerId};
use serde::{Deserialize, Serialize};

/// Handler priority. Higher values run first.
///
/// The full range is `i16::MIN..=i16::MAX`.
pub type Priority = i16;

/// Priority used when a handler does not pick one
pub const DEFAULT_PRIORITY: Priority = 0;

/// Boxed error returned by fallible handlers
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single handler invocation
pub type HandlerResult = std::result::Result<(), BoxError>;

/// Handles events of type `E`
///
/// Implement this for stateful listeners. Plain closures taking `&mut E`
/// are handlers too, and [`fallible`] adapts closures returning a
/// [`HandlerResult`].
///
/// ```
/// use tinyevents_core::{Event, EventBus, Handler, HandlerResult, Priority};
///
/// #[derive(Debug)]
/// struct Damage(u32);
/// impl Event for Damage {}
///
/// struct Armor;
///
/// impl Handler<Damage> for Armor {
///     fn handle(&mut self, event: &mut Damage) -> HandlerResult {
///         event.0 = event.0.saturating_sub(5);
///         Ok(())
///     }
///
///     fn priority(&self) -> Priority {
///         100
///     }
/// }
///
/// let mut bus = EventBus::new();
/// bus.register(Armor);
/// let damage = bus.emit(Damage(12));
/// assert_eq!(damage.0, 7);
/// ```
pub trait Handler<E: Event>: Send {
    /// Handle an incoming event
    fn handle(&mut self, event: &mut E) -> HandlerResult;

    /// Priority of this handler
    fn priority(&self) -> Priority {
        DEFAULT_PRIORITY
    }

    /// Name used in logs and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<E, F> Handler<E> for F
where
    E: Event,
    F: FnMut(&mut E) + Send,
{
    fn handle(&mut self, event: &mut E) -> HandlerResult {
        self(event);
        Ok(())
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Adapter turning a closure that returns [`HandlerResult`] into a handler
pub struct Fallible<F>(pub F);

/// Wrap a fallible closure as a handler
pub fn fallible<E, F>(f: F) -> Fallible<F>
where
    E: Event,
    F: FnMut(&mut E) -> HandlerResult + Send,
{
    Fallible(f)
}

impl<E, F> Handler<E> for Fallible<F>
where
    E: Event,
    F: FnMut(&mut E) -> HandlerResult + Send,
{
    fn handle(&mut self, event: &mut E) -> HandlerResult {
        (self.0)(event)
    }

    fn name(&self) -> &str {
        "fallible closure"
    }
}

/// Read-only view of a registered handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerInfo {
    pub id: HandlerId,
    pub priority: Priority,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter(u32);

    impl Event for Counter {}

    struct Doubler;

    impl Handler<Counter> for Doubler {
        fn handle(&mut self, event: &mut Counter) -> HandlerResult {
            event.0 *= 2;
            Ok(())
        }

        fn priority(&self) -> Priority {
            Priority::MAX
        }
    }

    fn run<H: Handler<Counter>>(handler: &mut H, event: &mut Counter) -> HandlerResult {
        handler.handle(event)
    }

    #[test]
    fn test_closure_handler() {
        let mut handler = |event: &mut Counter| {
            event.0 += 1;
        };
        let mut event = Counter(1);
        assert!(run(&mut handler, &mut event).is_ok());
        assert_eq!(event.0, 2);
        assert_eq!(Handler::<Counter>::priority(&handler), DEFAULT_PRIORITY);
        assert_eq!(Handler::<Counter>::name(&handler), "closure");
    }

    #[test]
    fn test_struct_handler() {
        let mut event = Counter(21);
        let mut doubler = Doubler;
        run(&mut doubler, &mut event).unwrap();
        assert_eq!(event.0, 42);
        assert_eq!(doubler.priority(), i16::MAX);
        assert!(doubler.name().ends_with("Doubler"));
    }

    #[test]
    fn test_fallible_handler() {
        let mut handler = fallible(|event: &mut Counter| {
            if event.0 == 0 {
                return Err("counter is zero".into());
            }
            event.0 -= 1;
            Ok(())
        });

        let mut event = Counter(1);
        assert!(run(&mut handler, &mut event).is_ok());
        assert_eq!(event.0, 0);

        let err = run(&mut handler, &mut event).unwrap_err();
        assert_eq!(err.to_string(), "counter is zero");
    }
}
