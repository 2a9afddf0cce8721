//! Core State trait for state machine states.
//!
//! Every application-defined state implements [`State`] for the machine's
//! context type `C`, event type `E` and ownership policy `P`. A state reacts
//! to an event by returning a [`Transition`]: either stay where it is, or
//! switch to a freshly produced next state.

use crate::policy::Owned;
use std::any::{type_name, Any};

/// Owned handle to a state, as stored by the engine while it is current.
pub type StateBox<C, E, P = Owned> = Box<dyn State<C, E, P>>;

/// What a handler returns: stay, or switch to the given state.
pub type Next<C, E, P = Owned> = Transition<StateBox<C, E, P>>;

/// Trait for state machine states.
///
/// The engine calls the hooks in a strict order: `entry` once when the state
/// becomes current, `handle` for each dispatched event while it is current,
/// then `exit` once when it stops being current (transition away or engine
/// teardown).
///
/// All three hooks are required, even if a state has nothing to do in them.
/// Handling an event enum with an exhaustive `match` means a state that
/// forgets an event type does not compile.
///
/// `entry` and `exit` return nothing, so they cannot request a transition.
/// Only `handle` can, through its return value.
///
/// # Example
///
/// ```rust
/// use handover::{Next, Owned, Policy, State, Transition};
///
/// struct Lamp {
///     lit: bool,
/// }
///
/// enum Switch {
///     Toggle,
/// }
///
/// struct Off;
/// struct On;
///
/// impl State<Lamp, Switch> for Off {
///     fn entry(&mut self, lamp: &mut Lamp) {
///         lamp.lit = false;
///     }
///
///     fn exit(&mut self, _lamp: &mut Lamp) {}
///
///     fn handle(
///         &mut self,
///         _lamp: &mut Lamp,
///         event: &Switch,
///         states: &mut Owned,
///     ) -> Next<Lamp, Switch> {
///         match event {
///             Switch::Toggle => states.transition_to(On),
///         }
///     }
/// }
///
/// impl State<Lamp, Switch> for On {
///     fn entry(&mut self, lamp: &mut Lamp) {
///         lamp.lit = true;
///     }
///
///     fn exit(&mut self, _lamp: &mut Lamp) {}
///
///     fn handle(
///         &mut self,
///         _lamp: &mut Lamp,
///         event: &Switch,
///         _states: &mut Owned,
///     ) -> Next<Lamp, Switch> {
///         match event {
///             Switch::Toggle => Transition::to(Box::new(Off)),
///         }
///     }
/// }
///
/// assert_eq!(<On as State<Lamp, Switch>>::name(&On), "On");
/// ```
pub trait State<C, E, P = Owned>: Any {
    /// Get the state's name for display/logging.
    ///
    /// Defaults to the type name without its module path.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Entry action, run once when this state becomes current.
    fn entry(&mut self, context: &mut C);

    /// Exit action, run once when this state stops being current.
    fn exit(&mut self, context: &mut C);

    /// Reacts to an event while this state is current.
    ///
    /// `states` is the machine's ownership policy; use it to produce the next
    /// state (see [`Policy::make_state`](crate::Policy::make_state) and
    /// [`Policy::transition_to`](crate::Policy::transition_to)).
    fn handle(&mut self, context: &mut C, event: &E, states: &mut P) -> Next<C, E, P>;
}

/// Outcome of handling a single event.
///
/// Returned from [`State::handle`]. The engine performs the actual switch
/// after the handler returns; a handler that builds several candidate
/// transitions only ever hands back the last one it returns.
#[derive(Debug)]
#[must_use = "a transition does nothing unless returned to the state machine"]
pub enum Transition<S> {
    /// Keep the current state. No exit or entry hooks run.
    Stay,
    /// Switch to the given state.
    To(S),
}

impl<S> Transition<S> {
    /// Creates a transition to the given state.
    pub fn to(state: S) -> Self {
        Self::To(state)
    }

    /// Creates a transition that keeps the current state.
    pub fn stay() -> Self {
        Self::Stay
    }

    /// True if no switch was requested.
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay)
    }

    /// True if a switch was requested.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::To(_))
    }

    /// Extracts the requested state, if any.
    pub fn into_state(self) -> Option<S> {
        match self {
            Self::Stay => None,
            Self::To(state) => Some(state),
        }
    }

    /// Maps the requested state with `f`, leaving `Stay` untouched.
    pub fn map<T, F>(self, f: F) -> Transition<T>
    where
        F: FnOnce(S) -> T,
    {
        match self {
            Self::Stay => Transition::Stay,
            Self::To(state) => Transition::To(f(state)),
        }
    }
}

impl<S> Default for Transition<S> {
    fn default() -> Self {
        Self::Stay
    }
}

impl<S> From<Option<S>> for Transition<S> {
    fn from(state: Option<S>) -> Self {
        match state {
            Some(state) => Self::To(state),
            None => Self::Stay,
        }
    }
}

/// Type name with module path and generic arguments stripped.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    struct Counter {
        handled: usize,
    }

    enum Tick {
        Once,
        Twice,
    }

    struct Idle;
    struct Busy;

    impl State<Counter, Tick> for Idle {
        fn entry(&mut self, _counter: &mut Counter) {}

        fn exit(&mut self, _counter: &mut Counter) {}

        fn handle(
            &mut self,
            counter: &mut Counter,
            event: &Tick,
            states: &mut Owned,
        ) -> Next<Counter, Tick> {
            counter.handled += 1;
            match event {
                Tick::Once => Transition::Stay,
                Tick::Twice => states.transition_to(Busy),
            }
        }
    }

    impl State<Counter, Tick> for Busy {
        fn name(&self) -> &'static str {
            "busy"
        }

        fn entry(&mut self, _counter: &mut Counter) {}

        fn exit(&mut self, _counter: &mut Counter) {}

        fn handle(
            &mut self,
            _counter: &mut Counter,
            _event: &Tick,
            _states: &mut Owned,
        ) -> Next<Counter, Tick> {
            Transition::Stay
        }
    }

    #[allow(dead_code)]
    struct Generic<T>(T);

    #[test]
    fn default_name_is_short_type_name() {
        assert_eq!(<Idle as State<Counter, Tick>>::name(&Idle), "Idle");
    }

    #[test]
    fn name_can_be_overridden() {
        assert_eq!(<Busy as State<Counter, Tick>>::name(&Busy), "busy");
    }

    #[test]
    fn short_type_name_strips_generics() {
        assert_eq!(short_type_name::<Generic<Vec<u8>>>(), "Generic");
        assert_eq!(short_type_name::<Idle>(), "Idle");
    }

    #[test]
    fn handler_returns_stay_or_switch() {
        let mut counter = Counter { handled: 0 };
        let mut idle = Idle;

        let stay = idle.handle(&mut counter, &Tick::Once, &mut Owned);
        assert!(stay.is_stay());

        let switch = idle.handle(&mut counter, &Tick::Twice, &mut Owned);
        assert!(switch.is_transition());
        let next = switch.into_state().map(|state| state.name());
        assert_eq!(next, Some("busy"));
        assert_eq!(counter.handled, 2);
    }

    #[test]
    fn transition_map_keeps_stay() {
        let stay: Transition<u8> = Transition::stay();
        assert!(stay.map(|value| value + 1).is_stay());

        let to = Transition::to(1u8).map(|value| value + 1);
        assert_eq!(to.into_state(), Some(2));
    }

    #[test]
    fn transition_from_option() {
        assert!(Transition::from(None::<u8>).is_stay());
        assert_eq!(Transition::from(Some(3u8)).into_state(), Some(3));
        assert!(Transition::<u8>::default().is_stay());
    }
}
