//! State ownership policies.
//!
//! A policy decides where the next state lives once a handler asks for it:
//!
//! - [`Owned`]: every request boxes a fresh instance, released states are
//!   dropped.
//! - [`Registry`]: one slot per concrete state type, allocated on first use
//!   and overwritten in place on every later request.
//!
//! The policy is a type parameter of both [`State`] and
//! [`StateMachine`](crate::StateMachine), so a state can be written once,
//! generically over `P: Policy<C, E>`, and run under either.

mod owned;
mod registry;

pub use owned::Owned;
pub use registry::{Registry, RegistryError};

use crate::core::{Next, State, StateBox, Transition};

/// Strategy for producing and reclaiming state instances.
///
/// The engine drives a policy in a fixed order: `make_state` from inside a
/// handler, then `release` for the old state, `install` for the new one and
/// `settle` once the handler's requests are resolved.
pub trait Policy<C, E>: Sized + 'static {
    /// Produce an owned handle to `state`, ready to become the next current state.
    fn make_state<T>(&mut self, state: T) -> StateBox<C, E, Self>
    where
        T: State<C, E, Self> + 'static;

    /// Note that `state` is about to become current.
    ///
    /// Called by the engine right before the state's `entry` hook.
    fn install(&mut self, _state: &StateBox<C, E, Self>) {}

    /// Note that the handler's requests have been resolved.
    ///
    /// Called by the engine after every handler returns, once the returned
    /// state (if any) is installed. States produced during that call and not
    /// installed were dropped by the handler.
    fn settle(&mut self) {}

    /// Take back a state that has just stopped being current.
    ///
    /// Called by the engine after the state's `exit` hook.
    fn release(&mut self, state: StateBox<C, E, Self>);

    /// Shorthand for `Transition::to(self.make_state(state))`.
    fn transition_to<T>(&mut self, state: T) -> Next<C, E, Self>
    where
        T: State<C, E, Self> + 'static,
    {
        Transition::To(self.make_state(state))
    }
}
