//! Handover: a flat finite state machine with one object per state.
//!
//! Every state is its own type with `entry`, `exit` and `handle` hooks. The
//! engine owns a single current state plus an application context, and commits
//! exactly one transition per dispatched event when the handler asks for one.
//! Where the next state lives is decided by an ownership policy.
//!
//! # Core Concepts
//!
//! - **State**: a type implementing [`State`], stored behind a [`StateBox`]
//! - **Transition**: the value `handle` returns, [`Transition::Stay`] or [`Transition::To`]
//! - **Policy**: [`Owned`] boxes a fresh state per transition, [`Registry`] reuses one slot
//!   per state type
//! - **Engine**: [`StateMachine`] runs `exit` on the old state before `entry` on the new one
//! - **Journal**: an optional bounded [`TransitionLog`] of committed transitions
//!
//! # Example
//!
//! ```rust
//! use handover::{Next, Policy, State, StateMachine, Transition};
//!
//! #[derive(Default)]
//! struct Gate {
//!     coins: u32,
//!     passages: u32,
//! }
//!
//! enum Event {
//!     Coin,
//!     Push,
//! }
//!
//! struct Locked;
//! struct Unlocked;
//!
//! impl<P: Policy<Gate, Event>> State<Gate, Event, P> for Locked {
//!     fn entry(&mut self, _gate: &mut Gate) {}
//!     fn exit(&mut self, _gate: &mut Gate) {}
//!
//!     fn handle(&mut self, gate: &mut Gate, event: &Event, states: &mut P) -> Next<Gate, Event, P> {
//!         match event {
//!             Event::Coin => {
//!                 gate.coins += 1;
//!                 states.transition_to(Unlocked)
//!             }
//!             Event::Push => Transition::Stay,
//!         }
//!     }
//! }
//!
//! impl<P: Policy<Gate, Event>> State<Gate, Event, P> for Unlocked {
//!     fn entry(&mut self, _gate: &mut Gate) {}
//!     fn exit(&mut self, gate: &mut Gate) {
//!         gate.passages += 1;
//!     }
//!
//!     fn handle(&mut self, _gate: &mut Gate, event: &Event, states: &mut P) -> Next<Gate, Event, P> {
//!         match event {
//!             Event::Coin => Transition::Stay,
//!             Event::Push => states.transition_to(Locked),
//!         }
//!     }
//! }
//!
//! let mut machine: StateMachine<Gate, Event> = StateMachine::new(Gate::default(), Locked);
//! machine.dispatch(&Event::Coin);
//! machine.dispatch(&Event::Push);
//!
//! assert!(machine.is_in::<Locked>());
//! assert_eq!(machine.context().coins, 1);
//! assert_eq!(machine.context().passages, 1);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod policy;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use core::{Next, State, StateBox, Transition, TransitionLog, TransitionRecord};
pub use engine::{Dispatched, StateMachine};
pub use policy::{Owned, Policy, Registry, RegistryError};
