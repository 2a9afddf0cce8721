//! The state machine engine.
//!
//! Holds the current state and the execution context, and commits the
//! transitions handlers ask for:
//!
//! 1. the current state handles the event and returns a [`Transition`](crate::Transition);
//! 2. on `Stay`, nothing else happens;
//! 3. on `To(next)`, the engine runs `exit` on the old state, hands it back
//!    to the ownership policy, installs `next` and runs its `entry`.

mod machine;

pub use machine::{Dispatched, StateMachine, DEFAULT_LABEL};
