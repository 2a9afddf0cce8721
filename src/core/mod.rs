//! Core state machine types.
//!
//! This module contains the state side of the machine:
//! - State definitions via the `State` trait
//! - The `Transition` value a handler returns
//! - A bounded journal of committed transitions

mod history;
mod state;

pub use history::{TransitionLog, TransitionRecord};
pub(crate) use state::short_type_name;
pub use state::{Next, State, StateBox, Transition};
