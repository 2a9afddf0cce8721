//! Builder API for ergonomic state machine construction.
//!
//! [`StateMachineBuilder`] gathers the context, the initial state and the
//! optional settings (policy instance, journal capacity, log label) before
//! entering the first state. [`event_enum!`](crate::event_enum) declares an
//! event enum with one variant per event type.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
