//! Build errors for the state machine builder.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Context not specified. Call .context(value) before .build()")]
    MissingContext,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,
}
