//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{State, StateBox, TransitionLog};
use crate::engine::{StateMachine, DEFAULT_LABEL};
use crate::policy::{Owned, Policy};

/// Deferred construction of the initial state, run against the policy at build time.
type InitialState<C, E, P> = Box<dyn FnOnce(&mut P) -> StateBox<C, E, P>>;

/// Builder for constructing state machines with a fluent API.
///
/// The context and the initial state are required. The policy defaults to
/// `P::default()`, the transition journal is disabled unless a capacity is
/// given, and log events use [`DEFAULT_LABEL`] unless a label is set.
pub struct StateMachineBuilder<C, E, P = Owned> {
    context: Option<C>,
    policy: Option<P>,
    initial: Option<InitialState<C, E, P>>,
    history: usize,
    label: &'static str,
}

impl<C, E, P> StateMachineBuilder<C, E, P>
where
    C: 'static,
    E: 'static,
    P: Policy<C, E> + Default + 'static,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            context: None,
            policy: None,
            initial: None,
            history: 0,
            label: DEFAULT_LABEL,
        }
    }

    /// Set the execution context (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the ownership policy instance.
    pub fn policy(mut self, policy: P) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the initial state (required).
    ///
    /// The state is handed to the policy when the machine is built.
    pub fn initial<T>(mut self, state: T) -> Self
    where
        T: State<C, E, P> + 'static,
    {
        self.initial = Some(Box::new(move |policy: &mut P| policy.make_state(state)));
        self
    }

    /// Keep the `capacity` most recent transitions in the machine's journal.
    pub fn history(mut self, capacity: usize) -> Self {
        self.history = capacity;
        self
    }

    /// Set the label attached to this machine's log events.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Build the state machine, entering the initial state.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<C, E, P>, BuildError> {
        let context = self.context.ok_or(BuildError::MissingContext)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut policy = self.policy.unwrap_or_default();
        let initial = initial(&mut policy);
        let history = TransitionLog::with_capacity(self.history);

        Ok(StateMachine::assemble(
            context, policy, initial, history, self.label,
        ))
    }
}

impl<C, E, P> Default for StateMachineBuilder<C, E, P>
where
    C: 'static,
    E: 'static,
    P: Policy<C, E> + Default + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E, P> StateMachine<C, E, P>
where
    C: 'static,
    E: 'static,
    P: Policy<C, E> + Default + 'static,
{
    /// Start configuring a machine.
    pub fn builder() -> StateMachineBuilder<C, E, P> {
        StateMachineBuilder::new()
    }
}
