//! State machine that dispatches events to the current state.

use crate::core::{State, StateBox, Transition, TransitionLog};
use crate::policy::{Owned, Policy};
use std::any::Any;
use std::fmt;

/// Label used in log events when none is configured.
pub const DEFAULT_LABEL: &str = "state_machine";

/// Result of dispatching a single event.
///
/// Purely informational: the machine has already committed the outcome
/// when `dispatch` returns, so callers are free to ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// The current state handled the event and stayed current
    Stayed,

    /// The current state requested a switch, which was committed
    Transitioned {
        from: &'static str,
        to: &'static str,
    },
}

impl Dispatched {
    /// True if the event caused a transition.
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// State machine holding the current state and the execution context.
///
/// The machine owns both exclusively. Every hook receives the context by
/// mutable reference, one call at a time. Handlers never see the machine
/// itself, so dispatch cannot re-enter.
///
/// Lifecycle:
/// - construction runs `entry` on the initial state;
/// - [`dispatch`](Self::dispatch) runs `exit(old)`, hands `old` back to the
///   policy, installs the new state and runs `entry(new)`, in that order,
///   whenever a handler returns [`Transition::To`]; no event reaches either
///   state while the swap is in progress;
/// - dropping the machine runs `exit` on the current state.
pub struct StateMachine<C, E, P = Owned>
where
    C: 'static,
    E: 'static,
    P: Policy<C, E>,
{
    context: C,
    policy: P,
    current: StateBox<C, E, P>,
    history: TransitionLog,
    label: &'static str,
}

impl<C: 'static, E: 'static> StateMachine<C, E, Owned> {
    /// Create a machine using heap ownership and enter `initial`.
    pub fn new<T>(context: C, initial: T) -> Self
    where
        T: State<C, E, Owned> + 'static,
    {
        Self::with_policy(context, Owned, initial)
    }
}

impl<C, E, P> StateMachine<C, E, P>
where
    C: 'static,
    E: 'static,
    P: Policy<C, E>,
{
    /// Create a machine with the given ownership policy and enter `initial`.
    pub fn with_policy<T>(context: C, mut policy: P, initial: T) -> Self
    where
        T: State<C, E, P> + 'static,
    {
        let initial = policy.make_state(initial);
        Self::from_boxed(context, policy, initial)
    }

    /// Create a machine from an already produced state and enter it.
    pub fn from_boxed(context: C, policy: P, initial: StateBox<C, E, P>) -> Self {
        Self::assemble(context, policy, initial, TransitionLog::disabled(), DEFAULT_LABEL)
    }

    pub(crate) fn assemble(
        mut context: C,
        mut policy: P,
        mut initial: StateBox<C, E, P>,
        history: TransitionLog,
        label: &'static str,
    ) -> Self {
        tracing::debug!(machine = label, state = initial.name(), "entering initial state");
        policy.install(&initial);
        policy.settle();
        initial.entry(&mut context);

        Self {
            context,
            policy,
            current: initial,
            history,
            label,
        }
    }

    /// Let the current state react to `event`, committing any transition
    /// it requests before returning.
    pub fn dispatch(&mut self, event: &E) -> Dispatched {
        let Some(mut next) = self.react(event) else {
            self.policy.settle();
            tracing::trace!(
                machine = self.label,
                state = self.current.name(),
                "event handled without transition"
            );
            return Dispatched::Stayed;
        };

        let from = self.current.name();
        self.current.exit(&mut self.context);
        std::mem::swap(&mut self.current, &mut next);
        self.policy.release(next);
        self.policy.install(&self.current);
        self.policy.settle();
        self.current.entry(&mut self.context);
        let to = self.current.name();

        self.history.record(from, to);
        tracing::debug!(machine = self.label, from, to, "state transition");

        Dispatched::Transitioned { from, to }
    }

    /// Run the current state's handler and take the requested next state.
    fn react(&mut self, event: &E) -> Option<StateBox<C, E, P>> {
        match self.current.handle(&mut self.context, event, &mut self.policy) {
            Transition::Stay => None,
            Transition::To(next) => Some(next),
        }
    }

    /// Name of the current state.
    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    /// True if the current state is a `T`.
    pub fn is_in<T: 'static>(&self) -> bool {
        let current: &dyn Any = &*self.current;
        current.is::<T>()
    }

    /// The current state, if it is a `T`.
    pub fn current<T: 'static>(&self) -> Option<&T> {
        let current: &dyn Any = &*self.current;
        current.downcast_ref::<T>()
    }

    /// Get the execution context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Get the execution context mutably.
    ///
    /// No hook runs while the caller holds this borrow.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Get the ownership policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Get the transition journal.
    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    /// Label used in this machine's log events.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<C, E, P> Drop for StateMachine<C, E, P>
where
    C: 'static,
    E: 'static,
    P: Policy<C, E>,
{
    fn drop(&mut self) {
        tracing::debug!(
            machine = self.label,
            state = self.current.name(),
            "exiting current state on teardown"
        );
        self.current.exit(&mut self.context);
    }
}

impl<C, E, P> fmt::Debug for StateMachine<C, E, P>
where
    C: fmt::Debug + 'static,
    E: 'static,
    P: Policy<C, E> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("label", &self.label)
            .field("current", &self.current.name())
            .field("context", &self.context)
            .field("policy", &self.policy)
            .field("transitions", &self.history.total())
            .finish()
    }
}
