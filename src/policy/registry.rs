//! Slot-per-type ownership: storage is allocated once and reused.

use super::Policy;
use crate::core::{short_type_name, State, StateBox};
use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors reported by [`Registry::try_make_state`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested state type is the machine's current state.
    #[error("state '{state}' is current; its slot cannot be reused while it is live")]
    SlotInUse { state: &'static str },

    /// The requested state type was already handed out during this handler call.
    #[error("state '{state}' was already requested in this handler call; its slot is checked out")]
    AlreadyRequested { state: &'static str },
}

/// Explicit slot map with one slot per concrete state type.
///
/// The first request for a type allocates its slot. When the engine releases
/// a state, it is parked back into its slot; the next request for that type
/// overwrites the parked instance in place and hands the same allocation
/// back out. After every state type has been visited once, transitions no
/// longer touch the heap.
///
/// A slot is checked out from the request that hands it out until the
/// engine releases the state again. Requesting a checked-out type is
/// refused: [`RegistryError::SlotInUse`] if it is the current state,
/// [`RegistryError::AlreadyRequested`] if a handler asks for it twice in
/// one call. The [`Policy::make_state`] entry point panics instead. In
/// particular, a state cannot transition to its own type under this policy.
///
/// A handler may still drop a request and return another one. The engine
/// reports the end of every handler call through [`Policy::settle`]; slots
/// whose instance was dropped that way are counted by
/// [`abandoned`](Registry::abandoned) and allocated afresh on their next
/// request.
///
/// # Example
///
/// ```rust
/// use handover::{Next, Policy, Registry, State, StateBox, Transition};
///
/// struct Level(u8);
///
/// impl State<(), (), Registry<(), ()>> for Level {
///     fn entry(&mut self, _context: &mut ()) {}
///     fn exit(&mut self, _context: &mut ()) {}
///     fn handle(
///         &mut self,
///         _context: &mut (),
///         _event: &(),
///         _states: &mut Registry<(), ()>,
///     ) -> Next<(), (), Registry<(), ()>> {
///         Transition::Stay
///     }
/// }
///
/// let mut registry: Registry<(), ()> = Registry::new();
///
/// let first: StateBox<(), (), Registry<(), ()>> = registry.make_state(Level(1));
/// let first_addr = &*first as *const dyn State<(), (), Registry<(), ()>> as *const ();
/// registry.release(first);
///
/// let second = registry.make_state(Level(2));
/// let second_addr = &*second as *const dyn State<(), (), Registry<(), ()>> as *const ();
///
/// assert_eq!(first_addr, second_addr);
/// assert_eq!(registry.allocations(), 1);
/// assert_eq!(registry.reuses(), 1);
/// ```
pub struct Registry<C: 'static, E: 'static> {
    slots: HashMap<TypeId, Slot<C, E>>,
    current: Option<TypeId>,
    allocations: usize,
    reuses: usize,
    abandoned: usize,
}

struct Slot<C: 'static, E: 'static> {
    name: &'static str,
    parked: Option<StateBox<C, E, Registry<C, E>>>,
    /// Handed out by a request whose handler call has not settled yet.
    pending: bool,
}

impl<C: 'static, E: 'static> Registry<C, E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            current: None,
            allocations: 0,
            reuses: 0,
            abandoned: 0,
        }
    }

    /// Hand out the slot for `T`, filled with `state`.
    ///
    /// Reuses the parked allocation for `T` if there is one, otherwise
    /// allocates the slot. Fails if the slot is checked out.
    pub fn try_make_state<T>(&mut self, state: T) -> Result<StateBox<C, E, Self>, RegistryError>
    where
        T: State<C, E, Self> + 'static,
    {
        let key = TypeId::of::<T>();
        let slot = match self.slots.entry(key) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                vacant.insert(Slot {
                    name: short_type_name::<T>(),
                    parked: None,
                    pending: true,
                });
                self.allocations += 1;
                let fresh: StateBox<C, E, Self> = Box::new(state);
                return Ok(fresh);
            }
        };

        let Some(parked) = slot.parked.take() else {
            if self.current == Some(key) {
                return Err(RegistryError::SlotInUse { state: slot.name });
            }
            if slot.pending {
                return Err(RegistryError::AlreadyRequested { state: slot.name });
            }
            // The instance was dropped by a handler that returned another
            // request; it never came back to be parked.
            slot.pending = true;
            self.allocations += 1;
            let fresh: StateBox<C, E, Self> = Box::new(state);
            return Ok(fresh);
        };

        slot.pending = true;
        let parked: Box<dyn Any> = parked;
        let reused: StateBox<C, E, Self> = match parked.downcast::<T>() {
            Ok(mut instance) => {
                *instance = state;
                self.reuses += 1;
                instance
            }
            // Slots are keyed by TypeId, so a parked box is always a `T`.
            Err(_) => {
                self.allocations += 1;
                Box::new(state)
            }
        };
        Ok(reused)
    }

    /// Number of slot instances ever allocated.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Number of requests served by overwriting a parked instance.
    pub fn reuses(&self) -> usize {
        self.reuses
    }

    /// Number of handed-out instances that handlers dropped instead of returning.
    ///
    /// Each one costs a fresh allocation on the next request for its type.
    pub fn abandoned(&self) -> usize {
        self.abandoned
    }

    /// Number of slots currently holding a parked instance.
    pub fn parked(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.parked.is_some())
            .count()
    }

    /// True if `T` has a parked instance ready for reuse.
    pub fn is_parked<T: 'static>(&self) -> bool {
        self.slots
            .get(&TypeId::of::<T>())
            .is_some_and(|slot| slot.parked.is_some())
    }

    /// True if the instance of `T` is handed out (current or pending).
    pub fn is_checked_out<T: 'static>(&self) -> bool {
        self.slots
            .get(&TypeId::of::<T>())
            .is_some_and(|slot| slot.parked.is_none())
    }

    /// True if the machine's current state is a `T`.
    pub fn is_current<T: 'static>(&self) -> bool {
        self.current == Some(TypeId::of::<T>())
    }

    /// Number of slots, one per state type seen so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no state type has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<C: 'static, E: 'static> Default for Registry<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static, E: 'static> fmt::Debug for Registry<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&'static str> = self.slots.values().map(|slot| slot.name).collect();
        names.sort_unstable();
        f.debug_struct("Registry")
            .field("slots", &names)
            .field("allocations", &self.allocations)
            .field("reuses", &self.reuses)
            .field("abandoned", &self.abandoned)
            .finish()
    }
}

impl<C: 'static, E: 'static> Policy<C, E> for Registry<C, E> {
    /// # Panics
    ///
    /// Panics if the slot for `T` is checked out: `T` is the type of the
    /// current state, or was already requested in this handler call. See
    /// [`Registry::try_make_state`].
    fn make_state<T>(&mut self, state: T) -> StateBox<C, E, Self>
    where
        T: State<C, E, Self> + 'static,
    {
        match self.try_make_state(state) {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    fn install(&mut self, state: &StateBox<C, E, Self>) {
        let key = type_key(state);
        if let Some(slot) = self.slots.get_mut(&key) {
            slot.pending = false;
        }
        self.current = Some(key);
    }

    fn settle(&mut self) {
        for slot in self.slots.values_mut().filter(|slot| slot.pending) {
            slot.pending = false;
            self.abandoned += 1;
        }
    }

    fn release(&mut self, state: StateBox<C, E, Self>) {
        let key = type_key(&state);
        if self.current == Some(key) {
            self.current = None;
        }
        let name = state.name();
        let slot = self.slots.entry(key).or_insert(Slot {
            name,
            parked: None,
            pending: false,
        });
        slot.pending = false;
        slot.parked = Some(state);
    }
}

fn type_key<C: 'static, E: 'static, P: 'static>(state: &StateBox<C, E, P>) -> TypeId {
    let any: &dyn Any = &**state;
    any.type_id()
}
