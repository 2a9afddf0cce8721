//! Heap ownership: one allocation per transition.

use super::Policy;
use crate::core::{State, StateBox};

/// Each request allocates a fresh, independently owned state.
///
/// Released states are dropped as soon as the engine hands them back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Owned;

impl<C, E> Policy<C, E> for Owned {
    fn make_state<T>(&mut self, state: T) -> StateBox<C, E, Self>
    where
        T: State<C, E, Self> + 'static,
    {
        Box::new(state)
    }

    fn release(&mut self, state: StateBox<C, E, Self>) {
        drop(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Next, Transition};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Tracked {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    impl State<(), ()> for Tracked {
        fn entry(&mut self, _context: &mut ()) {}

        fn exit(&mut self, _context: &mut ()) {}

        fn handle(&mut self, _context: &mut (), _event: &(), _states: &mut Owned) -> Next<(), ()> {
            Transition::Stay
        }
    }

    #[test]
    fn make_state_allocates_distinct_instances() {
        let drops = Rc::new(Cell::new(0));
        let mut policy = Owned;

        let first: StateBox<(), ()> = policy.make_state(Tracked {
            drops: Rc::clone(&drops),
        });
        let second: StateBox<(), ()> = policy.make_state(Tracked {
            drops: Rc::clone(&drops),
        });

        let first_addr = &*first as *const dyn State<(), ()> as *const ();
        let second_addr = &*second as *const dyn State<(), ()> as *const ();
        assert_ne!(first_addr, second_addr);

        drop(first);
        drop(second);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn release_drops_the_state() {
        let drops = Rc::new(Cell::new(0));
        let mut policy = Owned;

        let state: StateBox<(), ()> = policy.make_state(Tracked {
            drops: Rc::clone(&drops),
        });
        Policy::<(), ()>::release(&mut policy, state);

        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn transition_to_wraps_the_new_state() {
        let drops = Rc::new(Cell::new(0));
        let mut policy = Owned;

        let next: Next<(), ()> = policy.transition_to(Tracked {
            drops: Rc::clone(&drops),
        });
        assert!(next.is_transition());
    }
}
