//! Coin-operated turnstile shared by the integration tests.

#![allow(dead_code)]

use handover::{event_enum, Next, Policy, State, Transition};
use std::cell::RefCell;
use std::rc::Rc;

/// A hook invocation, tagged with the state it ran on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hook {
    Entry(&'static str),
    Handle(&'static str),
    Exit(&'static str),
}

/// Shared hook log, readable after the machine is gone.
pub type HookLog = Rc<RefCell<Vec<Hook>>>;

#[derive(Debug, Default)]
pub struct Turnstile {
    pub log: HookLog,
    pub beeps: u32,
    pub credit: u32,
}

impl Turnstile {
    pub fn new() -> (Self, HookLog) {
        let turnstile = Self::default();
        let log = Rc::clone(&turnstile.log);
        (turnstile, log)
    }

    fn hook(&self, hook: Hook) {
        self.log.borrow_mut().push(hook);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoinInserted {
    pub cents: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmPushed;

event_enum! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum TurnstileEvent {
        CoinInserted,
        ArmPushed,
    }
}

pub fn coin(cents: u32) -> TurnstileEvent {
    CoinInserted { cents }.into()
}

pub fn push() -> TurnstileEvent {
    ArmPushed.into()
}

pub struct Locked;

pub struct Unlocked {
    pub credit: u32,
}

impl<P: Policy<Turnstile, TurnstileEvent>> State<Turnstile, TurnstileEvent, P> for Locked {
    fn entry(&mut self, turnstile: &mut Turnstile) {
        turnstile.credit = 0;
        turnstile.hook(Hook::Entry("Locked"));
    }

    fn exit(&mut self, turnstile: &mut Turnstile) {
        turnstile.hook(Hook::Exit("Locked"));
    }

    fn handle(
        &mut self,
        turnstile: &mut Turnstile,
        event: &TurnstileEvent,
        states: &mut P,
    ) -> Next<Turnstile, TurnstileEvent, P> {
        turnstile.hook(Hook::Handle("Locked"));
        match event {
            TurnstileEvent::CoinInserted(coin) => {
                states.transition_to(Unlocked { credit: coin.cents })
            }
            TurnstileEvent::ArmPushed(_) => {
                turnstile.beeps += 1;
                Transition::Stay
            }
        }
    }
}

impl<P: Policy<Turnstile, TurnstileEvent>> State<Turnstile, TurnstileEvent, P> for Unlocked {
    fn entry(&mut self, turnstile: &mut Turnstile) {
        turnstile.credit = self.credit;
        turnstile.hook(Hook::Entry("Unlocked"));
    }

    fn exit(&mut self, turnstile: &mut Turnstile) {
        turnstile.hook(Hook::Exit("Unlocked"));
    }

    fn handle(
        &mut self,
        turnstile: &mut Turnstile,
        event: &TurnstileEvent,
        states: &mut P,
    ) -> Next<Turnstile, TurnstileEvent, P> {
        turnstile.hook(Hook::Handle("Unlocked"));
        match event {
            TurnstileEvent::CoinInserted(_) => Transition::Stay,
            TurnstileEvent::ArmPushed(_) => states.transition_to(Locked),
        }
    }
}
