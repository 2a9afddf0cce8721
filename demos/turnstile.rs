//! Coin-Operated Turnstile
//!
//! This example walks a turnstile through its two states.
//!
//! Key concepts:
//! - One type per state with entry/exit hooks (Locked <-> Unlocked)
//! - Events declared with `event_enum!`
//! - The same states running under either ownership policy
//! - Transition journal and structured logging
//!
//! Run with: cargo run --example turnstile [owned|registry]
//! Set RUST_LOG=handover=trace to see every dispatch.

use handover::{event_enum, Next, Owned, Policy, Registry, State, StateMachine, Transition};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Gate {
    collected: u32,
    passages: u32,
    alarms: u32,
}

#[derive(Debug, Clone, Copy)]
struct CoinInserted {
    cents: u32,
}

#[derive(Debug, Clone, Copy)]
struct ArmPushed;

event_enum! {
    #[derive(Debug, Clone, Copy)]
    enum GateEvent {
        CoinInserted,
        ArmPushed,
    }
}

const FARE: u32 = 25;

struct Locked;

struct Unlocked {
    change: u32,
}

impl<P: Policy<Gate, GateEvent>> State<Gate, GateEvent, P> for Locked {
    fn entry(&mut self, _gate: &mut Gate) {
        println!("  [Locked] bolt thrown");
    }

    fn exit(&mut self, _gate: &mut Gate) {
        println!("  [Locked] bolt released");
    }

    fn handle(
        &mut self,
        gate: &mut Gate,
        event: &GateEvent,
        states: &mut P,
    ) -> Next<Gate, GateEvent, P> {
        match event {
            GateEvent::CoinInserted(coin) if coin.cents >= FARE => {
                gate.collected += FARE;
                states.transition_to(Unlocked {
                    change: coin.cents - FARE,
                })
            }
            GateEvent::CoinInserted(coin) => {
                println!("  [Locked] {} cents is not enough, coin returned", coin.cents);
                Transition::Stay
            }
            GateEvent::ArmPushed(_) => {
                gate.alarms += 1;
                println!("  [Locked] beep");
                Transition::Stay
            }
        }
    }
}

impl<P: Policy<Gate, GateEvent>> State<Gate, GateEvent, P> for Unlocked {
    fn entry(&mut self, _gate: &mut Gate) {
        if self.change > 0 {
            println!("  [Unlocked] returning {} cents change", self.change);
        }
        println!("  [Unlocked] welcome");
    }

    fn exit(&mut self, gate: &mut Gate) {
        gate.passages += 1;
    }

    fn handle(
        &mut self,
        _gate: &mut Gate,
        event: &GateEvent,
        states: &mut P,
    ) -> Next<Gate, GateEvent, P> {
        match event {
            GateEvent::CoinInserted(coin) => {
                println!("  [Unlocked] already open, {} cents returned", coin.cents);
                Transition::Stay
            }
            GateEvent::ArmPushed(_) => states.transition_to(Locked),
        }
    }
}

fn script() -> Vec<GateEvent> {
    vec![
        ArmPushed.into(),
        CoinInserted { cents: 10 }.into(),
        CoinInserted { cents: 25 }.into(),
        CoinInserted { cents: 25 }.into(),
        ArmPushed.into(),
        CoinInserted { cents: 50 }.into(),
        ArmPushed.into(),
    ]
}

fn run<P>(policy: P) -> StateMachine<Gate, GateEvent, P>
where
    P: Policy<Gate, GateEvent> + Default + 'static,
{
    let mut machine: StateMachine<Gate, GateEvent, P> = StateMachine::builder()
        .context(Gate::default())
        .policy(policy)
        .initial(Locked)
        .history(16)
        .label("turnstile")
        .build()
        .unwrap_or_else(|err| panic!("turnstile configuration is complete: {err}"));

    for event in script() {
        println!("{} while {}", event.name(), machine.current_name());
        let outcome = machine.dispatch(&event);
        if let handover::Dispatched::Transitioned { from, to } = outcome {
            println!("  {from} -> {to}");
        }
    }

    machine
}

fn report<P: Policy<Gate, GateEvent>>(machine: &StateMachine<Gate, GateEvent, P>) {
    let gate = machine.context();
    println!();
    println!("Final state: {}", machine.current_name());
    println!(
        "Collected {} cents, {} passages, {} alarms",
        gate.collected, gate.passages, gate.alarms
    );
    println!("Path: {}", machine.history().path().join(" -> "));
    println!("Transitions: {}", machine.history().total());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("handover=debug".parse()?))
        .init();

    let policy = std::env::args().nth(1).unwrap_or_else(|| "owned".to_string());
    println!("=== Turnstile ({policy} policy) ===\n");

    match policy.as_str() {
        "registry" => {
            let machine = run(Registry::<Gate, GateEvent>::new());
            report(&machine);
            println!(
                "Slots: {}, allocations: {}, reuses: {}",
                machine.policy().len(),
                machine.policy().allocations(),
                machine.policy().reuses()
            );
        }
        _ => {
            let machine = run(Owned);
            report(&machine);
        }
    }

    Ok(())
}
