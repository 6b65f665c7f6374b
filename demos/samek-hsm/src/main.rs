//! Drives the state chart from Miro Samek's *Practical Statecharts in C/C++*
//! (the canonical worked example for this kind of runtime): seven states
//! nested three levels deep under `Top`, with a machine-local `foo` flag
//! shared between the two states that toggle it.
//!
//! Run with `RUST_LOG=trace` to see every `entry`/`exit`/`init` hook fire as
//! the event sequence below plays out.

use std::cell::Cell;
use std::rc::Rc;

use hsm_engine::{Event, HsmBuilder, HsmContext, State, StateId};

const S0: StateId = "s0";
const S1: StateId = "s1";
const S11: StateId = "s11";
const S2: StateId = "s2";
const S21: StateId = "s21";
const S211: StateId = "s211";

const EVT_A: u32 = hsm_engine::USER;
const EVT_B: u32 = hsm_engine::USER + 1;
const EVT_C: u32 = hsm_engine::USER + 2;
const EVT_D: u32 = hsm_engine::USER + 3;
const EVT_E: u32 = hsm_engine::USER + 4;
const EVT_F: u32 = hsm_engine::USER + 5;
const EVT_G: u32 = hsm_engine::USER + 6;
const EVT_H: u32 = hsm_engine::USER + 7;

fn event_name(kind: u32) -> &'static str {
    match kind {
        EVT_A => "A",
        EVT_B => "B",
        EVT_C => "C",
        EVT_D => "D",
        EVT_E => "E",
        EVT_F => "F",
        EVT_G => "G",
        EVT_H => "H",
        _ => "?",
    }
}

struct S0State;
impl State for S0State {
    fn id(&self) -> StateId {
        S0
    }
    fn super_id(&self) -> Option<StateId> {
        Some(hsm_engine::TOP_ID)
    }
    fn init(&self, hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        hsm.q_init(S1);
        None
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_E => {
                hsm.q_tran(S211);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct S1State;
impl State for S1State {
    fn id(&self) -> StateId {
        S1
    }
    fn super_id(&self) -> Option<StateId> {
        Some(S0)
    }
    fn init(&self, hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        hsm.q_init(S11);
        None
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_A => {
                hsm.q_tran(S1);
                None
            }
            EVT_B => {
                hsm.q_tran(S11);
                None
            }
            EVT_C => {
                hsm.q_tran(S2);
                None
            }
            EVT_D => {
                hsm.q_tran(S0);
                None
            }
            EVT_F => {
                hsm.q_tran(S211);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct S11State {
    foo: Rc<Cell<bool>>,
}
impl State for S11State {
    fn id(&self) -> StateId {
        S11
    }
    fn super_id(&self) -> Option<StateId> {
        Some(S1)
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_G => {
                hsm.q_tran(S211);
                None
            }
            EVT_H if self.foo.get() => {
                self.foo.set(false);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct S2State;
impl State for S2State {
    fn id(&self) -> StateId {
        S2
    }
    fn super_id(&self) -> Option<StateId> {
        Some(S0)
    }
    fn init(&self, hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        hsm.q_init(S21);
        None
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_C => {
                hsm.q_tran(S1);
                None
            }
            EVT_F => {
                hsm.q_tran(S11);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct S21State {
    foo: Rc<Cell<bool>>,
}
impl State for S21State {
    fn id(&self) -> StateId {
        S21
    }
    fn super_id(&self) -> Option<StateId> {
        Some(S2)
    }
    fn init(&self, hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        hsm.q_init(S211);
        None
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_B => {
                hsm.q_tran(S211);
                None
            }
            EVT_H if !self.foo.get() => {
                self.foo.set(true);
                hsm.q_tran(S21);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct S211State;
impl State for S211State {
    fn id(&self) -> StateId {
        S211
    }
    fn super_id(&self) -> Option<StateId> {
        Some(S21)
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_D => {
                hsm.q_tran(S21);
                None
            }
            EVT_G => {
                hsm.q_tran(S0);
                None
            }
            _ => self.super_id(),
        }
    }
}

fn build() -> hsm_engine::Hsm {
    let foo = Rc::new(Cell::new(false));
    HsmBuilder::new()
        .state(hsm_engine::TopState)
        .state(hsm_engine::InitialState::new(S0))
        .state(S0State)
        .state(S1State)
        .state(S11State { foo: Rc::clone(&foo) })
        .state(S2State)
        .state(S21State { foo: Rc::clone(&foo) })
        .state(S211State)
        .build(0)
}

fn main() {
    env_logger::init();

    let mut hsm = build();
    hsm.init();
    println!("initial state: {}", hsm.current_state_id());

    for kind in [EVT_A, EVT_B, EVT_C, EVT_D, EVT_E, EVT_F, EVT_G, EVT_H] {
        hsm.dispatch(Event::signal(kind));
        println!("after {}: {}", event_name(kind), hsm.current_state_id());
    }
}
