//! Reads source text from stdin, strips everything between `/*` and `*/`,
//! and writes what remains to stdout. The whole parser is four flat states
//! under `Top` — `code`, `slash`, `star`, `comment` — driven one byte at a
//! time; there is no nesting in this state chart.
//!
//! Run with `RUST_LOG=trace` to see every hook fire per input byte.

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

use hsm_engine::{Event, HsmBuilder, HsmContext, State, StateId};

const CODE: StateId = "code";
const SLASH: StateId = "slash";
const STAR: StateId = "star";
const COMMENT: StateId = "comment";

const EVT_SLASH: u32 = hsm_engine::USER;
const EVT_STAR: u32 = hsm_engine::USER + 1;
const EVT_CHAR: u32 = hsm_engine::USER + 2;

struct CodeState {
    out: Rc<RefCell<Vec<u8>>>,
}
impl State for CodeState {
    fn id(&self) -> StateId {
        CODE
    }
    fn super_id(&self) -> Option<StateId> {
        Some(hsm_engine::TOP_ID)
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_SLASH => {
                hsm.q_tran_on_event(SLASH, event);
                None
            }
            EVT_CHAR => {
                let c = *event.payload::<u8>().expect("char event carries a byte");
                self.out.borrow_mut().push(c);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct SlashState {
    out: Rc<RefCell<Vec<u8>>>,
}
impl State for SlashState {
    fn id(&self) -> StateId {
        SLASH
    }
    fn super_id(&self) -> Option<StateId> {
        Some(hsm_engine::TOP_ID)
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_CHAR => {
                let c = *event.payload::<u8>().expect("char event carries a byte");
                self.out.borrow_mut().push(b'/');
                self.out.borrow_mut().push(c);
                hsm.q_tran(CODE);
                None
            }
            EVT_SLASH => {
                self.out.borrow_mut().push(b'/');
                self.out.borrow_mut().push(b'/');
                hsm.q_tran(CODE);
                None
            }
            EVT_STAR => {
                hsm.q_tran(COMMENT);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct StarState;
impl State for StarState {
    fn id(&self) -> StateId {
        STAR
    }
    fn super_id(&self) -> Option<StateId> {
        Some(hsm_engine::TOP_ID)
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_STAR => {
                hsm.q_tran(STAR);
                None
            }
            EVT_CHAR => {
                hsm.q_tran(COMMENT);
                None
            }
            EVT_SLASH => {
                hsm.q_tran(CODE);
                None
            }
            _ => self.super_id(),
        }
    }
}

struct CommentState;
impl State for CommentState {
    fn id(&self) -> StateId {
        COMMENT
    }
    fn super_id(&self) -> Option<StateId> {
        Some(hsm_engine::TOP_ID)
    }
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        match event.kind() {
            EVT_CHAR | EVT_SLASH => {
                hsm.q_tran(COMMENT);
                None
            }
            EVT_STAR => {
                hsm.q_tran(STAR);
                None
            }
            _ => self.super_id(),
        }
    }
}

fn build() -> (hsm_engine::Hsm, Rc<RefCell<Vec<u8>>>) {
    let out = Rc::new(RefCell::new(Vec::new()));
    let hsm = HsmBuilder::new()
        .state(hsm_engine::TopState)
        .state(hsm_engine::InitialState::new(CODE))
        .state(CodeState { out: Rc::clone(&out) })
        .state(SlashState { out: Rc::clone(&out) })
        .state(StarState)
        .state(CommentState)
        .build(1);
    (hsm, out)
}

fn main() -> io::Result<()> {
    env_logger::init();

    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;

    let (mut hsm, out) = build();
    hsm.init();
    for b in input {
        let event = match b {
            b'/' => Event::signal(EVT_SLASH),
            b'*' => Event::signal(EVT_STAR),
            c => Event::user(EVT_CHAR, c),
        };
        hsm.dispatch(event);
    }

    io::stdout().write_all(&out.borrow())?;
    Ok(())
}
