//! End-to-end test for a flat (non-nested) hierarchical state machine: a
//! tokenizer that copies source characters to its output buffer while
//! swallowing anything between `/*` and `*/`. All four states (`code`,
//! `slash`, `star`, `comment`) sit directly under `Top`; this scenario
//! exercises sibling transitions and self-transitions rather than deep
//! ancestor chains the way the Samek scenario does.

use std::cell::RefCell;
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
                // A second slash right after the first is just two code
                // chars; the one that triggered this state's entry was
                // withheld until now so it can be recorded alongside
                // whatever follows it.
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

fn feed(hsm: &mut hsm_engine::Hsm, input: &str) {
    for b in input.bytes() {
        let event = match b {
            b'/' => Event::signal(EVT_SLASH),
            b'*' => Event::signal(EVT_STAR),
            c => Event::user(EVT_CHAR, c),
        };
        hsm.dispatch(event);
    }
}

#[test]
fn strips_block_comments_while_copying_code() {
    let (mut hsm, out) = build();
    hsm.init();
    assert_eq!(hsm.current_state_id(), CODE);

    feed(&mut hsm, "a/=/*c/*d**/b");

    assert_eq!(hsm.current_state_id(), CODE);
    assert_eq!(&*out.borrow(), b"a/=b");
}

#[test]
fn lone_slash_not_followed_by_star_is_copied_verbatim() {
    let (mut hsm, out) = build();
    hsm.init();

    feed(&mut hsm, "x/y");

    assert_eq!(hsm.current_state_id(), CODE);
    assert_eq!(&*out.borrow(), b"x/y");
}

#[test]
fn unterminated_comment_leaves_machine_in_comment_state() {
    let (mut hsm, out) = build();
    hsm.init();

    feed(&mut hsm, "a/*bcd");

    assert_eq!(hsm.current_state_id(), COMMENT);
    assert_eq!(&*out.borrow(), b"a");
}
