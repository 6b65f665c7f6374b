//! `hsm-core` has no machine to dispatch through on its own; these tests
//! cover the vocabulary types in isolation, independent of `hsm-engine`.

use hsm_core::{Event, HsmContext, State, StateId, TopState, INITIAL_ID, TOP_ID, USER};

#[test]
fn top_state_declines_every_hook() {
    struct NullContext;
    impl HsmContext for NullContext {
        fn q_init(&mut self, _target: StateId) {}
        fn q_tran(&mut self, _target: StateId) {}
        fn q_tran_on_event(&mut self, _target: StateId, _event: &Event) {}
        fn q_tran_dyn(&mut self, _target: StateId) {}
        fn q_tran_dyn_on_event(&mut self, _target: StateId, _event: &Event) {}
        fn current_state_id(&self) -> StateId {
            TOP_ID
        }
        fn is_in(&self, _target: StateId) -> bool {
            false
        }
    }

    let top = TopState;
    let mut ctx = NullContext;
    assert_eq!(top.id(), TOP_ID);
    assert_eq!(top.super_id(), None);
    assert!(top.entry(&mut ctx, &Event::entry()).is_none());
    assert!(top.exit(&mut ctx, &Event::exit()).is_none());
    assert!(top.init(&mut ctx, &Event::init()).is_none());
    assert!(top.handle(&mut ctx, &Event::signal(USER)).is_none());
}

#[test]
fn initial_state_carries_its_boot_target() {
    struct Recording {
        last_init: Option<StateId>,
    }
    impl HsmContext for Recording {
        fn q_init(&mut self, target: StateId) {
            self.last_init = Some(target);
        }
        fn q_tran(&mut self, _target: StateId) {}
        fn q_tran_on_event(&mut self, _target: StateId, _event: &Event) {}
        fn q_tran_dyn(&mut self, _target: StateId) {}
        fn q_tran_dyn_on_event(&mut self, _target: StateId, _event: &Event) {}
        fn current_state_id(&self) -> StateId {
            TOP_ID
        }
        fn is_in(&self, _target: StateId) -> bool {
            false
        }
    }

    let initial = hsm_core::InitialState::new("boot");
    assert_eq!(initial.id(), INITIAL_ID);

    let mut ctx = Recording { last_init: None };
    initial.init(&mut ctx, &Event::init());
    assert_eq!(ctx.last_init, Some("boot"));
}

#[test]
#[should_panic(expected = "reserved by the runtime")]
fn user_events_below_the_reserved_range_panic() {
    Event::signal(USER - 1);
}

#[test]
fn event_payload_round_trips_through_the_concrete_type() {
    let event = Event::user(USER, 7u8);
    assert_eq!(event.payload::<u8>(), Some(&7));
    assert_eq!(event.payload::<u32>(), None);
}
