//! The single function that maps an event kind to the right hook on a
//! state, plus the kind-specific shortcuts the transition engine uses when
//! it already knows which hook it wants.

use hsm_core::{Event, StateId, EMPTY, ENTRY, EXIT, INIT};

use crate::hsm::Hsm;

impl Hsm {
    /// Routes `event` to the hook its kind names. `EMPTY` never calls a
    /// hook at all: it is answered directly from the state's `super_id`,
    /// which the engine can read with only `&self`. A real hook call would
    /// need `&mut self` just to satisfy `HsmContext`'s signature, for a
    /// lookup that never has a side effect to perform.
    pub(crate) fn trigger(&mut self, state: StateId, event: &Event) -> Option<StateId> {
        match event.kind() {
            EMPTY => self.super_id_of(state),
            INIT => self.trigger_init(state, event),
            ENTRY => self.trigger_entry(state, event),
            EXIT => self.trigger_exit(state, event),
            _ => self.trigger_handle(state, event),
        }
    }

    pub(crate) fn trigger_init(&mut self, state: StateId, event: &Event) -> Option<StateId> {
        let node = self.state_node(state);
        node.init(self, event)
    }

    pub(crate) fn trigger_entry(&mut self, state: StateId, event: &Event) -> Option<StateId> {
        let node = self.state_node(state);
        node.entry(self, event)
    }

    pub(crate) fn trigger_exit(&mut self, state: StateId, event: &Event) -> Option<StateId> {
        let node = self.state_node(state);
        node.exit(self, event)
    }

    pub(crate) fn trigger_handle(&mut self, state: StateId, event: &Event) -> Option<StateId> {
        let node = self.state_node(state);
        node.handle(self, event)
    }
}
