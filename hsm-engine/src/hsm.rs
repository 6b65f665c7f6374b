//! The concrete state machine: dispatch, initialization, and the read-only
//! parts of the public façade (`is_in`, `current_state`).
//!
//! Transition methods (`q_tran*`/`q_init`) live in [`crate::transition`];
//! the single-hook router lives in [`crate::trigger`]. Dispatcher,
//! transition engine, and cache are distinct concerns that happen to share
//! one struct's fields, so each gets its own module rather than piling
//! everything into one `impl Hsm` block.

use std::collections::HashMap;
use std::rc::Rc;

use hsm_core::{fatal, Event, HsmContext, HsmError, State, StateId, INITIAL_ID, TOP_ID};
use log::{debug, trace};

use crate::transition::ActionChain;

/// Opaque identifier of the machine's subclass flavor. Never interpreted
/// by the runtime; carried purely for the application's own bookkeeping
/// when it runs more than one kind of machine side by side.
pub type TypeTag = u32;

/// A running hierarchical state machine. Build one with
/// [`crate::HsmBuilder`]; nothing else constructs an `Hsm`.
pub struct Hsm {
    type_tag: TypeTag,
    current: StateId,
    source: StateId,
    state_table: HashMap<StateId, Rc<dyn State>>,
    static_cache: HashMap<(StateId, StateId), ActionChain>,
}

impl Hsm {
    pub(crate) fn from_parts(type_tag: TypeTag, state_table: HashMap<StateId, Rc<dyn State>>) -> Self {
        Hsm {
            type_tag,
            current: TOP_ID,
            source: INITIAL_ID,
            state_table,
            static_cache: HashMap::new(),
        }
    }

    /// The type tag supplied at `build()`.
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// The id of the current (most concrete) state.
    pub fn current_state_id(&self) -> StateId {
        self.current
    }

    /// The current state's node.
    pub fn current_state(&self) -> Rc<dyn State> {
        self.state_node(self.current)
    }

    /// Whether `target_id` is the current state or one of its ancestors.
    pub fn is_in(&self, target_id: StateId) -> bool {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            if id == target_id {
                return true;
            }
            cursor = self.super_id_of(id);
        }
        false
    }

    /// Runs the top-most initial transition, driving `current` down from
    /// `Top` through every nested `init` until a state declines to descend
    /// further. Call exactly once, before the first `dispatch`.
    pub fn init(&mut self) {
        debug_assert_eq!(self.current, TOP_ID, "Hsm::init called more than once");
        debug_assert_eq!(self.source, INITIAL_ID, "Hsm::init called more than once");
        trace!("hsm init: starting from Initial");

        let top = self.current;
        self.trigger_init(self.source, &Event::init());
        self.assert_one_level_descent(top, self.current);

        let mut s = self.current;
        self.trigger_entry(s, &Event::entry());
        while self.trigger_init(s, &Event::init()).is_none() {
            self.assert_one_level_descent(s, self.current);
            s = self.current;
            self.trigger_entry(s, &Event::entry());
        }
        debug!("hsm init: complete, current={:?}", self.current);
    }

    /// Delivers one event, bubbling from `current` up through ancestors
    /// until one of them handles it.
    pub fn dispatch(&mut self, event: Event) {
        trace!("dispatch: current={:?} kind={}", self.current, event.kind());
        self.source = self.current;
        while let Some(next) = self.trigger(self.source, &event) {
            self.source = next;
        }
    }

    pub(crate) fn state_node(&self, id: StateId) -> Rc<dyn State> {
        match self.state_table.get(id) {
            Some(node) => Rc::clone(node),
            None => fatal(HsmError::UnknownStateId(id)),
        }
    }

    pub(crate) fn super_id_of(&self, id: StateId) -> Option<StateId> {
        self.state_table.get(id).and_then(|node| node.super_id())
    }

    pub(crate) fn lookup_target(&self, id: StateId) -> StateId {
        if id == TOP_ID {
            fatal(HsmError::TopIsNotATarget(id));
        }
        if self.state_table.contains_key(id) {
            id
        } else {
            fatal(HsmError::UnknownStateId(id))
        }
    }

    pub(crate) fn current(&self) -> StateId {
        self.current
    }

    pub(crate) fn set_current(&mut self, id: StateId) {
        self.current = id;
    }

    pub(crate) fn source(&self) -> StateId {
        self.source
    }

    pub(crate) fn static_cache_get(&self, key: (StateId, StateId)) -> Option<ActionChain> {
        self.static_cache.get(&key).cloned()
    }

    pub(crate) fn static_cache_insert(&mut self, key: (StateId, StateId), chain: ActionChain) {
        self.static_cache.insert(key, chain);
    }

    pub(crate) fn assert_one_level_descent(&self, ancestor: StateId, descendant: StateId) {
        if self.super_id_of(descendant) != Some(ancestor) {
            fatal(HsmError::NonOneLevelInitialDescent {
                ancestor,
                descendant,
            });
        }
    }
}

impl HsmContext for Hsm {
    fn q_init(&mut self, target: StateId) {
        Hsm::q_init(self, target)
    }

    fn q_tran(&mut self, target: StateId) {
        Hsm::q_tran(self, target)
    }

    fn q_tran_on_event(&mut self, target: StateId, event: &Event) {
        Hsm::q_tran_on_event(self, target, event)
    }

    fn q_tran_dyn(&mut self, target: StateId) {
        Hsm::q_tran_dyn(self, target)
    }

    fn q_tran_dyn_on_event(&mut self, target: StateId, event: &Event) {
        Hsm::q_tran_dyn_on_event(self, target, event)
    }

    fn current_state_id(&self) -> StateId {
        Hsm::current_state_id(self)
    }

    fn is_in(&self, target: StateId) -> bool {
        Hsm::is_in(self, target)
    }
}
