//! `HsmBuilder`: the only construction path for an [`Hsm`].
//!
//! States are registered flat — `HsmBuilder::state` does not ask a state to
//! declare its children, only its own id and `super_id`. Child edges and
//! reachability from `Top` are derived once, at `build()`, by inverting the
//! `super_id` links collected from every registered state.

use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use hsm_core::{unwrap_fatal, HsmError, HsmResult, State, StateId, INITIAL_ID, TOP_ID};
use log::debug;

use crate::hsm::{Hsm, TypeTag};

/// Accumulates registered states and produces an [`Hsm`] once validated.
pub struct HsmBuilder {
    states: Vec<Rc<dyn State>>,
}

impl HsmBuilder {
    /// An empty builder. Callers must register `Top`, an `Initial`
    /// pseudostate, and every application state before calling `build`.
    pub fn new() -> Self {
        HsmBuilder { states: Vec::new() }
    }

    /// Registers one state. Order does not matter; `build` derives the tree
    /// from each state's own `super_id()`.
    pub fn state(mut self, state: impl State + 'static) -> Self {
        self.states.push(Rc::new(state));
        self
    }

    /// Validates the registered states and builds the machine.
    ///
    /// Panics (via [`hsm_core::fatal`]) if any id is duplicated, any state
    /// is unreachable from `Top`, or `Top`/`Initial` were never registered.
    /// `type_tag` is carried on the resulting [`Hsm`] and never interpreted
    /// by the runtime; it exists for application code that runs more than
    /// one flavor of machine and wants to tell them apart at a glance.
    pub fn build(self, type_tag: TypeTag) -> Hsm {
        unwrap_fatal(self.try_build(type_tag))
    }

    fn try_build(self, type_tag: TypeTag) -> HsmResult<Hsm> {
        let mut state_table: HashMap<StateId, Rc<dyn State>> =
            HashMap::with_capacity(self.states.len());
        for state in &self.states {
            let id = state.id();
            if state_table.insert(id, Rc::clone(state)).is_some() {
                return Err(HsmError::DuplicateStateId(id));
            }
        }

        if !state_table.contains_key(TOP_ID) {
            return Err(HsmError::UnreachableState(TOP_ID));
        }
        if !state_table.contains_key(INITIAL_ID) {
            return Err(HsmError::UnreachableState(INITIAL_ID));
        }

        let mut children: HashMap<StateId, Vec<StateId>> = HashMap::new();
        for state in &self.states {
            if let Some(parent) = state.super_id() {
                children.entry(parent).or_default().push(state.id());
            }
        }

        let mut reachable = HashSet::with_capacity(state_table.len());
        let mut queue = VecDeque::new();
        reachable.insert(TOP_ID);
        queue.push_back(TOP_ID);
        while let Some(id) = queue.pop_front() {
            if let Some(kids) = children.get(id) {
                for &kid in kids {
                    if reachable.insert(kid) {
                        queue.push_back(kid);
                    }
                }
            }
        }
        for &id in state_table.keys() {
            if !reachable.contains(id) {
                return Err(HsmError::UnreachableState(id));
            }
        }

        debug!(
            "hsm built: {} states registered, type_tag={type_tag}",
            state_table.len()
        );
        Ok(Hsm::from_parts(type_tag, state_table))
    }
}

impl Default for HsmBuilder {
    fn default() -> Self {
        Self::new()
    }
}
