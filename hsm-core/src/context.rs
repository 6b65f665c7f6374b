//! The abstract interface a state's hooks see.
//!
//! `State` hooks cannot take a concrete `&mut Hsm` (the concrete machine
//! lives in `hsm-engine`, which depends on this crate — not the other way
//! around). Instead they take `&mut dyn HsmContext`: a small trait object
//! interface a hook calls `q_tran`/`q_init` on, implemented by the concrete
//! machine in the engine crate.

use crate::{Event, StateId};

/// Operations a state's hooks may perform on the machine that invoked them.
pub trait HsmContext {
    /// Selects the default substate during an `init` hook. Must only be
    /// called from within [`crate::State::init`].
    fn q_init(&mut self, target: StateId);

    /// Statically transitions to `target`, using the canonical
    /// `ENTRY`/`INIT`/`EXIT` events. Memoizes the action sequence for reuse.
    fn q_tran(&mut self, target: StateId);

    /// Statically transitions to `target`, forwarding `event` to the
    /// `entry`/`init`/`exit` hooks visited along the way instead of the
    /// canonical events. A hook reached this way may observe
    /// `event.kind()` outside the reserved range — see
    /// [`crate::State::handle`]'s documentation on the coupling this
    /// implies.
    fn q_tran_on_event(&mut self, target: StateId, event: &Event);

    /// Transitions to `target` without consulting or populating the
    /// static-transition cache.
    fn q_tran_dyn(&mut self, target: StateId);

    /// The dynamic, uncached counterpart to [`HsmContext::q_tran_on_event`].
    fn q_tran_dyn_on_event(&mut self, target: StateId, event: &Event);

    /// The id of the machine's current (most concrete) state.
    fn current_state_id(&self) -> StateId;

    /// Whether `target` is the current state or one of its ancestors.
    fn is_in(&self, target: StateId) -> bool;
}
