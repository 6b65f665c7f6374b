//! State identity and the `State` trait every leaf and composite state
//! implements.
//!
//! A state is identified by a `&'static str` rather than owned by any
//! parent-child tree structure: the engine holds states in a flat
//! `HashMap<StateId, Rc<dyn State>>` arena and looks up `super_id()` to walk
//! the hierarchy, the same flat-registration shape the original runtime's
//! state table uses.

use crate::context::HsmContext;
use crate::event::Event;

/// A cheap, `Copy`/`Hash`/`Eq` handle into the machine's state arena.
///
/// States are expected to be `'static` values (typically string literals),
/// so this is just `&'static str` rather than an owned `String` or an
/// interned index.
pub type StateId = &'static str;

/// The id of the implicit root state every other state is a descendant of.
pub const TOP_ID: StateId = "TOP";

/// The id of the implicit pseudostate a machine starts in before its first
/// `init()` call runs.
pub const INITIAL_ID: StateId = "Initial";

/// A node in the state hierarchy.
///
/// All four hooks default to returning `self.super_id()`, which is the
/// "bubble this up to my superstate" behavior a state with nothing to say
/// about a given event needs — only `handle` is commonly overridden, since
/// `init`/`entry`/`exit` are meaningful to override only for composite
/// states with their own substate or side effects to run on the way in or
/// out.
pub trait State {
    /// This state's id. Must match the key it was registered under.
    fn id(&self) -> StateId;

    /// The id of this state's superstate, or `None` only for `Top`.
    fn super_id(&self) -> Option<StateId>;

    /// Runs when this state is entered as the target of a transition and
    /// must pick a default substate. Call [`HsmContext::q_init`] to do so;
    /// the default implementation does nothing further, which is correct
    /// for a state with no substates.
    fn init(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        let _ = (hsm, event);
        self.super_id()
    }

    /// Runs when a transition enters this state.
    fn entry(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        let _ = (hsm, event);
        self.super_id()
    }

    /// Runs when a transition exits this state.
    fn exit(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        let _ = (hsm, event);
        self.super_id()
    }

    /// Handles a user event dispatched to the machine. Returning
    /// `self.super_id()` (the default) bubbles the event up to the
    /// superstate; returning `None` marks the event as consumed.
    fn handle(&self, hsm: &mut dyn HsmContext, event: &Event) -> Option<StateId> {
        let _ = (hsm, event);
        self.super_id()
    }
}

/// The implicit root of every state hierarchy. Registered automatically by
/// `HsmBuilder`; application code never names it as a transition target.
pub struct TopState;

impl State for TopState {
    fn id(&self) -> StateId {
        TOP_ID
    }

    fn super_id(&self) -> Option<StateId> {
        None
    }

    fn init(&self, _hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        None
    }

    fn entry(&self, _hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        None
    }

    fn exit(&self, _hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        None
    }

    fn handle(&self, _hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        None
    }
}

/// The pseudostate a freshly-built machine starts in. Its only job is to
/// redirect the machine's first `init()` to the application's chosen boot
/// state via [`HsmContext::q_init`].
pub struct InitialState {
    boot_id: StateId,
}

impl InitialState {
    /// `boot_id` is the state the machine should be in after `Hsm::init`
    /// returns.
    pub fn new(boot_id: StateId) -> Self {
        InitialState { boot_id }
    }
}

impl State for InitialState {
    fn id(&self) -> StateId {
        INITIAL_ID
    }

    fn super_id(&self) -> Option<StateId> {
        Some(TOP_ID)
    }

    fn init(&self, hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        hsm.q_init(self.boot_id);
        None
    }

    fn handle(&self, _hsm: &mut dyn HsmContext, _event: &Event) -> Option<StateId> {
        unreachable!("the Initial pseudostate never receives a dispatched event")
    }
}
