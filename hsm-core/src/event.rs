//! Event kinds and the `Event` value delivered to state hooks.
//!
//! Kinds 0-4 are reserved by the runtime; everything from `USER` up is free
//! for application signals. The ordering (`Empty, Init, Entry, Exit, User`)
//! and the reserved range match the original `EventType` enumeration this
//! runtime was ported from.

use std::any::Any;
use std::fmt;

/// An event's kind tag. Values below [`EventKind::USER`] are reserved by
/// the runtime; a well-behaved `handle` hook never needs to inspect them
/// directly since [`crate::State::handle`] is only ever invoked for
/// user-defined kinds.
pub type EventKind = u32;

/// Sentinel kind used internally by the trigger funnel to ask a state for
/// its `super` without invoking any hook.
pub const EMPTY: EventKind = 0;
/// Kind passed to [`crate::State::init`].
pub const INIT: EventKind = 1;
/// Kind passed to [`crate::State::entry`].
pub const ENTRY: EventKind = 2;
/// Kind passed to [`crate::State::exit`].
pub const EXIT: EventKind = 3;
/// First kind available to application-defined events.
pub const USER: EventKind = 4;

/// A message delivered to a state machine.
///
/// The payload is opaque to the runtime: it is carried as a type-erased box
/// and recovered with [`Event::payload`]. Canonical `ENTRY`/`EXIT`/`INIT`
/// events constructed via [`Event::entry`]/[`Event::exit`]/[`Event::init`]
/// never carry a payload.
pub struct Event {
    kind: EventKind,
    payload: Option<Box<dyn Any + Send + Sync>>,
}

impl Event {
    /// Builds a user event. Panics if `kind` falls in the reserved range —
    /// user code should never construct an event with a reserved kind.
    pub fn user(kind: EventKind, payload: impl Any + Send + Sync) -> Self {
        assert!(
            kind >= USER,
            "event kind {kind} is reserved by the runtime; user events must use kind >= {USER}"
        );
        Event {
            kind,
            payload: Some(Box::new(payload)),
        }
    }

    /// Builds a user event with no payload.
    pub fn signal(kind: EventKind) -> Self {
        assert!(
            kind >= USER,
            "event kind {kind} is reserved by the runtime; user events must use kind >= {USER}"
        );
        Event {
            kind,
            payload: None,
        }
    }

    /// The canonical `INIT` event used by `q_tran`/`init` unless the caller
    /// supplies their own via `q_tran_on_event`.
    pub fn init() -> Self {
        Event {
            kind: INIT,
            payload: None,
        }
    }

    /// The canonical `ENTRY` event.
    pub fn entry() -> Self {
        Event {
            kind: ENTRY,
            payload: None,
        }
    }

    /// The canonical `EXIT` event.
    pub fn exit() -> Self {
        Event {
            kind: EXIT,
            payload: None,
        }
    }

    /// The sentinel `EMPTY` event the trigger funnel uses to ask a state
    /// for its `super_id()` without running any hook's side effects.
    pub fn empty() -> Self {
        Event {
            kind: EMPTY,
            payload: None,
        }
    }

    /// The event's kind tag.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// `true` for the runtime's own `EMPTY`/`INIT`/`ENTRY`/`EXIT` kinds.
    pub fn is_reserved(&self) -> bool {
        self.kind < USER
    }

    /// Recovers the payload as `&T`, or `None` if there was no payload or
    /// it was built with a different concrete type.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref())
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}
