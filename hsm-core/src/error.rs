//! Fatal conditions for a malformed HSM or misused API.
//!
//! Every variant here corresponds to one of the enumerated fatal conditions
//! in the runtime's error handling design: a duplicate or unreachable state
//! id at build time, an out-of-range transition target, a broken
//! "initial transitions descend exactly one level" invariant, or a state
//! hierarchy whose transition search cannot find a common ancestor. None of
//! these are meant to be caught and handled by a well-behaved caller — they
//! are programmer errors, and `hsm-engine`'s public API converts them into
//! panics at the boundary. They are kept as an ordinary `Result`-producing
//! enum internally so the validation and search code stays unit-testable.

use crate::StateId;

/// Errors describing a malformed hierarchical state machine or invalid
/// transition/lookup request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HsmError {
    /// Two states were registered with the same id.
    #[error("duplicate state id {0:?} registered with the HSM builder")]
    DuplicateStateId(StateId),

    /// A state was registered but its `super` chain never reaches `Top`.
    #[error("state {0:?} is registered but not reachable from the Top state")]
    UnreachableState(StateId),

    /// `"TOP"` was used as a transition or `q_init` target.
    #[error("\"{0}\" is the root state and cannot be used as a transition target")]
    TopIsNotATarget(StateId),

    /// A transition or lookup named an id that was never registered.
    #[error("unknown state id {0:?}")]
    UnknownStateId(StateId),

    /// An `init` hook caused `current` to land more than one level below
    /// the state whose `init` was invoked.
    #[error(
        "initial transition landed on {descendant:?}, which is not exactly one level below {ancestor:?}"
    )]
    NonOneLevelInitialDescent {
        ancestor: StateId,
        descendant: StateId,
    },

    /// The 7-case LCA search exhausted the tree without finding a common
    /// ancestor of `source` and `target`.
    #[error("no common ancestor between {source:?} and {target:?}; the state hierarchy is malformed")]
    NoCommonAncestor { source: StateId, target: StateId },
}

/// Result type used by the internal, testable helpers that `HsmError`
/// models errors for.
pub type HsmResult<T> = Result<T, HsmError>;

/// Converts an internal `Result` into the panic the public API contract
/// promises for every fatal condition.
#[inline]
pub fn unwrap_fatal<T>(result: HsmResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fatal(err),
    }
}

#[cold]
#[inline(never)]
pub fn fatal(err: HsmError) -> ! {
    panic!("{err}")
}
