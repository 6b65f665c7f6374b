#![forbid(unsafe_code)]

//! # hsm-engine
//!
//! Dispatch loop, transition search, and static-transition cache for the
//! hierarchical state machine runtime. Builds on the vocabulary in
//! [`hsm_core`] (events, the `State` trait, `HsmContext`) with the concrete
//! machine that owns a state arena and runs it.
//!
//! ## Module overview
//! - [`builder`] – `HsmBuilder`, the only way to construct an [`Hsm`].
//! - [`hsm`] – the `Hsm` struct: dispatch, `init`, `is_in`, `q_init`.
//! - [`trigger`] – the single function that routes an event kind to a
//!   state's hook.
//! - [`transition`] – the LCA-based transition search shared by the static
//!   and dynamic `q_tran` variants, and the action-chain cache.

mod builder;
mod hsm;
mod transition;
mod trigger;

pub use builder::HsmBuilder;
pub use hsm::{Hsm, TypeTag};
pub use transition::{Action, ActionChain};

pub use hsm_core::{
    fatal, unwrap_fatal, Event, EventKind, HsmContext, HsmError, HsmResult, InitialState, State,
    StateId, TopState, EMPTY, ENTRY, EXIT, INIT, INITIAL_ID, TOP_ID, USER,
};

#[cfg(test)]
mod tests;
