//! The LCA-based transition search, shared by the cached (`q_tran`) and
//! uncached (`q_tran_dyn`) entry points, plus the action-chain cache those
//! two modes populate and replay.
//!
//! The search itself (`search_and_enter`) runs exactly once per distinct
//! `(source, target)` id pair for the life of the machine when reached via
//! the static path; every later transition between the same two states
//! replays the recorded [`ActionChain`] with no topology walk at all. The
//! dynamic path always runs the search and never consults or populates the
//! cache. Both paths call the same function — the original this runtime is
//! ported from kept two near-identical copies of this search, one per mode,
//! which is exactly the kind of duplication that turns into a silent bug
//! the day someone fixes a case in one copy and not the other.

use hsm_core::{fatal, Event, HsmError, StateId};
use log::{debug, trace};

use crate::hsm::Hsm;

/// One step of a recorded transition: which hook to replay, and on which
/// state. The chain's terminal state is tracked separately on
/// [`ActionChain`] rather than folded into this enum as a sentinel
/// variant — an `Action` can only ever name a real hook to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Exit(StateId),
    Entry(StateId),
    Init(StateId),
}

/// A memoized `exit`/`entry`/`init` sequence for one `(source, target)`
/// pair, plus the state the machine lands in once the sequence finishes.
#[derive(Debug, Clone)]
pub struct ActionChain {
    actions: Vec<Action>,
    final_state: StateId,
}

/// Where to put the actions a search step takes, if anywhere. `None` means
/// the dynamic, uncached path: execute every hook but remember nothing.
type Recorder<'a> = Option<&'a mut Vec<Action>>;

impl Hsm {
    /// Selects `target` as the machine's current state during an `init`
    /// hook. Callable only from within [`hsm_core::State::init`].
    pub fn q_init(&mut self, target_id: StateId) {
        let target = self.lookup_target(target_id);
        self.set_current(target);
    }

    /// Transitions to `target_id` using the canonical `ENTRY`/`INIT`/`EXIT`
    /// events, memoizing the action sequence for the `(source, target)`
    /// pair on first use.
    pub fn q_tran(&mut self, target_id: StateId) {
        let target = self.lookup_target(target_id);
        self.q_tran_on_events(target, &Event::entry(), &Event::init(), &Event::exit());
    }

    /// Transitions to `target_id`, forwarding `event` to every `entry`,
    /// `init`, and `exit` hook visited along the way instead of the
    /// canonical events. A hook reached this way may observe a `kind()`
    /// outside the reserved range and must not assume it is always
    /// `ENTRY`/`INIT`/`EXIT` — use [`Hsm::q_tran`] unless a hook genuinely
    /// needs the triggering event's payload.
    pub fn q_tran_on_event(&mut self, target_id: StateId, event: &Event) {
        let target = self.lookup_target(target_id);
        self.q_tran_on_events(target, event, event, event);
    }

    /// The dynamic, uncached counterpart to [`Hsm::q_tran`]: performs every
    /// side effect while it searches the topology and never touches the
    /// static cache.
    pub fn q_tran_dyn(&mut self, target_id: StateId) {
        let target = self.lookup_target(target_id);
        self.q_tran_dyn_on_events(target, &Event::entry(), &Event::init(), &Event::exit());
    }

    /// The dynamic, uncached counterpart to [`Hsm::q_tran_on_event`].
    pub fn q_tran_dyn_on_event(&mut self, target_id: StateId, event: &Event) {
        let target = self.lookup_target(target_id);
        self.q_tran_dyn_on_events(target, event, event, event);
    }

    fn q_tran_on_events(
        &mut self,
        target: StateId,
        entry_evt: &Event,
        init_evt: &Event,
        exit_evt: &Event,
    ) {
        self.unwind_to_source(exit_evt);

        let key = (self.source(), target);
        match self.static_cache_get(key) {
            Some(chain) => {
                trace!("q_tran: static cache hit {:?} -> {:?}", key.0, key.1);
                self.replay(&chain, entry_evt, init_evt, exit_evt);
            }
            None => {
                debug!("q_tran: populating static cache {:?} -> {:?}", key.0, key.1);
                let mut actions = Vec::new();
                let final_state =
                    self.search_and_enter(target, entry_evt, init_evt, exit_evt, Some(&mut actions));
                self.static_cache_insert(key, ActionChain {
                    actions,
                    final_state,
                });
            }
        }
    }

    fn q_tran_dyn_on_events(
        &mut self,
        target: StateId,
        entry_evt: &Event,
        init_evt: &Event,
        exit_evt: &Event,
    ) {
        self.unwind_to_source(exit_evt);
        self.search_and_enter(target, entry_evt, init_evt, exit_evt, None);
    }

    fn replay(&mut self, chain: &ActionChain, entry_evt: &Event, init_evt: &Event, exit_evt: &Event) {
        for action in &chain.actions {
            match *action {
                Action::Exit(state) => {
                    self.trigger_exit(state, exit_evt);
                }
                Action::Entry(state) => {
                    self.trigger_entry(state, entry_evt);
                }
                Action::Init(state) => {
                    self.trigger_init(state, init_evt);
                }
            }
        }
        self.set_current(chain.final_state);
    }

    /// Exits every state strictly between the live `current` and the
    /// handler that called `q_tran` (`source`). This walk depends on the
    /// live `current`/`source` pair of *this* dispatch, not purely on the
    /// `(source, target)` id pair, so it can never be part of a cached
    /// chain — it always runs, for both the static and dynamic paths.
    fn unwind_to_source(&mut self, exit_evt: &Event) {
        let mut s = self.current();
        while s != self.source() {
            s = match self.trigger_exit(s, exit_evt) {
                Some(next) => next,
                None => self.super_id_of(s).unwrap_or_else(|| {
                    fatal(HsmError::NoCommonAncestor {
                        source: self.source(),
                        target: s,
                    })
                }),
            };
        }
    }

    /// The seven-case least-common-ancestor search, followed by entering
    /// the recorded path and descending through `target`'s own initial
    /// transitions. Returns the state the machine ends up in.
    ///
    /// `record` is `Some` on the static path's first run for a pair (build
    /// the chain while executing it) and `None` on the dynamic path
    /// (execute only). Every other behavior is identical between the two,
    /// which is the point: one search, parameterized over whether it also
    /// remembers what it did.
    fn search_and_enter(
        &mut self,
        target: StateId,
        entry_evt: &Event,
        init_evt: &Event,
        exit_evt: &Event,
        mut record: Recorder<'_>,
    ) -> StateId {
        let source = self.source();
        let mut state_chain: Vec<StateId> = vec![target];
        let p = self.super_id_of(target);

        'lca: {
            // (a) self-transition
            if source == target {
                self.record_exit(&mut record, source, exit_evt);
                break 'lca;
            }
            // (b) source is target's immediate super (parent-to-child)
            if Some(source) == p {
                break 'lca;
            }
            let q = self.super_id_of(source);
            // (c) siblings: source and target share a super
            if q == p {
                self.record_exit(&mut record, source, exit_evt);
                break 'lca;
            }
            // (d) child-to-parent: source's super is target itself
            if q == Some(target) {
                self.record_exit(&mut record, source, exit_evt);
                state_chain.pop(); // target is the LCA; do not re-enter it
                break 'lca;
            }
            // (e) source is some further ancestor of target
            if let Some(p) = p {
                state_chain.push(p);
                let mut s = self.super_id_of(p);
                let mut found = false;
                while let Some(cur) = s {
                    if source == cur {
                        found = true;
                        break;
                    }
                    state_chain.push(cur);
                    s = self.super_id_of(cur);
                }
                if found {
                    break 'lca;
                }
            }

            self.record_exit(&mut record, source, exit_evt);

            // (f) the LCA is somewhere in source's own ancestor chain,
            // already collected while walking up from target in case (e)
            if let Some(idx) = q.and_then(|q_id| state_chain.iter().rposition(|&x| x == q_id)) {
                state_chain.truncate(idx);
                break 'lca;
            }

            // (g) walk up from source's super, exiting each ancestor,
            // until one of them matches a state already on the chain
            let mut s = q;
            loop {
                let cur = s.unwrap_or_else(|| fatal(HsmError::NoCommonAncestor { source, target }));
                if let Some(idx) = state_chain.iter().rposition(|&x| x == cur) {
                    state_chain.truncate(idx);
                    break 'lca;
                }
                self.record_exit(&mut record, cur, exit_evt);
                s = self.super_id_of(cur);
            }
        }

        for &s in state_chain.iter().rev() {
            self.record_entry(&mut record, s, entry_evt);
        }

        self.set_current(target);
        let mut target = target;
        while self.trigger_init(target, init_evt).is_none() {
            self.assert_one_level_descent(target, self.current());
            if let Some(actions) = record.as_deref_mut() {
                actions.push(Action::Init(target));
            }
            target = self.current();
            self.record_entry(&mut record, target, entry_evt);
        }
        self.set_current(target);
        target
    }

    /// Runs `state`'s exit hook and, only if it reports the exit as
    /// handled (returns `None`), appends the step to `record`. A hook that
    /// declines by returning its own `super_id` contributes nothing to the
    /// replay — it is transparent to this transition.
    fn record_exit(&mut self, record: &mut Recorder<'_>, state: StateId, event: &Event) {
        if self.trigger_exit(state, event).is_none() {
            if let Some(actions) = record.as_deref_mut() {
                actions.push(Action::Exit(state));
            }
        }
    }

    fn record_entry(&mut self, record: &mut Recorder<'_>, state: StateId, event: &Event) {
        if self.trigger_entry(state, event).is_none() {
            if let Some(actions) = record.as_deref_mut() {
                actions.push(Action::Entry(state));
            }
        }
    }
}
