//! The authoritative selection set.
//!
//! Pure data with guarded transitions, testable without any host. Every
//! UI affordance mutates selection through these methods (via the mode
//! controller), so the toolbar counter and the affordance layer can never
//! disagree about what is selected.
//!
//! Invariants, held by construction:
//! - `selected` is non-empty only while the mode is active.
//! - Entering always starts from an empty set; exiting always clears it.
//! - The channel is set exactly once per session and cleared on exit.
//! - Every mutator is a silent no-op while inactive.
//!
//! Operations return their delta (what changed, how many); the single
//! caller broadcasts one observer notification per operation, which is
//! what gives batch operations batch notification semantics.

use crate::host::SurfaceNode;
use crate::model::{ChannelId, EnterError, MessageId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

/// Selection-session state: mode flag, channel, and the selected set.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    active: bool,
    channel: Option<ChannelId>,
    selected: HashSet<MessageId>,
}

impl SelectionState {
    /// Create an inactive state with an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a selection session is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Channel of the active session, `None` while inactive.
    pub fn channel(&self) -> Option<&ChannelId> {
        self.channel.as_ref()
    }

    /// Current selection size.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether an id is currently selected.
    pub fn is_selected(&self, id: &MessageId) -> bool {
        self.selected.contains(id)
    }

    /// Start a session for `channel` with an empty selection.
    ///
    /// # Errors
    ///
    /// Rejects nested sessions with [`EnterError::AlreadyActive`]; the
    /// existing session is left untouched.
    pub fn enter(&mut self, channel: ChannelId) -> Result<(), EnterError> {
        if self.active {
            return Err(EnterError::AlreadyActive);
        }
        self.active = true;
        self.channel = Some(channel);
        self.selected.clear();
        Ok(())
    }

    /// End the session, clearing the selection and channel.
    ///
    /// Returns whether a session was actually active; exiting while
    /// inactive is a no-op.
    pub fn exit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.channel = None;
        self.selected.clear();
        true
    }

    /// Flip membership of one id.
    ///
    /// Returns the id's new membership, or `None` if no session is active
    /// (out-of-mode toggles are silently ignored).
    pub fn toggle(&mut self, id: &MessageId) -> Option<bool> {
        if !self.active {
            return None;
        }
        if self.selected.remove(id) {
            Some(false)
        } else {
            self.selected.insert(id.clone());
            Some(true)
        }
    }

    /// Select every non-system candidate; returns how many ids were newly
    /// added. No-op (returning 0) while inactive.
    pub fn select_all(&mut self, candidates: &[SurfaceNode]) -> usize {
        if !self.active {
            return 0;
        }
        let mut added = 0;
        for node in candidates {
            if node.system {
                continue;
            }
            if self.selected.insert(node.id.clone()) {
                added += 1;
            }
        }
        added
    }

    /// Empty the selection; returns the prior size. No-op while inactive.
    pub fn clear(&mut self) -> usize {
        if !self.active {
            return 0;
        }
        let removed = self.selected.len();
        self.selected.clear();
        removed
    }

    /// Flip membership of every non-system candidate; returns how many
    /// ids were flipped. No-op (returning 0) while inactive.
    pub fn invert(&mut self, candidates: &[SurfaceNode]) -> usize {
        if !self.active {
            return 0;
        }
        let mut flipped = 0;
        for node in candidates {
            if node.system {
                continue;
            }
            if !self.selected.remove(&node.id) {
                self.selected.insert(node.id.clone());
            }
            flipped += 1;
        }
        flipped
    }

    /// Selected ids in ascending timestamp order.
    ///
    /// `ordered_candidates` supplies the tie-break enumeration order (the
    /// store's message order); the sort is stable, so equal timestamps
    /// keep that relative order. Selected ids missing from the
    /// enumeration, or whose timestamp lookup fails, were evicted by the
    /// host and are dropped silently.
    pub fn snapshot_ordered_by<F>(
        &self,
        ordered_candidates: &[MessageId],
        timestamp_of: F,
    ) -> Vec<MessageId>
    where
        F: Fn(&MessageId) -> Option<DateTime<Utc>>,
    {
        let mut keyed: Vec<(DateTime<Utc>, MessageId)> = ordered_candidates
            .iter()
            .filter(|id| self.selected.contains(*id))
            .filter_map(|id| timestamp_of(id).map(|ts| (ts, id.clone())))
            .collect();

        if keyed.len() < self.selected.len() {
            debug!(
                selected = self.selected.len(),
                resolvable = keyed.len(),
                "Dropping stale ids from export snapshot"
            );
        }

        keyed.sort_by_key(|(ts, _)| *ts);
        keyed.into_iter().map(|(_, id)| id).collect()
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mid(raw: &str) -> MessageId {
        MessageId::new(raw).expect("valid id")
    }

    fn channel() -> ChannelId {
        ChannelId::new("C1").expect("valid channel")
    }

    fn active() -> SelectionState {
        let mut state = SelectionState::new();
        state.enter(channel()).expect("fresh state enters cleanly");
        state
    }

    fn messages(ids: &[&str]) -> Vec<SurfaceNode> {
        ids.iter().map(|raw| SurfaceNode::message(mid(raw))).collect()
    }

    // ===== Mode transitions =====

    #[test]
    fn enter_starts_with_empty_selection() {
        let state = active();
        assert!(state.is_active());
        assert_eq!(state.selected_count(), 0, "Entering must start empty");
        assert_eq!(state.channel(), Some(&channel()));
    }

    #[test]
    fn nested_enter_is_rejected_and_preserves_session() {
        let mut state = active();
        state.toggle(&mid("m1"));

        let second = ChannelId::new("C2").expect("valid channel");
        let result = state.enter(second);

        assert!(matches!(result, Err(EnterError::AlreadyActive)));
        assert_eq!(state.channel(), Some(&channel()), "Channel is immutable per session");
        assert_eq!(state.selected_count(), 1, "Selection survives the rejected enter");
    }

    #[test]
    fn exit_clears_everything() {
        let mut state = active();
        state.toggle(&mid("m1"));
        state.toggle(&mid("m2"));

        assert!(state.exit(), "Exit from active reports true");
        assert!(!state.is_active());
        assert_eq!(state.selected_count(), 0, "Exit must clear the selection");
        assert_eq!(state.channel(), None);
    }

    #[test]
    fn exit_while_inactive_is_a_no_op() {
        let mut state = SelectionState::new();
        assert!(!state.exit(), "Exit from inactive reports false");
    }

    #[test]
    fn reenter_after_exit_starts_fresh() {
        let mut state = active();
        state.toggle(&mid("m1"));
        state.exit();

        state.enter(channel()).expect("enter after exit succeeds");
        assert_eq!(state.selected_count(), 0, "New session starts empty");
    }

    // ===== Toggle =====

    #[test]
    fn toggle_twice_restores_membership() {
        let mut state = active();
        assert_eq!(state.toggle(&mid("m1")), Some(true));
        assert_eq!(state.toggle(&mid("m1")), Some(false));
        assert!(!state.is_selected(&mid("m1")));
    }

    #[test]
    fn toggle_while_inactive_is_ignored() {
        let mut state = SelectionState::new();
        assert_eq!(state.toggle(&mid("m1")), None);
        assert_eq!(state.selected_count(), 0);
    }

    // ===== Batch operations =====

    #[test]
    fn select_all_skips_system_nodes() {
        let mut state = active();
        let mut candidates = messages(&["m1", "m2", "m3", "m4", "m5"]);
        candidates.push(SurfaceNode::system_notice(mid("sys1")));
        candidates.push(SurfaceNode::system_notice(mid("sys2")));

        let added = state.select_all(&candidates);

        assert_eq!(added, 5, "Only eligible nodes are selected");
        assert_eq!(state.selected_count(), 5);
        assert!(!state.is_selected(&mid("sys1")));
    }

    #[test]
    fn select_all_counts_only_new_ids() {
        let mut state = active();
        state.toggle(&mid("m1"));
        let added = state.select_all(&messages(&["m1", "m2"]));
        assert_eq!(added, 1, "Already-selected ids do not inflate the count");
        assert_eq!(state.selected_count(), 2);
    }

    #[test]
    fn clear_returns_prior_count() {
        let mut state = active();
        state.select_all(&messages(&["m1", "m2", "m3"]));
        assert_eq!(state.clear(), 3);
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn invert_flips_every_eligible_candidate() {
        let mut state = active();
        state.toggle(&mid("m1"));
        let mut candidates = messages(&["m1", "m2"]);
        candidates.push(SurfaceNode::system_notice(mid("sys1")));

        let flipped = state.invert(&candidates);

        assert_eq!(flipped, 2, "System nodes are not flipped");
        assert!(!state.is_selected(&mid("m1")));
        assert!(state.is_selected(&mid("m2")));
    }

    #[test]
    fn select_all_then_invert_empties_the_selection() {
        let mut state = active();
        let candidates = messages(&["m1", "m2", "m3"]);
        state.select_all(&candidates);
        state.invert(&candidates);
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn batch_operations_while_inactive_are_ignored() {
        let mut state = SelectionState::new();
        let candidates = messages(&["m1", "m2"]);
        assert_eq!(state.select_all(&candidates), 0);
        assert_eq!(state.invert(&candidates), 0);
        assert_eq!(state.clear(), 0);
    }

    // ===== Ordered snapshot =====

    #[test]
    fn snapshot_sorts_ascending_by_timestamp() {
        let mut state = active();
        let candidates = [mid("late"), mid("early")];
        state.toggle(&mid("late"));
        state.toggle(&mid("early"));

        let ts = |id: &MessageId| {
            let hour = if id.as_str() == "early" { 9 } else { 17 };
            Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).single()
        };

        let snapshot = state.snapshot_ordered_by(&candidates, ts);
        assert_eq!(snapshot, vec![mid("early"), mid("late")]);
    }

    #[test]
    fn snapshot_ties_keep_candidate_order() {
        let mut state = active();
        let candidates = [mid("a"), mid("b"), mid("c")];
        for id in &candidates {
            state.toggle(id);
        }

        let same_ts = |_: &MessageId| Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single();
        let snapshot = state.snapshot_ordered_by(&candidates, same_ts);

        assert_eq!(
            snapshot,
            vec![mid("a"), mid("b"), mid("c")],
            "Stable sort must preserve enumeration order on ties"
        );
    }

    #[test]
    fn snapshot_drops_ids_with_failed_lookup() {
        let mut state = active();
        let candidates = [mid("kept"), mid("stale")];
        state.toggle(&mid("kept"));
        state.toggle(&mid("stale"));

        let ts = |id: &MessageId| {
            (id.as_str() == "kept").then(|| Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        };

        let snapshot = state.snapshot_ordered_by(&candidates, ts);
        assert_eq!(snapshot, vec![mid("kept")], "Failed lookups drop silently");
    }

    #[test]
    fn snapshot_drops_ids_missing_from_enumeration() {
        let mut state = active();
        state.toggle(&mid("evicted"));
        state.toggle(&mid("present"));

        let candidates = [mid("present")];
        let ts = |_: &MessageId| Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single();

        let snapshot = state.snapshot_ordered_by(&candidates, ts);
        assert_eq!(snapshot, vec![mid("present")]);
    }

    #[test]
    fn snapshot_ignores_unselected_candidates() {
        let mut state = active();
        state.toggle(&mid("chosen"));

        let candidates = [mid("chosen"), mid("ignored")];
        let ts = |_: &MessageId| Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single();

        let snapshot = state.snapshot_ordered_by(&candidates, ts);
        assert_eq!(snapshot, vec![mid("chosen")]);
    }
}
