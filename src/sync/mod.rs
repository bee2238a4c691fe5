//! Surface synchronization (derived affordance projection).
//!
//! Keeps the host's visual selection affordances consistent with the
//! authoritative selection set while the host re-renders its list out from
//! under us. The projection here is never the source of truth: checked
//! state is re-derived from the engine on every repaint, and the only
//! idempotency check for attaching is asking the surface itself whether a
//! marker is already present.

pub mod debounce;

pub use debounce::RescanTimer;

use crate::host::MessageSurface;
use crate::model::MessageId;
use crate::state::SelectionState;
use std::collections::HashSet;
use tracing::debug;

/// Synchronizes selection affordances with the host's live node tree.
///
/// Owns only derived bookkeeping: the set of ids this session has
/// decorated, used to bound teardown and drive repaints. Host nodes can
/// vanish at any moment, including mid-pass, so every surface call's
/// return value is re-validated rather than trusted.
#[derive(Debug, Default)]
pub struct SurfaceSynchronizer {
    /// Ids decorated during this session. Superset of what still exists.
    attached: HashSet<MessageId>,
}

impl SurfaceSynchronizer {
    /// Create an empty synchronizer for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids currently tracked as decorated.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Attach affordances to eligible nodes that lack one.
    ///
    /// Eligible means: enumerated by the surface and not a system notice.
    /// The surface's own "has marker" answer is the sole idempotency
    /// check, so a node destroyed and recreated under the same id between
    /// mutation signal and rescan gets a fresh affordance, and redundant
    /// scans are safe no-ops. Freshly attached markers are painted from
    /// the current selection immediately.
    pub fn scan(&mut self, surface: &mut dyn MessageSurface, state: &SelectionState) {
        for node in surface.visible_messages() {
            if node.system {
                continue;
            }
            if surface.has_marker(&node.id) {
                // Already decorated; remember it in case we never saw it.
                self.attached.insert(node.id);
                continue;
            }
            if !surface.attach_marker(&node.id) {
                // Node vanished between enumeration and attach.
                debug!(id = %node.id, "Node disappeared during affordance scan");
                continue;
            }
            surface.set_marker_checked(&node.id, state.is_selected(&node.id));
            self.attached.insert(node.id);
        }
    }

    /// Re-derive every attached marker's checked state from `state`.
    ///
    /// Runs after every engine mutation; visual state is never trusted
    /// across mutations. Ids whose nodes vanished are pruned from the
    /// bookkeeping.
    pub fn repaint(&mut self, surface: &mut dyn MessageSurface, state: &SelectionState) {
        self.attached
            .retain(|id| surface.set_marker_checked(id, state.is_selected(id)));
    }

    /// Tear down every affordance and decoration this session added.
    ///
    /// One bounded pass over the decorated set, regardless of how many
    /// nodes accumulated; nodes the host already destroyed are skipped by
    /// the surface itself.
    pub fn detach_all(&mut self, surface: &mut dyn MessageSurface) {
        for id in self.attached.drain() {
            surface.detach_marker(&id);
            surface.clear_decorations(&id);
        }
    }
}

// ===== Tests =====
