//! Host-rendered message surface.
//!
//! The surface is the live node tree the host renders for a channel. It is
//! shared mutable state owned by someone else: nodes appear, vanish, and
//! reappear (same id, new node) whenever the host re-renders, virtualizes,
//! or scrolls. Every operation here is therefore fallible-by-absence and
//! reports whether the node still existed, so callers can re-validate
//! instead of trusting a previous scan.

use crate::model::MessageId;

/// A rendered message node as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceNode {
    /// Stable identifier the host assigned to the node.
    pub id: MessageId,

    /// Host classification: system notice, divider, welcome banner - any
    /// node that must never receive a selection affordance.
    pub system: bool,
}

impl SurfaceNode {
    /// Convenience constructor for an ordinary selectable message node.
    pub fn message(id: MessageId) -> Self {
        Self { id, system: false }
    }

    /// Convenience constructor for a non-selectable system node.
    pub fn system_notice(id: MessageId) -> Self {
        Self { id, system: true }
    }
}

/// The host's rendered message list, with affordance painting hooks.
///
/// Attach/check/detach operations return `false` when the target node no
/// longer exists; the synchronizer uses that as its staleness signal. The
/// affordance *checked* state painted through this trait is always derived
/// from the selection engine - implementations must not make it clickable
/// state of its own.
pub trait MessageSurface {
    /// Whether the host message container is present at all.
    ///
    /// `false` aborts session entry; nothing is decorated.
    fn is_attached(&self) -> bool;

    /// Currently rendered message nodes, in render order.
    fn visible_messages(&self) -> Vec<SurfaceNode>;

    /// Whether the node already carries a selection affordance.
    ///
    /// This is the synchronizer's sole idempotency check, asked of the
    /// surface itself: a node destroyed and recreated under the same id
    /// answers `false` and gets a fresh affordance.
    fn has_marker(&self, id: &MessageId) -> bool;

    /// Attach a selection affordance to the node.
    ///
    /// Returns `false` if the node vanished before the marker could be
    /// attached.
    fn attach_marker(&mut self, id: &MessageId) -> bool;

    /// Paint the affordance's checked state.
    ///
    /// Returns `false` if the node or its marker no longer exists.
    fn set_marker_checked(&mut self, id: &MessageId, checked: bool) -> bool;

    /// Remove the affordance from the node, if both still exist.
    fn detach_marker(&mut self, id: &MessageId);

    /// Strip any visual classes or style overrides the selection session
    /// added to the node, if it still exists.
    fn clear_decorations(&mut self, id: &MessageId);
}
