//! Observer events broadcast on every state change.
//!
//! UI affordances (toolbar, counter, toasts, sounds, hints) are host
//! presentation; this crate only tells them what happened. Observers are
//! called synchronously on the control thread, once per engine operation -
//! batch operations produce a single `SelectionChanged`, never one event
//! per id.

use crate::model::{ChannelId, MessageId};

/// Receiver of mode and selection broadcasts.
///
/// Observers must read any further state they need on demand rather than
/// caching it from events: the event tells them *that* something changed
/// and the delta, the controller remains the source of truth.
pub trait ModeObserver {
    /// Handle one broadcast event.
    fn on_event(&mut self, event: &ModeEvent);
}

/// What a single engine operation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDelta {
    /// One id flipped.
    Toggled {
        /// The id whose membership changed.
        id: MessageId,
        /// Whether the id is now selected.
        selected: bool,
    },
    /// Batch select over the visible eligible nodes.
    SelectedAll {
        /// Ids newly added to the selection.
        added: usize,
    },
    /// Selection emptied.
    Cleared {
        /// Ids removed.
        removed: usize,
    },
    /// Batch membership flip over the visible eligible nodes.
    Inverted {
        /// Ids flipped.
        flipped: usize,
    },
}

/// Notification severity for host toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Completed action.
    Success,
    /// Recoverable problem (e.g. empty selection).
    Warning,
    /// Failed action (e.g. clipboard failure).
    Error,
}

/// Sound cue for hosts with audio feedback; suppressed entirely when
/// sounds are disabled in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A message was selected.
    Select,
    /// A message was deselected.
    Deselect,
    /// Export reached the clipboard.
    Copy,
    /// Something failed.
    Error,
    /// Selection mode started.
    Enter,
    /// Selection mode ended.
    Exit,
}

/// Broadcast on every state change and user-visible outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeEvent {
    /// Selection mode started for a channel; selection is empty.
    Entered {
        /// Channel the session applies to.
        channel: ChannelId,
    },
    /// Selection mode ended; selection was cleared.
    Exited,
    /// The selection set changed.
    SelectionChanged {
        /// What the operation did.
        delta: SelectionDelta,
        /// Selection size after the operation.
        count: usize,
    },
    /// A toast for the user.
    Notified {
        /// How to style it.
        severity: Severity,
        /// Human-readable text.
        text: String,
    },
    /// An audio cue.
    Sound(SoundCue),
    /// Export wants confirmation before copying.
    PreviewRequested {
        /// The exact text that will be copied on confirmation.
        text: String,
        /// Selected message count.
        count: usize,
    },
    /// Export reached the clipboard.
    Copied {
        /// Messages copied.
        count: usize,
    },
}
