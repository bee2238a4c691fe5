//! Error taxonomy for selection sessions and export.
//!
//! Structured errors via `thiserror`, composing with `?` and `From`. The
//! split follows the recovery policy, not the call graph:
//!
//! - [`EnterError`] - the only failures that can abort starting a session.
//! - [`ExportError`] - failures of a single export action; the session
//!   stays active and the selection is preserved so the user can retry.
//! - [`ClipboardError`] - what went wrong inside one clipboard path.
//!
//! Deliberately absent: out-of-mode mutation attempts (silent no-ops, never
//! surfaced) and stale message lookups at export time (silently dropped
//! from the export, logged at debug level).

use thiserror::Error;

/// Failure to start a selection session.
///
/// Both variants leave the host surface completely untouched: no markers
/// attached, no shortcuts installed, no state created.
#[derive(Debug, Error)]
pub enum EnterError {
    /// A session is already active; nested sessions are rejected.
    ///
    /// Logged and ignored by callers - the user-visible effect is a no-op,
    /// not an error dialog.
    #[error("Selection mode is already active")]
    AlreadyActive,

    /// The host message surface is missing or not attached.
    ///
    /// The one unrecoverable initialization failure: without a message
    /// container to decorate, entry is aborted entirely.
    #[error("Host message surface is unavailable")]
    HostUnavailable,
}

/// Failure of a single export action.
///
/// Terminal for the triggering action only. The session survives every
/// variant so the user can adjust and retry.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export requested with zero selected messages.
    ///
    /// Surfaced as a user-visible warning notification.
    #[error("No messages selected")]
    EmptySelection,

    /// Every clipboard path failed.
    ///
    /// Surfaced as a user-visible error notification; the selection is
    /// preserved for retry.
    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// Failure inside one clipboard write path.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened at all.
    #[error("Clipboard is unavailable: {0}")]
    Unavailable(String),

    /// The write itself failed after the clipboard opened.
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),

    /// No fallback clipboard utility exists on this system.
    ///
    /// The fallback path pipes text to an external utility; this variant
    /// means none of the known utilities could be spawned.
    #[error("No clipboard utility available for fallback copy")]
    NoFallbackUtility,

    /// The primary path's worker disappeared without reporting an outcome.
    #[error("Clipboard write was abandoned before completing")]
    Abandoned,
}
