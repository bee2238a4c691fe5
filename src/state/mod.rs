//! Selection state machine (pure core) and mode orchestration.
//!
//! [`SelectionState`] is the authoritative selection set with its
//! invariants; every mutation funnels through it. [`ModeController`] is
//! the impure shell around it: it wires the host seams, broadcasts
//! [`ModeEvent`]s to observers, and drives debounced rescans and pending
//! clipboard writes from its `tick`.

pub mod controller;
pub mod observer;
pub mod selection;

// Re-export for convenience
pub use controller::{ExportStart, ModeController};
pub use observer::{ModeEvent, ModeObserver, SelectionDelta, Severity, SoundCue};
pub use selection::SelectionState;
