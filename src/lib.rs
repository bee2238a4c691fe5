//! Selection-mode engine for chat message lists (selcopy)
//!
//! A host-embeddable layer that lets a user enter a selection session over a
//! chat application's rendered message list, mark a subset of messages, and
//! export the selection as formatted text to the system clipboard.
//!
//! The host owns the message data and the rendered node tree; this crate
//! owns the selection state, the affordance-synchronization projection, the
//! export formatter, and the mode-session lifecycle. Host integration goes
//! through the traits in [`host`] and [`export`], and UI side effects
//! (toasts, counters, sounds) are broadcast as [`state::ModeEvent`]s for the
//! host to render.

pub mod config;
pub mod export;
pub mod format;
pub mod host;
pub mod logging;
pub mod model;
pub mod state;
pub mod sync;

pub use config::{MediaPlacement, ResolvedConfig};
pub use model::{ChannelId, MessageId, MessageRecord};
pub use state::{ModeController, ModeEvent, ModeObserver, SelectionState};
