//! Domain model types (pure).
//!
//! Identifier newtypes, host-supplied message records, the error taxonomy,
//! and domain-level keyboard actions. All types here are pure data.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod message;

// Re-export for convenience
pub use error::{ClipboardError, EnterError, ExportError};
pub use identifiers::{ChannelId, InvalidChannelId, InvalidMessageId, MessageId};
pub use key_action::KeyAction;
pub use message::{Attachment, Embed, EmbedMedia, MessageAuthor, MessageRecord};
