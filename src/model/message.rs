//! Host-supplied message records.
//!
//! These types mirror the wire shape the host hands over when asked for a
//! channel's messages. The crate never mutates them; they exist to be read
//! by the export formatter. Field names with `serde` renames follow the
//! host JSON exactly (`globalName`, `content_type`, `type`).

use crate::model::{ChannelId, MessageId};
use chrono::{DateTime, Utc};
use serde::Deserialize;

// ===== MessageRecord =====

/// A single chat message as supplied by the host data store.
///
/// Read-only from this crate's perspective. The host may evict records at
/// any time, so a previously observed id can stop resolving; consumers must
/// treat a missing record as "drop silently", not as a failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageRecord {
    /// Stable message identifier, matching the id the surface exposes.
    pub id: MessageId,

    /// Textual content; may be empty for pure-media messages.
    #[serde(default)]
    pub content: String,

    /// Message author.
    pub author: MessageAuthor,

    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Channel the message belongs to.
    pub channel_id: ChannelId,

    /// Uploaded files, in the order the host lists them.
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Link/media embeds, in the order the host lists them.
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

// ===== MessageAuthor =====

/// Author information attached to a message record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageAuthor {
    /// Account handle.
    pub username: String,

    /// Server/global display name, preferred over the handle when present.
    #[serde(default, rename = "globalName")]
    pub global_name: Option<String>,
}

impl MessageAuthor {
    /// Name shown in export headers: global display name if set, else the
    /// account handle.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

// ===== Attachment =====

/// An uploaded file attached to a message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attachment {
    /// Original filename, extension included.
    pub filename: String,

    /// Download URL.
    pub url: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// MIME type as reported by the host, when known.
    #[serde(default)]
    pub content_type: Option<String>,

    /// Pixel width for image/video attachments.
    #[serde(default)]
    pub width: Option<u32>,

    /// Pixel height for image/video attachments.
    #[serde(default)]
    pub height: Option<u32>,
}

// ===== Embed =====

/// A link or media embed attached to a message.
///
/// One embed can contribute several export lines: its image, its video, and
/// its typed URL are independent media sources.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Embed {
    /// Embed kind as reported by the host (e.g. "image", "video", "rich").
    #[serde(rename = "type")]
    pub kind: String,

    /// Canonical URL of the embedded resource.
    #[serde(default)]
    pub url: Option<String>,

    /// Embedded image, when present.
    #[serde(default)]
    pub image: Option<EmbedMedia>,

    /// Embedded video, when present.
    #[serde(default)]
    pub video: Option<EmbedMedia>,
}

/// Media reference inside an embed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbedMedia {
    /// Direct URL of the media.
    pub url: String,
}

// ===== Tests =====
