//! Export formatting (pure).
//!
//! Deterministic functions from `(MessageRecord, ExportConfig)` to export
//! text. No state, no host access: ordering and staleness are resolved by
//! the caller before records arrive here.

use crate::config::{ExportConfig, MediaPlacement};
use crate::model::{Attachment, Embed, MessageRecord};

/// Marker prefixed to media lines in `separate` and `end` placement.
const PIN_MARKER: &str = "\u{1F4CE}"; // 📎

/// Filename extensions that qualify an attachment as media when the host
/// reports no content type.
const MEDIA_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "gif", "webp", "mp4", "mov", "avi", "webm",
];

/// Whether a filename carries a recognized media extension.
fn has_media_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| MEDIA_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
        .unwrap_or(false)
}

/// Whether an attachment qualifies for media extraction.
///
/// Content type wins when present (`image/*` or `video/*`); otherwise the
/// filename extension decides.
fn attachment_qualifies(attachment: &Attachment) -> bool {
    if let Some(content_type) = &attachment.content_type {
        if content_type.starts_with("image/") || content_type.starts_with("video/") {
            return true;
        }
    }
    has_media_extension(&attachment.filename)
}

/// Media lines contributed by one embed, in precedence order.
///
/// An embed with both an image and a qualifying url contributes multiple
/// lines: image first, then video, then the typed url.
fn embed_media_lines(embed: &Embed, out: &mut Vec<String>) {
    if let Some(image) = &embed.image {
        out.push(format!("Image: {}", image.url));
    }
    if let Some(video) = &embed.video {
        out.push(format!("Video: {}", video.url));
    }
    if let (Some(url), "image") = (&embed.url, embed.kind.as_str()) {
        out.push(format!("Embed: {url}"));
    }
}

/// Extract the ordered media lines of a message under the given config.
pub fn extract_media(record: &MessageRecord, config: &ExportConfig) -> Vec<String> {
    let mut lines = Vec::new();

    if config.include_attachments {
        for attachment in &record.attachments {
            if attachment_qualifies(attachment) {
                lines.push(format!("{}: {}", attachment.filename, attachment.url));
            }
        }
    }

    if config.include_embeds {
        for embed in &record.embeds {
            embed_media_lines(embed, &mut lines);
        }
    }

    lines
}

/// Format one message into its export representation.
///
/// Header is `[timestamp] display-name:`; the global display name is
/// preferred over the account handle. Placement of media lines follows
/// `config.media_placement`. Empty content is omitted entirely - no
/// trailing separator space is emitted.
pub fn format_message(record: &MessageRecord, config: &ExportConfig) -> String {
    let timestamp = record.timestamp.format(&config.date_format);
    let header = format!("[{timestamp}] {}:", record.author.display_name());
    let content = record.content.as_str();
    let media = extract_media(record, config);

    let base = if content.is_empty() {
        header.clone()
    } else {
        format!("{header} {content}")
    };

    if media.is_empty() {
        return base;
    }

    match config.media_placement {
        MediaPlacement::Inline => {
            if content.is_empty() {
                format!("{header} {}", media.join(", "))
            } else {
                format!("{base} | Media: {}", media.join(", "))
            }
        }
        MediaPlacement::Separate => {
            let mut result = base;
            for line in &media {
                result.push_str(&format!("\n    {PIN_MARKER} {line}"));
            }
            result
        }
        MediaPlacement::End => {
            format!("{base}\n{PIN_MARKER} Media: {}", media.join(" | "))
        }
    }
}

/// Join already-ordered messages into the final export text.
///
/// Callers hand records in ascending timestamp order (ties broken by the
/// store's enumeration order); this function only formats and joins.
pub fn format_export<'a>(
    records: impl IntoIterator<Item = &'a MessageRecord>,
    config: &ExportConfig,
) -> String {
    records
        .into_iter()
        .map(|record| format_message(record, config))
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== Tests =====
