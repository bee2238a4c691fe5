//! Configuration module.
//!
//! Read-only settings supplied to the engine: export formatting options,
//! preview/sound toggles, and the rescan debounce. Loading and precedence
//! live in [`loader`]; keyboard bindings in [`keybindings`].

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{default_config_path, load_config_with_precedence, ConfigError, ConfigFile};

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ===== MediaPlacement =====

/// Where extracted media lines go in a formatted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPlacement {
    /// Appended to the content line: `... | Media: a, b`.
    Inline,
    /// One indented, pin-marked line per media item.
    Separate,
    /// A single pin-marked `Media: a | b` line after the content.
    End,
}

impl Default for MediaPlacement {
    fn default() -> Self {
        MediaPlacement::Separate
    }
}

// ===== AnimationSpeed =====

/// Cosmetic animation speed hint, passed through to the host untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    /// Snappy transitions.
    Fast,
    /// Host default.
    Normal,
    /// Slow transitions.
    Slow,
}

impl Default for AnimationSpeed {
    fn default() -> Self {
        AnimationSpeed::Normal
    }
}

// ===== ExportConfig =====

/// Options the export formatter consumes.
///
/// Pure data; the formatter is deterministic given a record and this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// strftime pattern for the header timestamp.
    pub date_format: String,

    /// Include qualifying attachments in the export.
    pub include_attachments: bool,

    /// Include qualifying embeds in the export.
    pub include_embeds: bool,

    /// Where media lines are placed relative to the content.
    pub media_placement: MediaPlacement,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: "%d.%m.%Y, %H:%M:%S".to_string(),
            include_attachments: true,
            include_embeds: true,
            media_placement: MediaPlacement::default(),
        }
    }
}

// ===== ResolvedConfig =====

/// Fully resolved configuration after applying precedence rules.
///
/// Created by merging defaults, the config file, and environment
/// overrides. See [`loader`] for the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Export formatting options.
    pub export: ExportConfig,

    /// Show a preview for confirmation before copying more than one
    /// message. Single-message exports never preview.
    pub show_preview: bool,

    /// Emit sound cues for interactions.
    pub enable_sounds: bool,

    /// Cosmetic animation speed hint for the host.
    pub animation_speed: AnimationSpeed,

    /// Delay between a host mutation signal and the affordance rescan,
    /// letting the host finish its render batch first.
    pub rescan_debounce: Duration,

    /// Path to the tracing log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            show_preview: true,
            enable_sounds: true,
            animation_speed: AnimationSpeed::default(),
            rescan_debounce: Duration::from_millis(50),
            log_file_path: loader::default_log_path(),
        }
    }
}
