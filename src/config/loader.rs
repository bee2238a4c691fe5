//! Configuration file loading with precedence handling.

use crate::config::{AnimationSpeed, ExportConfig, MediaPlacement, ResolvedConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, encoding).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/selcopy/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// strftime pattern for export header timestamps.
    #[serde(default)]
    pub date_format: Option<String>,

    /// Include qualifying attachments in exports.
    #[serde(default)]
    pub include_attachments: Option<bool>,

    /// Include qualifying embeds in exports.
    #[serde(default)]
    pub include_embeds: Option<bool>,

    /// Media placement: "inline", "separate", or "end".
    #[serde(default)]
    pub media_placement: Option<MediaPlacement>,

    /// Preview before copying multiple messages.
    #[serde(default)]
    pub show_preview: Option<bool>,

    /// Emit sound cues.
    #[serde(default)]
    pub enable_sounds: Option<bool>,

    /// Animation speed: "fast", "normal", or "slow".
    #[serde(default)]
    pub animation_speed: Option<AnimationSpeed>,

    /// Debounce between a host mutation signal and the rescan, in ms.
    #[serde(default)]
    pub rescan_debounce_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/selcopy/selcopy.log` on Unix-like systems, or
/// the platform equivalent elsewhere. Falls back to the current directory
/// if no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("selcopy").join("selcopy.log")
    } else {
        PathBuf::from("selcopy.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/selcopy/config.toml` on Unix, the platform
/// equivalent elsewhere, or `None` if no config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("selcopy").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use
/// defaults). Returns `Err` if the file exists but cannot be read or
/// parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (host-supplied override)
/// 2. `SELCOPY_CONFIG` environment variable
/// 3. Default path `~/.config/selcopy/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    // 1. Explicit path from the host
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    // 2. SELCOPY_CONFIG environment variable
    if let Ok(env_path) = std::env::var("SELCOPY_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    // 3. Default path
    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise the
/// hardcoded default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        export: ExportConfig {
            date_format: config.date_format.unwrap_or(defaults.export.date_format),
            include_attachments: config
                .include_attachments
                .unwrap_or(defaults.export.include_attachments),
            include_embeds: config
                .include_embeds
                .unwrap_or(defaults.export.include_embeds),
            media_placement: config
                .media_placement
                .unwrap_or(defaults.export.media_placement),
        },
        show_preview: config.show_preview.unwrap_or(defaults.show_preview),
        enable_sounds: config.enable_sounds.unwrap_or(defaults.enable_sounds),
        animation_speed: config.animation_speed.unwrap_or(defaults.animation_speed),
        rescan_debounce: config
            .rescan_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.rescan_debounce),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SELCOPY_DATE_FORMAT`: override the export timestamp pattern
/// - `SELCOPY_MEDIA_PLACEMENT`: "inline", "separate", or "end"
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(fmt) = std::env::var("SELCOPY_DATE_FORMAT") {
        config.export.date_format = fmt;
    }

    if let Ok(placement) = std::env::var("SELCOPY_MEDIA_PLACEMENT") {
        match placement.as_str() {
            "inline" => config.export.media_placement = MediaPlacement::Inline,
            "separate" => config.export.media_placement = MediaPlacement::Separate,
            "end" => config.export.media_placement = MediaPlacement::End,
            other => {
                tracing::warn!(value = other, "Ignoring unknown SELCOPY_MEDIA_PLACEMENT");
            }
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config_file() -> ConfigFile {
        ConfigFile {
            date_format: None,
            include_attachments: None,
            include_embeds: None,
            media_placement: None,
            show_preview: None,
            enable_sounds: None,
            animation_speed: None,
            rescan_debounce_ms: None,
            log_file_path: None,
        }
    }

    #[test]
    fn merge_none_yields_defaults() {
        let resolved = merge_config(None);
        assert_eq!(
            resolved,
            ResolvedConfig::default(),
            "No config file should resolve to pure defaults"
        );
    }

    #[test]
    fn merge_empty_file_yields_defaults() {
        let resolved = merge_config(Some(empty_config_file()));
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = empty_config_file();
        file.date_format = Some("%Y-%m-%d".to_string());
        file.media_placement = Some(MediaPlacement::End);
        file.show_preview = Some(false);
        file.rescan_debounce_ms = Some(120);

        let resolved = merge_config(Some(file));
        assert_eq!(resolved.export.date_format, "%Y-%m-%d");
        assert_eq!(resolved.export.media_placement, MediaPlacement::End);
        assert!(!resolved.show_preview, "File value should override default");
        assert_eq!(resolved.rescan_debounce, Duration::from_millis(120));
    }

    #[test]
    fn parses_full_toml_document() {
        let toml_text = r#"
            date_format = "%H:%M"
            include_attachments = false
            include_embeds = true
            media_placement = "inline"
            show_preview = false
            enable_sounds = false
            animation_speed = "fast"
            rescan_debounce_ms = 75
        "#;

        let file: ConfigFile = toml::from_str(toml_text).expect("valid config toml");
        let resolved = merge_config(Some(file));
        assert_eq!(resolved.export.date_format, "%H:%M");
        assert!(!resolved.export.include_attachments);
        assert_eq!(resolved.export.media_placement, MediaPlacement::Inline);
        assert_eq!(resolved.animation_speed, AnimationSpeed::Fast);
        assert_eq!(resolved.rescan_debounce, Duration::from_millis(75));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_text = "definitely_not_a_setting = true";
        let result: Result<ConfigFile, _> = toml::from_str(toml_text);
        assert!(result.is_err(), "Unknown keys should fail parsing");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let result = load_config_file("/nonexistent/selcopy/config.toml");
        assert!(
            matches!(result, Ok(None)),
            "Missing file should load as Ok(None), got {result:?}"
        );
    }

    #[test]
    fn default_log_path_ends_with_selcopy_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("selcopy.log"),
            "Default log path should end with 'selcopy.log', got: {path:?}"
        );
    }
}
