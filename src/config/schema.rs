use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tagreview/config.toml` or `~/.config/tagreview/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags (`--server`)
/// 2) Environment variables (prefix `TAGREVIEW__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub review: ReviewSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL of the import web server, without the `/api` suffix.
    pub base_url: String,
    /// Optional per-request timeout in seconds. Requests wait indefinitely when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8337".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewSettings {
    /// Metadata source that is not worth mentioning in disambiguation labels.
    pub default_data_source: String,
    /// Artist name the matcher uses for compilations.
    pub various_artists: String,
    /// Whether candidate tables start expanded.
    pub show_candidates: bool,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            default_data_source: "MusicBrainz".to_string(),
            various_artists: "Various Artists".to_string(),
            show_candidates: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Marker shown in the queue next to tasks whose match changes something.
    pub changed_marker: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ review pending imports ~ ".to_string(),
            changed_marker: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Directory for `tagreview.log`. Defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
