//! Client settings load/save for `~/.chat-client/config.yaml`.
//! Two sections: `server.*` (where the chat server lives) and `ui.*` (defaults
//! the page starts with before hydration, animation speed, failure policy).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::controller::{FailurePolicy, DEFAULT_TICK_INTERVAL};
use crate::view::{Page, DEFAULT_HEADING, DEFAULT_PLACEHOLDER, DEFAULT_TITLE};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const CONFIG_ENV_VAR: &str = "CHAT_CLIENT_CONFIG";

/// Server section (base_url).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ServerSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// UI section (compiled-in text overrides, tick interval, failure policy).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<FailurePolicy>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub ui: UiSection,
}

impl Settings {
    pub fn base_url(&self) -> &str {
        self.server.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn tick_interval(&self) -> Duration {
        self.ui
            .tick_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TICK_INTERVAL)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.ui.failure_policy.unwrap_or_default()
    }

    /// Page the view starts from, before `config.json` is applied.
    pub fn initial_page(&self) -> Page {
        Page::with_defaults(
            self.ui.title.as_deref().unwrap_or(DEFAULT_TITLE),
            self.ui.heading.as_deref().unwrap_or(DEFAULT_HEADING),
            self.ui.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER),
        )
    }
}

/// Returns the default settings path: `~/.chat-client/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".chat-client").join("config.yaml"))
}

fn home_dir() -> Option<PathBuf> {
    let key = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(key).map(PathBuf::from)
}

/// Resolve the settings path: explicit override, then `CHAT_CLIENT_CONFIG`, then the default.
pub fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = override_path {
        return Some(p.to_path_buf());
    }
    if let Some(val) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(val));
    }
    default_config_path()
}

/// Load settings from a YAML file.
pub fn load(path: &Path) -> Result<Settings, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| SettingsError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load`], but a missing file yields the built-in defaults.
pub fn load_or_default(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    load(path)
}

/// Save settings to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let contents = serde_yaml::to_string(settings).map_err(|source| SettingsError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, contents).map_err(io_err)
}

/// Settings load/save error.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
