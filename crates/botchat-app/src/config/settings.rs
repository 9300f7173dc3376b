//! Settings loading
//!
//! Precedence (highest first): CLI flags, `BOTCHAT_BASE_URL`, the config
//! file, built-in defaults. CLI flags are applied by the binary on top of
//! what [`load_settings`] returns.

use std::path::{Path, PathBuf};

use botchat_core::prelude::*;

use super::types::{BackendSettings, Settings};

/// Directory name under the platform config dir
pub const APP_DIR: &str = "botchat";

/// Settings file name
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding `[backend] base_url`
pub const BASE_URL_ENV_VAR: &str = "BOTCHAT_BASE_URL";

/// `<config_dir>/botchat`, or `./.botchat` when the platform has no config dir
pub fn default_app_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".botchat"))
}

/// Default location of `config.toml`
pub fn default_config_path() -> PathBuf {
    default_app_dir().join(CONFIG_FILENAME)
}

/// Load settings from `path` (or the default location), then apply
/// environment overrides.
///
/// A missing file yields defaults. An unreadable or invalid file is logged
/// and also yields defaults.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    let mut settings = read_settings_file(&config_path);
    apply_env_overrides(&mut settings, std::env::var(BASE_URL_ENV_VAR).ok());
    sanitize(&mut settings);
    settings
}

fn read_settings_file(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply `BOTCHAT_BASE_URL` if set and non-empty
pub fn apply_env_overrides(settings: &mut Settings, base_url: Option<String>) {
    if let Some(url) = base_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        debug!("{} overrides backend URL: {}", BASE_URL_ENV_VAR, url);
        settings.backend.base_url = url;
    }
}

/// Replace nonsensical values with defaults
fn sanitize(settings: &mut Settings) {
    let defaults = BackendSettings::default();

    if settings.backend.base_url.trim().is_empty() {
        warn!("Empty backend base_url, using {}", defaults.base_url);
        settings.backend.base_url = defaults.base_url;
    }
    if settings.backend.request_timeout_secs == 0 {
        warn!(
            "request_timeout_secs must be positive, using {}",
            defaults.request_timeout_secs
        );
        settings.backend.request_timeout_secs = defaults.request_timeout_secs;
    }
    if settings.chat.fallback_greeting.trim().is_empty() {
        settings.chat.fallback_greeting = super::DEFAULT_FALLBACK_GREETING.to_string();
    }
}

/// Directory holding the persisted credential and preferences
pub fn storage_dir(settings: &Settings) -> PathBuf {
    settings
        .storage
        .dir
        .clone()
        .unwrap_or_else(default_app_dir)
}
