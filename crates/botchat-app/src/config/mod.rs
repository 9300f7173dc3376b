//! Configuration file parsing for botchat
//!
//! Supports `<config_dir>/botchat/config.toml` (or an explicit `--config`
//! path) with `BOTCHAT_BASE_URL` as an environment override.

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, default_app_dir, default_config_path, load_settings, storage_dir,
    BASE_URL_ENV_VAR, CONFIG_FILENAME,
};
pub use types::*;
