//! Theme preference store
//!
//! An explicit choice saved in `preferences.toml` wins. Without one the
//! terminal's `COLORFGBG` hint decides, and dark is the fallback.

use std::path::{Path, PathBuf};

use botchat_core::prelude::*;
use botchat_core::ThemeMode;
use serde::{Deserialize, Serialize};

use super::{write_atomic, FileMode};

pub const PREFERENCES_FILENAME: &str = "preferences.toml";

/// Terminal colour hint, `"<fg>;<bg>"` (some terminals add a middle field)
pub const COLORFGBG_ENV_VAR: &str = "COLORFGBG";

#[derive(Debug, Default, Deserialize, Serialize)]
struct Preferences {
    #[serde(default)]
    theme: Option<ThemeMode>,
}

/// File-backed store for the light/dark choice
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(PREFERENCES_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved choice, or the system-derived mode when nothing is saved
    pub fn load(&self) -> ThemeMode {
        self.saved().unwrap_or_else(detect_system_theme)
    }

    /// The explicitly saved choice, if any
    pub fn saved(&self) -> Option<ThemeMode> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<Preferences>(&content) {
            Ok(prefs) => prefs.theme,
            Err(e) => {
                warn!("Failed to parse {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Persist an explicit choice
    pub fn save(&self, mode: ThemeMode) -> Result<()> {
        let prefs = Preferences { theme: Some(mode) };
        let body = toml::to_string(&prefs)
            .map_err(|e| Error::store(&self.path, format!("Failed to serialize: {}", e)))?;

        write_atomic(&self.path, &body, FileMode::Default)?;
        debug!("Saved theme preference {} to {:?}", mode, self.path);
        Ok(())
    }
}

/// Derive a mode from the host terminal, defaulting to dark
pub fn detect_system_theme() -> ThemeMode {
    let hint = std::env::var(COLORFGBG_ENV_VAR).ok();
    theme_from_colorfgbg(hint.as_deref()).unwrap_or_default()
}

/// Interpret a `COLORFGBG` value by its last (background) field
///
/// Backgrounds 0-6 and 8 are dark; 7 and 9-15 are light.
pub fn theme_from_colorfgbg(value: Option<&str>) -> Option<ThemeMode> {
    let bg: u8 = value?.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(ThemeMode::Dark),
        7 | 9..=15 => Some(ThemeMode::Light),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(theme_from_colorfgbg(Some("15;0")), Some(ThemeMode::Dark));
        assert_eq!(theme_from_colorfgbg(Some("0;15")), Some(ThemeMode::Light));
        assert_eq!(theme_from_colorfgbg(Some("0;default;7")), Some(ThemeMode::Light));
        assert_eq!(theme_from_colorfgbg(Some("7;8")), Some(ThemeMode::Dark));
        assert_eq!(theme_from_colorfgbg(Some("0;200")), None);
        assert_eq!(theme_from_colorfgbg(Some("garbage")), None);
        assert_eq!(theme_from_colorfgbg(None), None);
    }

    #[test]
    fn test_save_then_load() {
        let temp = tempdir().unwrap();
        let store = ThemeStore::new(temp.path());

        store.save(ThemeMode::Light).unwrap();
        assert_eq!(store.load(), ThemeMode::Light);
        assert_eq!(store.saved(), Some(ThemeMode::Light));

        store.save(ThemeMode::Dark).unwrap();
        assert_eq!(store.load(), ThemeMode::Dark);
    }

    #[test]
    #[serial]
    fn test_unset_derives_from_system() {
        let temp = tempdir().unwrap();
        let store = ThemeStore::new(temp.path());

        std::env::set_var(COLORFGBG_ENV_VAR, "0;15");
        assert_eq!(store.load(), ThemeMode::Light);

        std::env::remove_var(COLORFGBG_ENV_VAR);
        assert_eq!(store.load(), ThemeMode::Dark);
    }

    #[test]
    #[serial]
    fn test_saved_choice_overrides_system() {
        let temp = tempdir().unwrap();
        let store = ThemeStore::new(temp.path());
        store.save(ThemeMode::Dark).unwrap();

        std::env::set_var(COLORFGBG_ENV_VAR, "0;15");
        assert_eq!(store.load(), ThemeMode::Dark);
        std::env::remove_var(COLORFGBG_ENV_VAR);
    }

    #[test]
    fn test_invalid_preferences_fall_back() {
        let temp = tempdir().unwrap();
        let store = ThemeStore::new(temp.path());
        std::fs::write(store.path(), "theme = \"purple\"\n").unwrap();
        assert_eq!(store.saved(), None);
    }
}
