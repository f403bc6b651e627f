use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::Config;

/// The two colour schemes the app knows about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored preference; anything but "dark" means light
    pub fn from_stored(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Somewhere to keep the theme preference between runs
///
/// Injected into the session so the engine never touches storage directly.
pub trait ThemeStore: Send + Sync {
    /// Raw stored value, if any was ever saved
    fn load(&self) -> Option<String>;
    fn save(&self, theme: Theme) -> crate::Result<()>;
}

/// Keeps the preference in the `[ui]` table of the config file
pub struct ConfigThemeStore {
    path: PathBuf,
}

impl ConfigThemeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ThemeStore for ConfigThemeStore {
    fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        Config::load_from(&self.path).ok().map(|c| c.ui.theme)
    }

    fn save(&self, theme: Theme) -> crate::Result<()> {
        let mut config = Config::load_from(&self.path)?;
        config.ui.theme = theme.as_str().to_string();
        config.save_to(&self.path)
    }
}

/// Non-persistent store, handy for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<String>>,
}

impl MemoryThemeStore {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            value: Mutex::new(initial.map(ToString::to_string)),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }

    fn save(&self, theme: Theme) -> crate::Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| crate::Error::ConfigError("theme store lock poisoned".into()))?;
        *value = Some(theme.as_str().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored_defaults_to_light() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("solarized"), Theme::Light);
        assert_eq!(Theme::from_stored(""), Theme::Light);
    }

    #[test]
    fn test_toggle_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryThemeStore::new(None);
        assert_eq!(store.load(), None);

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load().as_deref(), Some("dark"));
    }

    #[test]
    fn test_config_store_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.github.token = Some("keep-me".into());
        config.save_to(&path).unwrap();

        let store = ConfigThemeStore::new(path.clone());
        assert_eq!(store.load().as_deref(), Some("light"));

        store.save(Theme::Dark).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.ui.theme, "dark");
        assert_eq!(reloaded.github.token.as_deref(), Some("keep-me"));
    }

    #[test]
    fn test_config_store_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigThemeStore::new(dir.path().join("missing.toml"));
        assert_eq!(store.load(), None);
    }
}
