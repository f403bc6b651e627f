use serde::{Deserialize, Serialize};
use stargazer_api::{ClientOptions, STARRED_PER_PAGE};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
///
/// Lives in `<config dir>/stargazer/config.toml`. Missing file or missing
/// keys fall back to defaults, so an empty file is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// XDG config dir on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("stargazer");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitHubConfig {
    /// Personal access token; optional, but lifts the anonymous rate limit
    pub token: Option<String>,

    /// API URL (for GitHub Enterprise)
    #[serde(default = "default_github_url")]
    pub api_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Walk every page of stars instead of just the first
    #[serde(default)]
    pub follow_pagination: bool,

    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    STARRED_PER_PAGE
}

fn default_max_pages() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl GitHubConfig {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            token: self.token.clone(),
            per_page: self.per_page.clamp(1, STARRED_PER_PAGE),
            follow_pagination: self.follow_pagination,
            max_pages: self.max_pages.max(1),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_github_url(),
            per_page: default_per_page(),
            follow_pagination: false,
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Persisted theme preference, "light" or "dark"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "light".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}
