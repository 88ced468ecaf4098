//! Dashboard configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use buildhub_navigation::NavigationSettings;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    /// Time a gesture spends exploring before it commits
    pub exploration_delay_ms: u64,
    /// Full commit transition, split evenly between committing and settling
    pub transition_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exploration_delay_ms: 150,
            transition_duration_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    /// Prepended to every query key, e.g. `hb_`
    pub prefix: String,
    pub base_path: String,
    pub debounce_ms: u64,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            base_path: "/".to_string(),
            debounce_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub persist: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            persist: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    pub animations: AnimationConfig,
    pub url: UrlConfig,
    pub history: HistoryConfig,
    /// Reject category and core-tab clicks the registry does not know
    pub validate_gestures: bool,
    /// Limit navigation to the categories this role may open
    pub role: Option<String>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("buildhub.db"),
            animations: AnimationConfig::default(),
            url: UrlConfig::default(),
            history: HistoryConfig::default(),
            validate_gestures: true,
            role: None,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("BuildHub"))
            .unwrap_or_else(|| PathBuf::from(".buildhub"))
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.url.base_path.starts_with('/') {
            return Err(CoreError::Config(format!(
                "url.base_path must start with '/': {}",
                self.url.base_path
            )));
        }
        if self.history.capacity == 0 {
            return Err(CoreError::Config(
                "history.capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Controller settings resolved from this config.
    pub fn navigation_settings(&self) -> NavigationSettings {
        NavigationSettings {
            animations_enabled: self.animations.enabled,
            exploration_delay: Duration::from_millis(self.animations.exploration_delay_ms),
            transition_duration: Duration::from_millis(self.animations.transition_duration_ms),
            url_prefix: self.url.prefix.clone(),
            base_path: self.url.base_path.clone(),
            address_debounce: Duration::from_millis(self.url.debounce_ms),
            history_capacity: self.history.capacity,
            persist_history: self.history.persist,
            validate_gestures: self.validate_gestures,
            role: self.role.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Platform data directory lookup
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
