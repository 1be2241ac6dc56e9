//! Configuration service.
//!
//! Loads the application configuration from the configuration file
//! (~/.config/tonedeck/config.toml) and caches it. A missing file is not
//! an error; defaults apply.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tonedeck_core::error::Result;
use tonedeck_core::{AppConfig, ToneDeckError};
use tracing::debug;

/// Configuration service that loads and caches the app configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<AppConfig>>>,
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a service pointed at the default platform config path.
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: default_config_path(),
        }
    }

    /// Creates a service pointed at an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: Some(path.into()),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// Unreadable or invalid files degrade to the defaults rather than
    /// failing the caller.
    pub fn get(&self) -> AppConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|err| {
            debug!(%err, "config load failed, using defaults");
            AppConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load(&self) -> Result<AppConfig> {
        let Some(path) = &self.path else {
            return Ok(AppConfig::default());
        };
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let raw = std::fs::read_to_string(path).map_err(ToneDeckError::from)?;
        let config = toml::from_str(&raw)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tonedeck").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tonedeck_core::Theme;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.toml"));
        assert_eq!(service.get(), AppConfig::default());
    }

    #[test]
    fn test_file_is_parsed_and_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"dusk\"\ndemo_mode = true\n").unwrap();

        let service = ConfigService::with_path(&path);
        let config = service.get();
        assert_eq!(config.theme, Theme::Dusk);
        assert!(config.demo_mode);

        // Cached: a rewrite is invisible until invalidate()
        fs::write(&path, "theme = \"plain\"\n").unwrap();
        assert_eq!(service.get().theme, Theme::Dusk);

        service.invalidate();
        assert_eq!(service.get().theme, Theme::Plain);
    }

    #[test]
    fn test_invalid_file_degrades_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [not valid toml").unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.get(), AppConfig::default());
    }
}
