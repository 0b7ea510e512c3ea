//! Settings management use case

use crate::error::Result;
use crate::infrastructure::config::SETTINGS_KEYS;
use crate::infrastructure::Settings;
use std::path::PathBuf;
use tracing::info;

/// Service for reading and changing the settings file
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Create a new config service over the settings file at `path`
    pub fn new(path: PathBuf) -> Self {
        ConfigService { path }
    }

    /// Get a single setting
    pub fn get(&self, key: &str) -> Result<String> {
        Settings::load(&self.path)?.get(key)
    }

    /// Set a setting and save the file
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut settings = Settings::load(&self.path)?;
        settings.set(key, value)?;
        settings.save(&self.path)?;
        info!(key, value, "setting changed");
        Ok(())
    }

    /// Overwrite the settings file with the defaults
    pub fn reset(&self) -> Result<Settings> {
        let settings = Settings::default();
        settings.save(&self.path)?;
        info!(path = %self.path.display(), "settings reset to defaults");
        Ok(settings)
    }

    /// All settings as key/value pairs, in a stable order
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let settings = Settings::load(&self.path)?;
        SETTINGS_KEYS
            .iter()
            .map(|key| Ok((key.to_string(), settings.get(key)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_persists() {
        let temp = TempDir::new().unwrap();
        let service = ConfigService::new(temp.path().join("settings.json"));

        service.set("backup_frequency", "weekly").unwrap();
        assert_eq!(service.get("backup_frequency").unwrap(), "weekly");
        assert!(temp.path().join("settings.json").exists());
    }

    #[test]
    fn test_get_unknown_key() {
        let temp = TempDir::new().unwrap();
        let service = ConfigService::new(temp.path().join("settings.json"));
        let err = service.get("nope").unwrap_err();
        assert!(err.to_string().contains("Unknown settings key"));
    }

    #[test]
    fn test_invalid_value_is_not_saved() {
        let temp = TempDir::new().unwrap();
        let service = ConfigService::new(temp.path().join("settings.json"));
        assert!(service.set("date_format", "%Y/%m").is_err());
        assert!(!temp.path().join("settings.json").exists());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let temp = TempDir::new().unwrap();
        let service = ConfigService::new(temp.path().join("settings.json"));
        service.set("tag_style", "trailing").unwrap();
        service.set("use_timestamp", "false").unwrap();

        let settings = service.reset().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(service.get("tag_style").unwrap(), "tags_line");
        assert_eq!(service.get("use_timestamp").unwrap(), "true");
    }

    #[test]
    fn test_list_covers_every_key() {
        let temp = TempDir::new().unwrap();
        let service = ConfigService::new(temp.path().join("settings.json"));
        let pairs = service.list().unwrap();
        assert_eq!(pairs.len(), SETTINGS_KEYS.len());
        assert!(pairs.contains(&("date_format".to_string(), "%Y-%m-%d".to_string())));
    }
}
