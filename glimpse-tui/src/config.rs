use anyhow::{Context, Result};
use glimpse_types::ColorScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Local display preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

/// Server configuration stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

/// Manages the `.glimpse` directory
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::at(Self::get_config_dir()?)
    }

    /// Use an explicit directory, creating it if needed
    pub fn at(config_dir: PathBuf) -> Result<Self> {
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create .glimpse directory")?;
        }
        Ok(Self { config_dir })
    }

    fn get_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home_dir.join(".glimpse"))
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    fn get_preferences_file(&self) -> PathBuf {
        self.config_dir.join("prefs.json")
    }

    fn get_server_config_file(&self) -> PathBuf {
        self.config_dir.join("server_config.json")
    }

    pub fn save_preferences(&self, prefs: &UserPreferences) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        fs::write(self.get_preferences_file(), json).context("Failed to write preferences file")?;
        Ok(())
    }

    /// Load preferences, falling back to defaults when none are saved
    pub fn load_preferences(&self) -> Result<UserPreferences> {
        let prefs_file = self.get_preferences_file();
        if !prefs_file.exists() {
            return Ok(UserPreferences::default());
        }

        let json = fs::read_to_string(&prefs_file).context("Failed to read preferences file")?;
        let prefs = serde_json::from_str(&json).context("Failed to parse preferences")?;
        Ok(prefs)
    }

    pub fn save_server_config(&self, config: &ServerConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config).context("Failed to serialize server config")?;
        fs::write(self.get_server_config_file(), json).context("Failed to write server config file")?;
        Ok(())
    }

    pub fn load_server_config(&self) -> Result<Option<ServerConfig>> {
        let config_file = self.get_server_config_file();
        if !config_file.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&config_file).context("Failed to read server config file")?;
        let config = serde_json::from_str(&json).context("Failed to parse server config")?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_preferences_default_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::at(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load_preferences().unwrap(), UserPreferences::default());
    }

    #[test]
    fn test_preferences_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::at(temp_dir.path().join("nested")).unwrap();
        let prefs = UserPreferences {
            color_scheme: ColorScheme::Dark,
        };
        manager.save_preferences(&prefs).unwrap();
        assert_eq!(manager.load_preferences().unwrap().color_scheme, ColorScheme::Dark);
    }

    #[test]
    fn test_corrupt_preferences_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::at(temp_dir.path().to_path_buf()).unwrap();
        fs::write(temp_dir.path().join("prefs.json"), "{not json").unwrap();
        assert!(manager.load_preferences().is_err());
    }
}
