use crate::error::{RallyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MEDIA_EXT: &str = ".mp4";
const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Configuration for a vault, stored in its config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RallyConfig {
    /// File extension for stored clips (e.g., ".mp4", ".mov")
    #[serde(default = "default_media_ext")]
    pub media_ext: String,

    /// Age threshold for the retention sweep, in days. 0 disables sweeping.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_media_ext() -> String {
    DEFAULT_MEDIA_EXT.to_string()
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

impl Default for RallyConfig {
    fn default() -> Self {
        Self {
            media_ext: DEFAULT_MEDIA_EXT.to_string(),
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl RallyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RallyError::Io)?;
        let config: RallyConfig =
            serde_json::from_str(&content).map_err(RallyError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RallyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RallyError::Serialization)?;
        fs::write(config_path, content).map_err(RallyError::Io)?;
        Ok(())
    }

    pub fn get_media_ext(&self) -> &str {
        &self.media_ext
    }

    /// Set the media extension (normalizes to start with a dot)
    pub fn set_media_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.media_ext = ext.to_string();
        } else {
            self.media_ext = format!(".{}", ext);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = RallyConfig::default();
        assert_eq!(config.media_ext, ".mp4");
        assert_eq!(config.retention_days, 30);
    }

    #[test]
    fn test_set_media_ext_normalizes_dot() {
        let mut config = RallyConfig::default();
        config.set_media_ext("mov");
        assert_eq!(config.media_ext, ".mov");
        config.set_media_ext(".avi");
        assert_eq!(config.media_ext, ".avi");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = RallyConfig::load(dir.path()).unwrap();
        assert_eq!(config, RallyConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();

        let mut config = RallyConfig::default();
        config.set_media_ext(".mov");
        config.retention_days = 14;
        config.save(dir.path()).unwrap();

        let loaded = RallyConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.media_ext, ".mov");
        assert_eq!(loaded.retention_days, 14);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"media_ext": ".mov"}"#).unwrap();

        let loaded = RallyConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.media_ext, ".mov");
        assert_eq!(loaded.retention_days, 30);
    }
}
