use crate::types::PipelineConfig;
use crate::{Result, SongStatsError};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file utilities.
///
/// Configuration is stored as JSON, by default in the XDG config directory:
/// `~/.config/song-stats/config.json`. Any field left out of the file takes
/// its default value.
pub struct ConfigStore;

impl ConfigStore {
    /// Get the default configuration file path.
    ///
    /// Returns a path like: `~/.config/song-stats/config.json`, or an error if
    /// the XDG config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SongStatsError::InvalidConfiguration(
                "Cannot determine XDG config directory".to_string(),
            )
        })?;

        Ok(config_dir.join("song-stats").join("config.json"))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<PipelineConfig> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::debug!("Configuration loaded from: {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the default file; fall back to the
    /// default configuration when the default file does not exist.
    ///
    /// An explicitly given path that does not exist is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<PipelineConfig> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Ok(default_path) if default_path.exists() => Self::load(&default_path),
            Ok(default_path) => {
                log::debug!(
                    "No configuration at {}, using defaults",
                    default_path.display()
                );
                Ok(PipelineConfig::default())
            }
            Err(e) => {
                log::debug!("{e}, using default configuration");
                Ok(PipelineConfig::default())
            }
        }
    }

    /// Save a configuration as pretty-printed JSON, creating parent directories.
    pub fn save(config: &PipelineConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json)?;

        log::debug!("Configuration saved to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RewriteRule;

    #[test]
    fn test_default_path_layout() {
        if let Ok(path) = ConfigStore::default_path() {
            assert!(path.ends_with("song-stats/config.json"));
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = PipelineConfig::new()
            .with_records_field("tracks")
            .with_artist_rewrite(RewriteRule::comma_suffix_to_dash());
        ConfigStore::save(&config, &path).unwrap();

        let loaded = ConfigStore::load_or_default(Some(path.as_path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.json");
        let err = ConfigStore::load_or_default(Some(absent.as_path())).unwrap_err();
        assert!(matches!(err, SongStatsError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"parallel": "yes"}"#).unwrap();
        assert!(matches!(
            ConfigStore::load(&path),
            Err(SongStatsError::Json(_))
        ));
    }
}
