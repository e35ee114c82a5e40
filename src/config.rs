use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::error::{ImporterError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub sanity: SanityConfig,
    pub importer: ImporterConfig,
}

#[derive(Debug, Deserialize)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct ImporterConfig {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ImporterError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sanity: SanityConfig {
                project_id: "sy7ko2cx".to_string(),
                dataset: "production".to_string(),
                timeout_seconds: 10,
            },
            importer: ImporterConfig {
                data_dir: PathBuf::from("."),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[sanity]\nproject_id = \"abc123\"\ndataset = \"production\"\ntimeout_seconds = 5\n\n[importer]\ndata_dir = \"data\"\n"
        )
        .unwrap();

        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.sanity.project_id, "abc123");
        assert_eq!(config.sanity.timeout_seconds, 5);
        assert_eq!(config.importer.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_missing_config_is_config_error() {
        let err = Config::load_from("/nonexistent/config.toml").unwrap_err();
        assert!(matches!(err, ImporterError::Config(_)));
    }
}
