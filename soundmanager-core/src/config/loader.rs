//! YAML configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::types::SoundManagerConfig;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// Loads and validates a sound manager config file.
pub struct ConfigLoader {
    path: PathBuf,
    validator: ConfigValidator,
}

impl ConfigLoader {
    /// Creates a loader for the given YAML file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            validator: ConfigValidator::new(),
        }
    }

    /// Reads, parses and validates the config, setting `source_path`.
    pub fn load(&self) -> Result<SoundManagerConfig> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::ConfigLoad(self.path.display().to_string(), e.to_string()))?;

        let mut config = Self::parse(&content, &self.path.display().to_string())?;
        config.source_path = Some(self.path.clone());

        self.validator.validate(&config)?;

        tracing::info!(
            "Loaded config {} ({} looping voices, {} clips)",
            self.path.display(),
            config.looping_voices,
            config.clips.len()
        );
        Ok(config)
    }

    /// Loads the config, or falls back to defaults when the file doesn't exist.
    /// Parse and validation errors are still reported.
    pub fn load_or_default(&self) -> Result<SoundManagerConfig> {
        if !self.path.exists() {
            tracing::warn!(
                "Config {} not found, using defaults",
                self.path.display()
            );
            return Ok(SoundManagerConfig::default());
        }
        self.load()
    }

    /// Parses and validates YAML text that didn't come from a file.
    pub fn load_from_str(content: &str) -> Result<SoundManagerConfig> {
        let config = Self::parse(content, "<inline>")?;
        ConfigValidator::new().validate(&config)?;
        Ok(config)
    }

    fn parse(content: &str, origin: &str) -> Result<SoundManagerConfig> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigParse(origin.to_string(), e.to_string()))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
