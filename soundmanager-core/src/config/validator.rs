//! Configuration validation.

use std::collections::HashSet;

use crate::config::types::{ClipConfig, SoundManagerConfig};
use crate::error::{Error, Result};

/// Validator for sound manager configurations.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a sound manager configuration.
    pub fn validate(&self, config: &SoundManagerConfig) -> Result<()> {
        self.validate_looping_voices(config)?;

        let mut seen = HashSet::new();
        for (index, clip) in config.clips.iter().enumerate() {
            self.validate_clip(index, clip)?;
            if !seen.insert(clip.name.as_str()) {
                return Err(Error::ConfigValidation(
                    format!("clips[{}].name", index),
                    format!("Duplicate clip name '{}'", clip.name),
                ));
            }
        }

        Ok(())
    }

    fn validate_looping_voices(&self, config: &SoundManagerConfig) -> Result<()> {
        if config.looping_voices == 0 {
            return Err(Error::ConfigValidation(
                "looping_voices".to_string(),
                "At least one looping voice is required".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_clip(&self, index: usize, clip: &ClipConfig) -> Result<()> {
        if clip.name.trim().is_empty() {
            return Err(Error::ConfigValidation(
                format!("clips[{}].name", index),
                "Clip name cannot be empty".to_string(),
            ));
        }
        if clip.file.trim().is_empty() {
            return Err(Error::ConfigValidation(
                format!("clips[{}].file", index),
                format!("Clip '{}' has no file", clip.name),
            ));
        }
        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str, file: &str) -> ClipConfig {
        ClipConfig {
            name: name.to_string(),
            file: file.to_string(),
        }
    }

    #[test]
    fn test_validate_default_config() {
        let validator = ConfigValidator::new();
        assert!(validator.validate(&SoundManagerConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_voices() {
        let validator = ConfigValidator::new();
        let config = SoundManagerConfig {
            looping_voices: 0,
            ..Default::default()
        };

        let result = validator.validate(&config);
        assert!(matches!(result, Err(Error::ConfigValidation(ref field, _)) if field == "looping_voices"));
    }

    #[test]
    fn test_validate_duplicate_clip_names() {
        let validator = ConfigValidator::new();
        let config = SoundManagerConfig {
            clips: vec![clip("bell", "bell.wav"), clip("bell", "bell2.wav")],
            ..Default::default()
        };

        let result = validator.validate(&config);
        assert!(matches!(result, Err(Error::ConfigValidation(ref field, _)) if field == "clips[1].name"));
    }

    #[test]
    fn test_validate_empty_clip_fields() {
        let validator = ConfigValidator::new();
        let config = SoundManagerConfig {
            clips: vec![clip("", "a.wav")],
            ..Default::default()
        };
        assert!(validator.validate(&config).is_err());

        let config = SoundManagerConfig {
            clips: vec![clip("funk", "  ")],
            ..Default::default()
        };
        assert!(validator.validate(&config).is_err());
    }
}
