//! Configuration types for the sound manager.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of looping voices when the config doesn't say.
pub const DEFAULT_LOOPING_VOICES: usize = 32;

/// Startup configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SoundManagerConfig {
    /// Size of the looping voice pool. Fixed for the manager's lifetime.
    #[serde(default = "default_looping_voices")]
    pub looping_voices: usize,
    /// Directory relative clip paths resolve against.
    /// Defaults to the directory holding the config file.
    #[serde(default)]
    pub sound_root: Option<PathBuf>,
    #[serde(default)]
    pub clips: Vec<ClipConfig>,
    /// Full path to the source YAML file this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl SoundManagerConfig {
    /// Returns the directory clip paths are resolved against.
    pub fn resolved_sound_root(&self) -> PathBuf {
        let base = self
            .source_path
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        match &self.sound_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base.join(root),
            None => base,
        }
    }

    /// Looks up a clip entry by name.
    pub fn clip(&self, name: &str) -> Option<&ClipConfig> {
        self.clips.iter().find(|c| c.name == name)
    }
}

impl Default for SoundManagerConfig {
    fn default() -> Self {
        Self {
            looping_voices: DEFAULT_LOOPING_VOICES,
            sound_root: None,
            clips: Vec::new(),
            source_path: None,
        }
    }
}

fn default_looping_voices() -> usize {
    DEFAULT_LOOPING_VOICES
}

/// A named audio file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ClipConfig {
    pub name: String,
    pub file: String,
}
