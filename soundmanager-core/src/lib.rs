//! Soundmanager Core - fixed-capacity voice management for game audio.
//!
//! This library provides:
//! - A fixed pool of looping voices, each bound to a caller-chosen key
//! - A shared one-shot voice for overlapping fire-and-forget effects
//! - The `SoundManager` facade that validates priorities and volumes
//! - Backends for kira output and silent in-memory playback
//! - YAML configuration and a named clip library
//!
//! # Example
//!
//! ```rust,no_run
//! use soundmanager_core::prelude::*;
//!
//! let config = ConfigLoader::new("sounds.yaml").load().unwrap();
//! let mut backend = KiraBackend::new().unwrap();
//! let clips = ClipLibrary::from_config(&mut backend, &config).unwrap();
//! let mut sounds = SoundManager::from_config(backend, &config).unwrap();
//!
//! sounds.play_one_shot(clips.get("whizz").unwrap(), DEFAULT_VOLUME).unwrap();
//! sounds.play_looping(clips.get("bell").unwrap(), "bell", 2, DEFAULT_VOLUME).unwrap();
//! sounds.stop_looping("bell").unwrap();
//! ```

pub mod backend;
pub mod channels;
pub mod config;
pub mod error;
pub mod library;
pub mod manager;
pub mod shared;

pub use error::{Error, Result};

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::backend::{AudioBackend, KiraBackend, SilentBackend, SilentClip};
    pub use crate::channels::{DEFAULT_VOLUME, LOOP_BASE_PRIORITY, MAX_PRIORITY, ONE_SHOT_PRIORITY};
    pub use crate::config::{ClipConfig, ConfigLoader, SoundManagerConfig};
    pub use crate::error::{Error, Result};
    pub use crate::library::ClipLibrary;
    pub use crate::manager::{LoopStatus, ManagerStatus, SoundManager};
    pub use crate::shared::SharedSoundManager;
}
