//! Error types for soundmanager-core.

use thiserror::Error;

/// Main error type for the soundmanager-core library.
#[derive(Error, Debug)]
pub enum Error {
    // Voice pool / looping errors
    #[error("Looping sound priority {0} is outside the accepted range 1-255")]
    InvalidPriority(i32),

    #[error("Volume {0} is outside the accepted range 0.0-1.0")]
    InvalidVolume(f32),

    #[error("All {0} looping voices are in use")]
    AllVoicesBusy(usize),

    #[error("Tried to stop looping sound \"{0}\" while it was not playing")]
    NotPlaying(String),

    #[error("Voice pool capacity must be at least 1")]
    InvalidCapacity,

    #[error("Voice {0} is not in use by this pool")]
    VoiceNotInUse(usize),

    // Config errors
    #[error("Failed to load config '{0}': {1}")]
    ConfigLoad(String, String),

    #[error("Failed to parse config '{0}': {1}")]
    ConfigParse(String, String),

    #[error("Config validation error in '{0}': {1}")]
    ConfigValidation(String, String),

    // Clip errors
    #[error("Sound file not found: {0}")]
    ClipNotFound(String),

    #[error("Unknown clip: {0}")]
    UnknownClip(String),

    #[error("Failed to load clip {0}: {1}")]
    ClipLoad(String, String),

    // Backend errors
    #[error("No audio output device available: {0}")]
    NoAudioDevice(String),

    #[error("Failed to play sound: {0}")]
    Playback(String),

    #[error("Failed to acquire sound manager lock")]
    Lock,

    // Generic errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
