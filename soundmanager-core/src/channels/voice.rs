//! Voice records and the priority/volume rules shared by every channel.

use std::fmt;

use crate::error::{Error, Result};

/// Priority reserved for the one-shot voice.
pub const ONE_SHOT_PRIORITY: u8 = 0;

/// Priority every looping voice is created with.
pub const LOOP_BASE_PRIORITY: u8 = 1;

/// Highest (least important) priority a voice can carry.
pub const MAX_PRIORITY: u8 = 255;

/// Volume used when the caller has no preference.
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Identifier of a playback unit inside an [`AudioBackend`](crate::backend::AudioBackend).
///
/// Only the backends in this crate hand ids out; callers can read them but not
/// make new ones:
///
/// ```compile_fail
/// let forged = soundmanager_core::channels::VoiceId(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(pub(crate) usize);

impl VoiceId {
    /// Slot index of the voice in its backend.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A playback voice and the settings last assigned to it.
///
/// Voices are only created by the pool or the one-shot channel and are moved
/// between owners, never cloned, so a backend unit can't be driven from two places.
#[derive(Debug)]
pub struct Voice<C> {
    id: VoiceId,
    clip: Option<C>,
    looping: bool,
    priority: u8,
    volume: f32,
    playing: bool,
}

impl<C> Voice<C> {
    pub(crate) fn new(id: VoiceId, priority: u8) -> Self {
        Self {
            id,
            clip: None,
            looping: false,
            priority,
            volume: DEFAULT_VOLUME,
            playing: false,
        }
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn clip(&self) -> Option<&C> {
        self.clip.as_ref()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether the voice was last started rather than stopped. For a looping voice
    /// this tracks the backend; for the one-shot voice it means triggered since the
    /// last stop.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Assigns looping playback settings. The backend starts it from the beginning.
    pub(crate) fn assign_loop(&mut self, clip: C, priority: u8, volume: f32) {
        self.looping = true;
        self.clip = Some(clip);
        self.priority = priority;
        self.volume = volume;
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }
}

/// Checks a looping priority. 0 is reserved for one-shot sounds.
pub fn validate_loop_priority(priority: i32) -> Result<u8> {
    if priority < i32::from(LOOP_BASE_PRIORITY) || priority > i32::from(MAX_PRIORITY) {
        return Err(Error::InvalidPriority(priority));
    }
    // Range checked above.
    Ok(priority as u8)
}

/// Checks that a volume is a finite value in 0.0..=1.0.
pub fn validate_volume(volume: f32) -> Result<f32> {
    if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
        return Err(Error::InvalidVolume(volume));
    }
    Ok(volume)
}
