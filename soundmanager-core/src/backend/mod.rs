//! Playback backends the sound manager drives.
//!
//! The manager owns all bookkeeping (which voice is free, which key holds which
//! voice); a backend only turns voice commands into sound. `KiraBackend` renders
//! through kira's mixer, `SilentBackend` records state in memory and is used when
//! no output device exists.

mod kira_output;
mod silent;

use std::path::Path;

use crate::channels::{Voice, VoiceId};
use crate::error::Result;

pub use self::kira_output::{volume_to_db, KiraBackend};
pub use self::silent::{SilentBackend, SilentClip, SilentVoice};

/// The external playback engine behind the voice pool.
pub trait AudioBackend {
    /// Opaque handle to decoded audio. Cloning must be cheap.
    type Clip: Clone;

    /// Short backend name for logs and status output.
    fn name(&self) -> &str;

    /// Loads an audio file into a clip.
    fn load_clip(&mut self, path: &Path) -> Result<Self::Clip>;

    /// Creates a playback unit with the given priority and returns its id.
    fn create_voice(&mut self, priority: u8) -> Result<VoiceId>;

    /// Applies the voice's clip, loop flag, priority and volume, and plays it
    /// from the beginning. Anything already playing on the unit is discarded.
    fn start_voice(&mut self, voice: &Voice<Self::Clip>) -> Result<()>;

    /// Silences everything playing on the unit, including layered one-shots.
    fn stop_voice(&mut self, id: VoiceId);

    /// Fires a non-looping clip on the unit without interrupting earlier triggers.
    fn fire_one_shot(&mut self, id: VoiceId, clip: &Self::Clip, volume: f32) -> Result<()>;
}
