//! In-memory backend that tracks voice state without producing sound.

use std::path::Path;
use std::sync::Arc;

use crate::backend::AudioBackend;
use crate::channels::{Voice, VoiceId};
use crate::error::{Error, Result};

/// Clip stand-in identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SilentClip(Arc<str>);

impl SilentClip {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// What a silent voice would be doing if it made sound.
#[derive(Debug, Clone, Default)]
pub struct SilentVoice {
    pub clip: Option<SilentClip>,
    pub looping: bool,
    pub priority: u8,
    pub volume: f32,
    pub playing: bool,
    /// Sounds layered on the voice right now.
    pub layers: usize,
    /// Times the voice was started from the beginning.
    pub starts: u64,
}

/// Backend used when no output device is available, and in tests.
#[derive(Debug, Default)]
pub struct SilentBackend {
    voices: Vec<SilentVoice>,
    offline: bool,
}

impl SilentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded state of a voice.
    pub fn voice(&self, id: VoiceId) -> Option<&SilentVoice> {
        self.voices.get(id.0)
    }

    /// Number of voices created so far.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Number of voices currently marked as playing.
    pub fn playing_count(&self) -> usize {
        self.voices.iter().filter(|v| v.playing).count()
    }

    /// While offline, starting or firing a voice fails as if the device was lost.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn slot(&mut self, id: VoiceId) -> Result<&mut SilentVoice> {
        if self.offline {
            return Err(Error::Playback("audio device offline".to_string()));
        }
        self.voices
            .get_mut(id.0)
            .ok_or_else(|| Error::Playback(format!("Unknown voice {}", id)))
    }
}

impl AudioBackend for SilentBackend {
    type Clip = SilentClip;

    fn name(&self) -> &str {
        "silent"
    }

    fn load_clip(&mut self, path: &Path) -> Result<Self::Clip> {
        if !path.is_file() {
            return Err(Error::ClipNotFound(path.display().to_string()));
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Ok(SilentClip::new(name))
    }

    fn create_voice(&mut self, priority: u8) -> Result<VoiceId> {
        let id = VoiceId(self.voices.len());
        self.voices.push(SilentVoice {
            priority,
            volume: 1.0,
            ..Default::default()
        });
        Ok(id)
    }

    fn start_voice(&mut self, voice: &Voice<Self::Clip>) -> Result<()> {
        let clip = voice
            .clip()
            .cloned()
            .ok_or_else(|| Error::Playback(format!("No clip assigned to voice {}", voice.id())))?;
        let slot = self.slot(voice.id())?;
        slot.clip = Some(clip);
        slot.looping = voice.is_looping();
        slot.priority = voice.priority();
        slot.volume = voice.volume();
        slot.playing = true;
        slot.layers = 1;
        slot.starts += 1;
        Ok(())
    }

    fn stop_voice(&mut self, id: VoiceId) {
        if let Some(slot) = self.voices.get_mut(id.0) {
            slot.playing = false;
            slot.layers = 0;
        }
    }

    fn fire_one_shot(&mut self, id: VoiceId, clip: &Self::Clip, volume: f32) -> Result<()> {
        let slot = self.slot(id)?;
        slot.clip = Some(clip.clone());
        slot.looping = false;
        slot.volume = volume;
        slot.playing = true;
        slot.layers += 1;
        Ok(())
    }
}
