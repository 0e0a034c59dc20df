//! Backend that plays voices through a kira `AudioManager`.
//!
//! Every voice is a slot of `StaticSoundHandle`s on the one manager (one cpal
//! stream). Looping voices hold at most one handle; the one-shot voice keeps a
//! handle per trigger so overlapping effects can be stopped together.

use std::path::Path;

use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::sound::PlaybackState;
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};

use crate::backend::AudioBackend;
use crate::channels::{Voice, VoiceId};
use crate::error::{Error, Result};

/// Converts a linear 0.0-1.0 volume to kira decibels.
pub fn volume_to_db(volume: f32) -> Decibels {
    if volume <= 0.0 {
        Decibels::SILENCE
    } else {
        Decibels(20.0 * volume.min(1.0).log10())
    }
}

/// A backend playback unit.
struct KiraVoice {
    priority: u8,
    handles: Vec<StaticSoundHandle>,
}

impl KiraVoice {
    fn stop_all(&mut self) -> usize {
        let mut count = 0;
        for mut handle in self.handles.drain(..) {
            handle.stop(Tween::default());
            count += 1;
        }
        count
    }

    /// Drops handles whose sound has finished.
    fn prune(&mut self) {
        self.handles
            .retain(|h| !matches!(h.state(), PlaybackState::Stopped));
    }
}

/// Audio backend rendering through kira's internal mixer.
pub struct KiraBackend {
    manager: AudioManager<DefaultBackend>,
    voices: Vec<KiraVoice>,
}

impl KiraBackend {
    /// Opens the default output device.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| Error::NoAudioDevice(e.to_string()))?;

        tracing::info!("Opened kira audio output");

        Ok(Self {
            manager,
            voices: Vec::new(),
        })
    }

    /// Returns how many sounds are still audible on a voice.
    pub fn playing_count(&mut self, id: VoiceId) -> usize {
        match self.voices.get_mut(id.0) {
            Some(slot) => {
                slot.prune();
                slot.handles.len()
            }
            None => 0,
        }
    }
}

impl AudioBackend for KiraBackend {
    type Clip = StaticSoundData;

    fn name(&self) -> &str {
        "kira"
    }

    fn load_clip(&mut self, path: &Path) -> Result<Self::Clip> {
        StaticSoundData::from_file(path)
            .map_err(|e| Error::ClipLoad(path.display().to_string(), e.to_string()))
    }

    fn create_voice(&mut self, priority: u8) -> Result<VoiceId> {
        let id = VoiceId(self.voices.len());
        self.voices.push(KiraVoice {
            priority,
            handles: Vec::new(),
        });
        Ok(id)
    }

    fn start_voice(&mut self, voice: &Voice<Self::Clip>) -> Result<()> {
        let clip = voice
            .clip()
            .ok_or_else(|| Error::Playback(format!("No clip assigned to voice {}", voice.id())))?;

        let mut data = clip.clone().volume(volume_to_db(voice.volume()));
        if voice.is_looping() {
            data = data.loop_region(..);
        }

        let slot = self
            .voices
            .get_mut(voice.id().0)
            .ok_or_else(|| Error::Playback(format!("Unknown voice {}", voice.id())))?;
        slot.stop_all();
        slot.priority = voice.priority();

        let handle = self
            .manager
            .play(data)
            .map_err(|e| Error::Playback(format!("{}", e)))?;
        slot.handles.push(handle);

        tracing::debug!(
            "kira voice {} started (priority {}, volume {:.2})",
            voice.id(),
            slot.priority,
            voice.volume()
        );
        Ok(())
    }

    fn stop_voice(&mut self, id: VoiceId) {
        if let Some(slot) = self.voices.get_mut(id.0) {
            let stopped = slot.stop_all();
            tracing::debug!("kira voice {} stopped {} sound(s)", id, stopped);
        }
    }

    fn fire_one_shot(&mut self, id: VoiceId, clip: &Self::Clip, volume: f32) -> Result<()> {
        let slot = self
            .voices
            .get_mut(id.0)
            .ok_or_else(|| Error::Playback(format!("Unknown voice {}", id)))?;
        slot.prune();

        let data = clip.clone().volume(volume_to_db(volume));
        let handle = self
            .manager
            .play(data)
            .map_err(|e| Error::Playback(format!("{}", e)))?;
        slot.handles.push(handle);
        Ok(())
    }
}
