//! The shared voice for fire-and-forget effects.

use crate::backend::AudioBackend;
use crate::channels::voice::{validate_volume, Voice, ONE_SHOT_PRIORITY};
use crate::error::Result;

/// A single always-available voice for one-shot effects.
///
/// Triggers layer on top of each other in the backend; a new trigger never waits
/// for or cuts off an earlier one. Only [`OneShotChannel::stop_all`] silences them.
#[derive(Debug)]
pub struct OneShotChannel<C> {
    voice: Voice<C>,
    triggers: u64,
}

impl<C> OneShotChannel<C> {
    /// Creates the one-shot voice on the backend at the reserved top priority.
    pub fn new<B>(backend: &mut B) -> Result<Self>
    where
        B: AudioBackend<Clip = C>,
    {
        let id = backend.create_voice(ONE_SHOT_PRIORITY)?;
        tracing::debug!("Created one-shot voice {}", id);
        Ok(Self {
            voice: Voice::new(id, ONE_SHOT_PRIORITY),
            triggers: 0,
        })
    }

    /// Fires `clip` at `volume` over whatever is already playing on the voice.
    pub fn play<B>(&mut self, backend: &mut B, clip: &C, volume: f32) -> Result<()>
    where
        B: AudioBackend<Clip = C>,
    {
        let volume = validate_volume(volume)?;
        backend.fire_one_shot(self.voice.id(), clip, volume)?;
        self.voice.set_playing(true);
        self.triggers += 1;
        tracing::debug!("Fired one-shot #{} at volume {:.2}", self.triggers, volume);
        Ok(())
    }

    /// Halts every sound on the one-shot voice, overlapped triggers included.
    pub fn stop_all<B>(&mut self, backend: &mut B)
    where
        B: AudioBackend<Clip = C>,
    {
        backend.stop_voice(self.voice.id());
        self.voice.set_playing(false);
        tracing::debug!("Stopped all one-shot sounds");
    }

    /// The one-shot voice. Its [`Voice::is_playing`] means "triggered since the last
    /// stop": effects end on their own in the backend without clearing it.
    pub fn voice(&self) -> &Voice<C> {
        &self.voice
    }

    /// Total triggers fired since creation.
    pub fn triggers(&self) -> u64 {
        self.triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{SilentBackend, SilentClip};
    use crate::error::Error;

    #[test]
    fn test_one_shot_voice_has_reserved_priority() {
        let mut backend = SilentBackend::new();
        let channel = OneShotChannel::<SilentClip>::new(&mut backend).unwrap();

        assert_eq!(channel.voice().priority(), ONE_SHOT_PRIORITY);
        assert_eq!(backend.voice(channel.voice().id()).unwrap().priority, 0);
        assert!(!channel.voice().is_looping());
    }

    #[test]
    fn test_triggers_overlap() {
        let mut backend = SilentBackend::new();
        let mut channel = OneShotChannel::new(&mut backend).unwrap();
        let whizz = SilentClip::new("whizz");
        let horn = SilentClip::new("car_horn");

        channel.play(&mut backend, &whizz, 1.0).unwrap();
        channel.play(&mut backend, &horn, 0.5).unwrap();
        channel.play(&mut backend, &whizz, 1.0).unwrap();

        let state = backend.voice(channel.voice().id()).unwrap();
        assert_eq!(state.layers, 3);
        assert!(state.playing);
        assert_eq!(channel.triggers(), 3);
    }

    #[test]
    fn test_stop_all_silences_every_layer() {
        let mut backend = SilentBackend::new();
        let mut channel = OneShotChannel::new(&mut backend).unwrap();
        let clip = SilentClip::new("code_red");

        channel.play(&mut backend, &clip, 1.0).unwrap();
        channel.play(&mut backend, &clip, 1.0).unwrap();
        channel.stop_all(&mut backend);

        let state = backend.voice(channel.voice().id()).unwrap();
        assert_eq!(state.layers, 0);
        assert!(!channel.voice().is_playing());

        // The channel stays usable after a stop.
        channel.play(&mut backend, &clip, 1.0).unwrap();
        assert!(channel.voice().is_playing());
    }

    #[test]
    fn test_invalid_volume_fires_nothing() {
        let mut backend = SilentBackend::new();
        let mut channel = OneShotChannel::new(&mut backend).unwrap();

        let result = channel.play(&mut backend, &SilentClip::new("x"), 2.0);
        assert!(matches!(result, Err(Error::InvalidVolume(_))));
        assert_eq!(backend.voice(channel.voice().id()).unwrap().layers, 0);
        assert_eq!(channel.triggers(), 0);
    }

    #[test]
    fn test_playing_flag_is_cleared_only_by_stop() {
        let mut backend = SilentBackend::new();
        let mut channel = OneShotChannel::new(&mut backend).unwrap();
        assert!(!channel.voice().is_playing());

        channel.play(&mut backend, &SilentClip::new("whizz"), 1.0).unwrap();
        // Layers finishing on their own leave the flag set.
        backend.stop_voice(channel.voice().id());
        assert!(channel.voice().is_playing());

        channel.stop_all(&mut backend);
        assert!(!channel.voice().is_playing());
    }
}
