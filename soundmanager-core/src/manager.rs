//! The sound manager facade callers talk to.

use serde::Serialize;

use crate::backend::AudioBackend;
use crate::channels::{LoopingSoundRegistry, OneShotChannel, VoicePool, LOOP_BASE_PRIORITY};
use crate::config::{SoundManagerConfig, DEFAULT_LOOPING_VOICES};
use crate::error::Result;

/// Plays one-shot effects and keyed looping sounds over a fixed set of voices.
///
/// The manager owns its backend. All voices are created in the constructor and
/// live as long as the manager; the looping pool never grows. The backend is only
/// reachable read-only, so voices can't be started or stopped behind the registry:
///
/// ```compile_fail
/// use soundmanager_core::backend::SilentBackend;
/// use soundmanager_core::manager::SoundManager;
///
/// let mut manager = SoundManager::new(SilentBackend::new()).unwrap();
/// manager.backend_mut();
/// ```
pub struct SoundManager<B: AudioBackend> {
    backend: B,
    one_shot: OneShotChannel<B::Clip>,
    looping: LoopingSoundRegistry<B::Clip>,
}

impl<B: AudioBackend> SoundManager<B> {
    /// Creates a manager with the default 32 looping voices.
    pub fn new(backend: B) -> Result<Self> {
        Self::with_capacity(backend, DEFAULT_LOOPING_VOICES)
    }

    /// Creates a manager sized from a loaded config.
    pub fn from_config(backend: B, config: &SoundManagerConfig) -> Result<Self> {
        Self::with_capacity(backend, config.looping_voices)
    }

    /// Creates a manager with `looping_voices` voices in the looping pool.
    pub fn with_capacity(mut backend: B, looping_voices: usize) -> Result<Self> {
        let one_shot = OneShotChannel::new(&mut backend)?;
        let pool = VoicePool::new(&mut backend, looping_voices, LOOP_BASE_PRIORITY)?;

        Ok(Self {
            backend,
            one_shot,
            looping: LoopingSoundRegistry::new(pool),
        })
    }

    /// Plays a non-looping effect. Overlaps anything already playing as a one-shot.
    pub fn play_one_shot(&mut self, clip: &B::Clip, volume: f32) -> Result<()> {
        self.one_shot.play(&mut self.backend, clip, volume)
    }

    /// Stops all one-shot effects.
    pub fn stop_all_one_shot(&mut self) {
        self.one_shot.stop_all(&mut self.backend);
    }

    /// Plays `clip` on its own looping voice identified by `key`.
    ///
    /// `priority` must be in 1-255 (0 is reserved for one-shots; lower values are
    /// less likely to be mixed out). Playing a key that is already active restarts
    /// it from the beginning with the new clip, priority and volume.
    pub fn play_looping(
        &mut self,
        clip: &B::Clip,
        key: &str,
        priority: i32,
        volume: f32,
    ) -> Result<()> {
        self.looping
            .play(&mut self.backend, key, clip, priority, volume)
    }

    /// Stops the looping sound for `key`. Fails with `NotPlaying` if it isn't active.
    pub fn stop_looping(&mut self, key: &str) -> Result<()> {
        self.looping.stop(&mut self.backend, key)
    }

    /// Stops all looping sounds and returns how many were stopped.
    pub fn stop_all_looping(&mut self) -> Result<usize> {
        self.looping.stop_all(&mut self.backend)
    }

    /// Stops everything, one-shots and loops.
    pub fn stop_all(&mut self) -> Result<usize> {
        self.stop_all_one_shot();
        self.stop_all_looping()
    }

    pub fn is_looping(&self, key: &str) -> bool {
        self.looping.contains(key)
    }

    /// Active loop keys, sorted.
    pub fn active_loop_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.looping.keys().map(str::to_string).collect();
        keys.sort();
        keys
    }

    pub fn free_voice_count(&self) -> usize {
        self.looping.pool().free_count()
    }

    /// Size of the looping voice pool.
    pub fn capacity(&self) -> usize {
        self.looping.pool().capacity()
    }

    /// Returns a serializable snapshot of the manager's state.
    pub fn status(&self) -> ManagerStatus {
        let mut looping: Vec<LoopStatus> = self
            .looping
            .entries()
            .map(|(key, voice)| LoopStatus {
                key: key.to_string(),
                voice: voice.id().index(),
                priority: voice.priority(),
                volume: voice.volume(),
            })
            .collect();
        looping.sort_by(|a, b| a.key.cmp(&b.key));

        ManagerStatus {
            backend: self.backend.name().to_string(),
            capacity: self.capacity(),
            free_voices: self.free_voice_count(),
            looping,
            one_shot_triggers: self.one_shot.triggers(),
        }
    }

    pub fn looping(&self) -> &LoopingSoundRegistry<B::Clip> {
        &self.looping
    }

    pub fn one_shot(&self) -> &OneShotChannel<B::Clip> {
        &self.one_shot
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Snapshot of the manager for display or serialization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ManagerStatus {
    pub backend: String,
    pub capacity: usize,
    pub free_voices: usize,
    pub looping: Vec<LoopStatus>,
    pub one_shot_triggers: u64,
}

/// One active looping sound.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoopStatus {
    pub key: String,
    pub voice: usize,
    pub priority: u8,
    pub volume: f32,
}

impl<B: AudioBackend> Drop for SoundManager<B> {
    fn drop(&mut self) {
        if let Err(e) = self.stop_all() {
            tracing::warn!("Failed to stop sounds on shutdown: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{SilentBackend, SilentClip};
    use crate::channels::DEFAULT_VOLUME;
    use crate::error::Error;

    fn manager(capacity: usize) -> SoundManager<SilentBackend> {
        SoundManager::with_capacity(SilentBackend::new(), capacity).unwrap()
    }

    fn assert_pool_invariant(manager: &SoundManager<SilentBackend>) {
        assert_eq!(
            manager.free_voice_count() + manager.looping().len(),
            manager.capacity()
        );
    }

    #[test]
    fn test_default_capacity() {
        let manager = SoundManager::new(SilentBackend::new()).unwrap();
        assert_eq!(manager.capacity(), 32);
        assert_eq!(manager.free_voice_count(), 32);
        // 32 looping voices plus the one-shot voice.
        assert_eq!(manager.backend().voice_count(), 33);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = SoundManager::with_capacity(SilentBackend::new(), 0);
        assert!(matches!(result, Err(Error::InvalidCapacity)));
    }

    #[test]
    fn test_from_config() {
        let config = SoundManagerConfig {
            looping_voices: 5,
            ..Default::default()
        };
        let manager = SoundManager::from_config(SilentBackend::new(), &config).unwrap();
        assert_eq!(manager.capacity(), 5);
    }

    #[test]
    fn test_idempotent_restart() {
        let mut manager = manager(4);
        let clip_a = SilentClip::new("a");
        let clip_b = SilentClip::new("b");

        manager.play_looping(&clip_a, "k", 5, DEFAULT_VOLUME).unwrap();
        manager.play_looping(&clip_b, "k", 9, DEFAULT_VOLUME).unwrap();

        assert_eq!(manager.active_loop_keys(), vec!["k".to_string()]);
        let voice = manager.looping().get("k").unwrap();
        assert_eq!(voice.clip(), Some(&clip_b));
        assert_eq!(voice.priority(), 9);
        assert_eq!(manager.free_voice_count(), 3);
        assert_pool_invariant(&manager);
    }

    #[test]
    fn test_exhaustion_then_recovery() {
        let mut manager = manager(32);
        let clip = SilentClip::new("loop");

        for i in 0..32 {
            manager
                .play_looping(&clip, &format!("loop-{}", i), 1, DEFAULT_VOLUME)
                .unwrap();
            assert_pool_invariant(&manager);
        }
        let result = manager.play_looping(&clip, "one-too-many", 1, DEFAULT_VOLUME);
        assert!(matches!(result, Err(Error::AllVoicesBusy(32))));
        assert_eq!(manager.free_voice_count(), 0);

        manager.stop_looping("loop-7").unwrap();
        manager
            .play_looping(&clip, "one-too-many", 1, DEFAULT_VOLUME)
            .unwrap();
        assert!(manager.is_looping("one-too-many"));
        assert!(!manager.is_looping("loop-7"));
        assert_pool_invariant(&manager);
    }

    #[test]
    fn test_round_trip_restores_pool() {
        let mut manager = manager(4);
        let before = manager.status();

        manager
            .play_looping(&SilentClip::new("x"), "x", 1, DEFAULT_VOLUME)
            .unwrap();
        manager.stop_looping("x").unwrap();

        assert_eq!(manager.status(), before);
        assert!(matches!(manager.stop_looping("x"), Err(Error::NotPlaying(_))));
    }

    #[test]
    fn test_priority_boundaries() {
        let mut manager = manager(4);
        let clip = SilentClip::new("p");

        assert!(matches!(
            manager.play_looping(&clip, "low", 0, DEFAULT_VOLUME),
            Err(Error::InvalidPriority(0))
        ));
        assert!(matches!(
            manager.play_looping(&clip, "high", 256, DEFAULT_VOLUME),
            Err(Error::InvalidPriority(256))
        ));
        assert_eq!(manager.free_voice_count(), 4);

        manager.play_looping(&clip, "low", 1, DEFAULT_VOLUME).unwrap();
        manager.play_looping(&clip, "high", 255, DEFAULT_VOLUME).unwrap();
        assert_eq!(manager.free_voice_count(), 2);
    }

    #[test]
    fn test_stop_all_looping() {
        let mut manager = manager(6);
        let clip = SilentClip::new("loop");
        for key in ["squeaky", "bell", "funk"] {
            manager.play_looping(&clip, key, 2, 0.7).unwrap();
        }

        assert_eq!(manager.stop_all_looping().unwrap(), 3);
        assert!(manager.active_loop_keys().is_empty());
        assert_eq!(manager.free_voice_count(), 6);
    }

    #[test]
    fn test_one_shots_leave_pool_alone() {
        let mut manager = manager(3);
        let loop_clip = SilentClip::new("bell");
        manager.play_looping(&loop_clip, "bell", 2, DEFAULT_VOLUME).unwrap();
        let before = manager.status();

        let whizz = SilentClip::new("whizz");
        manager.play_one_shot(&whizz, DEFAULT_VOLUME).unwrap();
        manager.play_one_shot(&whizz, 0.3).unwrap();
        manager.stop_all_one_shot();

        let after = manager.status();
        assert_eq!(after.free_voices, before.free_voices);
        assert_eq!(after.looping, before.looping);
        assert_eq!(after.one_shot_triggers, 2);

        // The looping voice keeps playing after one-shots are stopped.
        let id = manager.looping().get("bell").unwrap().id();
        assert!(manager.backend().voice(id).unwrap().playing);
    }

    #[test]
    fn test_stop_all_loops_keep_one_shots() {
        let mut manager = manager(2);
        manager
            .play_one_shot(&SilentClip::new("horn"), DEFAULT_VOLUME)
            .unwrap();
        manager
            .play_looping(&SilentClip::new("funk"), "funk", 3, DEFAULT_VOLUME)
            .unwrap();

        manager.stop_all_looping().unwrap();

        let shot = manager.one_shot().voice().id();
        assert!(manager.backend().voice(shot).unwrap().playing);
    }

    #[test]
    fn test_status_snapshot() {
        let mut manager = manager(4);
        manager.play_looping(&SilentClip::new("b"), "beta", 4, 0.5).unwrap();
        manager.play_looping(&SilentClip::new("a"), "alpha", 2, 1.0).unwrap();

        let status = manager.status();
        assert_eq!(status.backend, "silent");
        assert_eq!(status.capacity, 4);
        assert_eq!(status.free_voices, 2);
        let keys: Vec<&str> = status.looping.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "beta"]);
        assert_eq!(status.looping[1].priority, 4);
        let alpha = manager.looping().get("alpha").unwrap().id();
        assert_eq!(status.looping[0].voice, alpha.index());

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["free_voices"], 2);
        assert_eq!(json["looping"][0]["key"], "alpha");
    }

    #[test]
    fn test_registry_matches_backend_voices() {
        let mut manager = manager(3);
        let bell = SilentClip::new("bell");
        let funk = SilentClip::new("funk");

        manager.play_looping(&bell, "bell", 2, DEFAULT_VOLUME).unwrap();
        manager.play_looping(&funk, "funk", 3, 0.5).unwrap();
        manager.play_looping(&funk, "bell", 4, 0.8).unwrap();
        let funk_id = manager.looping().get("funk").unwrap().id();
        manager.stop_looping("funk").unwrap();

        for status in manager.status().looping {
            let voice = manager.looping().get(&status.key).unwrap();
            assert_eq!(voice.id().index(), status.voice);
            let state = manager.backend().voice(voice.id()).unwrap();
            assert!(state.playing);
            assert_eq!(state.priority, status.priority);
            assert_eq!(state.clip.as_ref(), voice.clip());
        }
        assert!(!manager.backend().voice(funk_id).unwrap().playing);
        assert_eq!(manager.backend().playing_count(), 1);
    }
}
