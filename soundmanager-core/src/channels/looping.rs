//! Keyed looping sounds backed by the voice pool.

use std::collections::HashMap;

use crate::backend::AudioBackend;
use crate::channels::pool::VoicePool;
use crate::channels::voice::{validate_loop_priority, validate_volume, Voice};
use crate::error::{Error, Result};

/// Binds caller-chosen keys to the pool voices playing them.
///
/// A key holds exactly one voice while its sound is active. Playing an active key
/// again restarts that voice in place; stopping it sends the voice back to the pool.
#[derive(Debug)]
pub struct LoopingSoundRegistry<C> {
    pool: VoicePool<C>,
    active: HashMap<String, Voice<C>>,
}

impl<C: Clone> LoopingSoundRegistry<C> {
    pub fn new(pool: VoicePool<C>) -> Self {
        let capacity = pool.capacity();
        Self {
            pool,
            active: HashMap::with_capacity(capacity),
        }
    }

    /// Starts (or restarts) the looping sound for `key`.
    ///
    /// Fails with `InvalidPriority`, `InvalidVolume` or `AllVoicesBusy` without
    /// touching any voice. There is no preemption: when the pool is exhausted the
    /// caller has to stop another loop first.
    pub fn play<B>(
        &mut self,
        backend: &mut B,
        key: &str,
        clip: &C,
        priority: i32,
        volume: f32,
    ) -> Result<()>
    where
        B: AudioBackend<Clip = C>,
    {
        let priority = validate_loop_priority(priority)?;
        let volume = validate_volume(volume)?;

        if self.active.contains_key(key) {
            return self.restart(backend, key, clip, priority, volume);
        }

        let mut voice = self.pool.acquire().map_err(|e| {
            tracing::warn!("Cannot start looping sound '{}': {}", key, e);
            e
        })?;
        voice.assign_loop(clip.clone(), priority, volume);

        if let Err(e) = start(backend, &mut voice) {
            backend.stop_voice(voice.id());
            self.pool.release(voice)?;
            return Err(e);
        }

        tracing::info!(
            "Started looping sound '{}' on voice {} (priority {}, volume {:.2})",
            key,
            voice.id(),
            priority,
            volume
        );
        self.active.insert(key.to_string(), voice);
        Ok(())
    }

    fn restart<B>(
        &mut self,
        backend: &mut B,
        key: &str,
        clip: &C,
        priority: u8,
        volume: f32,
    ) -> Result<()>
    where
        B: AudioBackend<Clip = C>,
    {
        let result = match self.active.get_mut(key) {
            Some(voice) => {
                voice.assign_loop(clip.clone(), priority, volume);
                start(backend, voice).map(|_| voice.id())
            }
            None => return Err(Error::NotPlaying(key.to_string())),
        };

        match result {
            Ok(id) => {
                tracing::info!(
                    "Restarted looping sound '{}' on voice {} (priority {}, volume {:.2})",
                    key,
                    id,
                    priority,
                    volume
                );
                Ok(())
            }
            Err(e) => {
                // The old sound is gone, so the key must not keep claiming the voice.
                self.stop(backend, key)?;
                Err(e)
            }
        }
    }

    /// Stops the looping sound for `key` and frees its voice.
    pub fn stop<B>(&mut self, backend: &mut B, key: &str) -> Result<()>
    where
        B: AudioBackend<Clip = C>,
    {
        let voice = self.active.remove(key).ok_or_else(|| {
            tracing::warn!("Tried to stop looping sound '{}' while it was not playing", key);
            Error::NotPlaying(key.to_string())
        })?;

        backend.stop_voice(voice.id());
        let id = voice.id();
        self.pool.release(voice)?;

        tracing::info!("Stopped looping sound '{}' (voice {})", key, id);
        Ok(())
    }

    /// Stops every active looping sound. Returns how many were stopped.
    pub fn stop_all<B>(&mut self, backend: &mut B) -> Result<usize>
    where
        B: AudioBackend<Clip = C>,
    {
        let keys: Vec<String> = self.active.keys().cloned().collect();
        for key in &keys {
            self.stop(backend, key)?;
        }
        Ok(keys.len())
    }
}

impl<C> LoopingSoundRegistry<C> {
    /// Returns the voice playing `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Voice<C>> {
        self.active.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.active.contains_key(key)
    }

    /// Active keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.active.keys().map(String::as_str)
    }

    /// Active (key, voice) pairs in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Voice<C>)> {
        self.active.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn pool(&self) -> &VoicePool<C> {
        &self.pool
    }
}

fn start<B: AudioBackend>(backend: &mut B, voice: &mut Voice<B::Clip>) -> Result<()> {
    backend.start_voice(voice)?;
    voice.set_playing(true);
    Ok(())
}
