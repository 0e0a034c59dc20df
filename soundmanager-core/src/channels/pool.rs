//! Fixed-size pool of voices reserved for looping sounds.

use std::collections::HashSet;

use crate::backend::AudioBackend;
use crate::channels::voice::{Voice, VoiceId};
use crate::error::{Error, Result};

/// Voices partitioned into a free list and an in-use set.
///
/// The pool is sized once at construction and never grows. Acquired voices
/// leave the free list by value and must come back through [`VoicePool::release`].
#[derive(Debug)]
pub struct VoicePool<C> {
    free: Vec<Voice<C>>,
    in_use: HashSet<VoiceId>,
    members: HashSet<VoiceId>,
    capacity: usize,
}

impl<C> VoicePool<C> {
    /// Creates `capacity` voices on the backend, all free and set to `base_priority`.
    pub fn new<B>(backend: &mut B, capacity: usize, base_priority: u8) -> Result<Self>
    where
        B: AudioBackend<Clip = C>,
    {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        let mut free = Vec::with_capacity(capacity);
        let mut members = HashSet::with_capacity(capacity);
        for _ in 0..capacity {
            let id = backend.create_voice(base_priority)?;
            members.insert(id);
            free.push(Voice::new(id, base_priority));
        }

        tracing::info!(
            "Created voice pool with {} voices on {} backend",
            capacity,
            backend.name()
        );

        Ok(Self {
            free,
            in_use: HashSet::with_capacity(capacity),
            members,
            capacity,
        })
    }

    /// Takes any free voice.
    pub fn acquire(&mut self) -> Result<Voice<C>> {
        let voice = self
            .free
            .pop()
            .ok_or(Error::AllVoicesBusy(self.capacity))?;
        self.in_use.insert(voice.id());
        Ok(voice)
    }

    /// Returns a voice to the free list. Playback must already be stopped.
    pub fn release(&mut self, mut voice: Voice<C>) -> Result<()> {
        let id = voice.id();
        if !self.members.contains(&id) || !self.in_use.remove(&id) {
            debug_assert!(false, "released voice {} that is not in use by this pool", id);
            return Err(Error::VoiceNotInUse(id.0));
        }
        voice.set_playing(false);
        self.free.push(voice);
        Ok(())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }
}
