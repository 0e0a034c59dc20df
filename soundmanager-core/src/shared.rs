//! Thread-safe handle for hosts that call into the manager from several threads.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::AudioBackend;
use crate::error::{Error, Result};
use crate::manager::{ManagerStatus, SoundManager};

/// Cloneable handle to a [`SoundManager`] behind a single mutex.
///
/// Every call holds the lock for the whole check-then-mutate sequence, so key
/// lookup, voice acquire/release and bind/unbind never interleave across threads.
pub struct SharedSoundManager<B: AudioBackend> {
    inner: Arc<Mutex<SoundManager<B>>>,
}

impl<B: AudioBackend> Clone for SharedSoundManager<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: AudioBackend> SharedSoundManager<B> {
    pub fn new(manager: SoundManager<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SoundManager<B>>> {
        self.inner.lock().map_err(|_| Error::Lock)
    }

    /// Runs `f` with exclusive access to the manager. Several calls made inside `f`
    /// see no interleaved changes from other threads.
    pub fn with<R>(&self, f: impl FnOnce(&mut SoundManager<B>) -> R) -> Result<R> {
        let mut manager = self.lock()?;
        Ok(f(&mut manager))
    }

    pub fn play_one_shot(&self, clip: &B::Clip, volume: f32) -> Result<()> {
        self.lock()?.play_one_shot(clip, volume)
    }

    pub fn stop_all_one_shot(&self) -> Result<()> {
        self.lock()?.stop_all_one_shot();
        Ok(())
    }

    pub fn play_looping(&self, clip: &B::Clip, key: &str, priority: i32, volume: f32) -> Result<()> {
        self.lock()?.play_looping(clip, key, priority, volume)
    }

    pub fn stop_looping(&self, key: &str) -> Result<()> {
        self.lock()?.stop_looping(key)
    }

    pub fn stop_all_looping(&self) -> Result<usize> {
        self.lock()?.stop_all_looping()
    }

    pub fn status(&self) -> Result<ManagerStatus> {
        Ok(self.lock()?.status())
    }
}
