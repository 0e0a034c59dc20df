//! Named clips loaded up front from the config.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::backend::AudioBackend;
use crate::config::{ClipConfig, SoundManagerConfig};
use crate::error::{Error, Result};

/// Clips loaded through a backend, looked up by name.
pub struct ClipLibrary<C> {
    root: PathBuf,
    clips: HashMap<String, C>,
}

impl<C: Clone> ClipLibrary<C> {
    /// Creates an empty library resolving relative paths against `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            clips: HashMap::new(),
        }
    }

    /// Loads every clip listed in the config. Stops at the first clip that fails.
    pub fn from_config<B>(backend: &mut B, config: &SoundManagerConfig) -> Result<Self>
    where
        B: AudioBackend<Clip = C>,
    {
        let mut library = Self::new(config.resolved_sound_root());
        for clip in &config.clips {
            library.load(backend, clip)?;
        }
        tracing::info!(
            "Loaded {} clips from {}",
            library.len(),
            library.root.display()
        );
        Ok(library)
    }

    /// Loads one clip and registers it under its name, replacing any earlier clip.
    pub fn load<B>(&mut self, backend: &mut B, clip: &ClipConfig) -> Result<()>
    where
        B: AudioBackend<Clip = C>,
    {
        let path = self.resolve_path(&clip.file)?;
        let data = backend.load_clip(&path)?;
        tracing::debug!("Loaded clip '{}' from {}", clip.name, path.display());
        self.clips.insert(clip.name.clone(), data);
        Ok(())
    }

    /// Registers an already-loaded clip.
    pub fn insert(&mut self, name: &str, clip: C) {
        self.clips.insert(name.to_string(), clip);
    }

    /// Returns the clip registered under `name`.
    pub fn get(&self, name: &str) -> Result<&C> {
        self.clips
            .get(name)
            .ok_or_else(|| Error::UnknownClip(name.to_string()))
    }

    /// Clip names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.clips.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a file path, handling both absolute and relative paths.
    /// Search order: absolute → root → root/sounds → error
    fn resolve_path(&self, file: &str) -> Result<PathBuf> {
        let path = Path::new(file);
        if path.is_absolute() {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(Error::ClipNotFound(file.to_string()));
        }

        let rel_path = self.root.join(file);
        if rel_path.exists() {
            return Ok(rel_path);
        }

        let sounds_path = self.root.join("sounds").join(file);
        if sounds_path.exists() {
            return Ok(sounds_path);
        }

        Err(Error::ClipNotFound(file.to_string()))
    }
}
