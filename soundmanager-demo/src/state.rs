//! Demo state: the sound manager and the clips it can play.

use soundmanager_core::backend::AudioBackend;
use soundmanager_core::config::SoundManagerConfig;
use soundmanager_core::library::ClipLibrary;
use soundmanager_core::manager::{ManagerStatus, SoundManager};
use soundmanager_core::Result;

/// Everything the command loop needs.
pub struct DemoState<B: AudioBackend> {
    manager: SoundManager<B>,
    library: ClipLibrary<B::Clip>,
}

impl<B: AudioBackend> DemoState<B> {
    /// Loads the configured clips and builds the manager.
    ///
    /// Clips whose files are missing or undecodable are skipped with a warning so
    /// the rest of the demo still works.
    pub fn new(mut backend: B, config: &SoundManagerConfig) -> Result<Self> {
        let mut library = ClipLibrary::new(config.resolved_sound_root());
        for clip in &config.clips {
            if let Err(e) = library.load(&mut backend, clip) {
                tracing::warn!("Skipping clip '{}': {}", clip.name, e);
            }
        }
        tracing::info!(
            "{} of {} clips available from {}",
            library.len(),
            config.clips.len(),
            library.root().display()
        );

        let manager = SoundManager::from_config(backend, config)?;
        Ok(Self { manager, library })
    }

    /// Builds state from an already-populated library.
    pub fn with_library(manager: SoundManager<B>, library: ClipLibrary<B::Clip>) -> Self {
        Self { manager, library }
    }

    fn clip(&self, name: &str) -> Result<B::Clip> {
        self.library.get(name).cloned()
    }

    pub fn play_one_shot(&mut self, clip: &str, volume: f32) -> Result<()> {
        let clip = self.clip(clip)?;
        self.manager.play_one_shot(&clip, volume)
    }

    pub fn play_looping(&mut self, clip: &str, key: &str, priority: i32, volume: f32) -> Result<()> {
        let clip = self.clip(clip)?;
        self.manager.play_looping(&clip, key, priority, volume)
    }

    pub fn stop_looping(&mut self, key: &str) -> Result<()> {
        self.manager.stop_looping(key)
    }

    pub fn stop_all_looping(&mut self) -> Result<usize> {
        self.manager.stop_all_looping()
    }

    pub fn stop_all_one_shot(&mut self) {
        self.manager.stop_all_one_shot();
    }

    pub fn status(&self) -> ManagerStatus {
        self.manager.status()
    }

    pub fn clip_names(&self) -> Vec<&str> {
        self.library.names()
    }

    pub fn manager(&self) -> &SoundManager<B> {
        &self.manager
    }

    /// Stops everything before exit.
    pub fn cleanup(&mut self) {
        match self.manager.stop_all() {
            Ok(count) => tracing::info!("Stopped {} looping sound(s) on exit", count),
            Err(e) => tracing::warn!("Cleanup failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundmanager_core::backend::SilentBackend;
    use soundmanager_core::config::ConfigLoader;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_clip_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sounds")).unwrap();
        fs::write(dir.path().join("sounds").join("bell.ogg"), b"").unwrap();

        let config_path = dir.path().join("demo.yaml");
        fs::write(
            &config_path,
            r#"
looping_voices: 4
clips:
  - name: bell
    file: bell.ogg
  - name: code_red
    file: code_red.wav
"#,
        )
        .unwrap();
        let config = ConfigLoader::new(&config_path).load().unwrap();

        let mut state = DemoState::new(SilentBackend::new(), &config).unwrap();

        assert_eq!(state.clip_names(), vec!["bell"]);
        assert_eq!(state.manager().capacity(), 4);
        state.play_looping("bell", "bell", 2, 1.0).unwrap();
        assert!(state.play_one_shot("code_red", 1.0).is_err());
    }
}
