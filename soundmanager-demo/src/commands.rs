//! Text commands the demo reads from stdin.

use anyhow::{anyhow, bail, Context, Result};
use soundmanager_core::backend::AudioBackend;
use soundmanager_core::channels::DEFAULT_VOLUME;

use crate::state::DemoState;

pub const HELP: &str = "\
commands:
  one-shot <clip> [volume]               play a one-shot effect
  loop <clip> <key> <priority> [volume]  start or restart a looping sound (priority 1-255)
  stop <key>                             stop a looping sound
  stop-loops                             stop all looping sounds
  stop-one-shots                         stop all one-shot effects
  clips                                  list loaded clips
  status                                 print the manager state as JSON
  help                                   show this text
  quit                                   exit";

/// A parsed demo command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    OneShot { clip: String, volume: f32 },
    Loop { clip: String, key: String, priority: i32, volume: f32 },
    Stop { key: String },
    StopLoops,
    StopOneShots,
    Clips,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            ["one-shot", clip] => Command::OneShot {
                clip: clip.to_string(),
                volume: DEFAULT_VOLUME,
            },
            ["one-shot", clip, volume] => Command::OneShot {
                clip: clip.to_string(),
                volume: parse_volume(volume)?,
            },
            ["loop", clip, key, priority] => Command::Loop {
                clip: clip.to_string(),
                key: key.to_string(),
                priority: parse_priority(priority)?,
                volume: DEFAULT_VOLUME,
            },
            ["loop", clip, key, priority, volume] => Command::Loop {
                clip: clip.to_string(),
                key: key.to_string(),
                priority: parse_priority(priority)?,
                volume: parse_volume(volume)?,
            },
            ["stop", key] => Command::Stop {
                key: key.to_string(),
            },
            ["stop-loops"] => Command::StopLoops,
            ["stop-one-shots"] => Command::StopOneShots,
            ["clips"] => Command::Clips,
            ["status"] => Command::Status,
            ["help"] => Command::Help,
            ["quit"] | ["exit"] => Command::Quit,
            [name, ..] => bail!("Unknown command or wrong arguments: '{}' (try 'help')", name),
            [] => return Ok(None),
        };
        Ok(Some(command))
    }
}

fn parse_volume(text: &str) -> Result<f32> {
    text.parse::<f32>()
        .with_context(|| format!("Invalid volume '{}'", text))
}

fn parse_priority(text: &str) -> Result<i32> {
    text.parse::<i32>()
        .with_context(|| format!("Invalid priority '{}'", text))
}

/// Runs a command against the demo state and returns the text to print.
pub fn execute<B: AudioBackend>(state: &mut DemoState<B>, command: &Command) -> Result<String> {
    let output = match command {
        Command::OneShot { clip, volume } => {
            state.play_one_shot(clip, *volume)?;
            format!("fired {}", clip)
        }
        Command::Loop {
            clip,
            key,
            priority,
            volume,
        } => {
            state.play_looping(clip, key, *priority, *volume)?;
            format!("looping {} as '{}'", clip, key)
        }
        Command::Stop { key } => {
            state.stop_looping(key)?;
            format!("stopped '{}'", key)
        }
        Command::StopLoops => {
            let count = state.stop_all_looping()?;
            format!("stopped {} looping sound(s)", count)
        }
        Command::StopOneShots => {
            state.stop_all_one_shot();
            "stopped one-shot sounds".to_string()
        }
        Command::Clips => state.clip_names().join("\n"),
        Command::Status => serde_json::to_string_pretty(&state.status())
            .map_err(|e| anyhow!("Failed to serialize status: {}", e))?,
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(output)
}
