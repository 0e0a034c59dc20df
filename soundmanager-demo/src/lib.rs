//! Line-driven demo for the sound manager.
//!
//! Stands in for a game's UI: each stdin line triggers one manager call, the way
//! buttons would. See `commands::HELP` for the command list.

mod commands;
mod state;

pub use commands::*;
pub use state::*;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use soundmanager_core::backend::{AudioBackend, KiraBackend, SilentBackend};
use soundmanager_core::config::{ConfigLoader, SoundManagerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG: &str = "demo.yaml";

/// Installs the fmt subscriber, filtered by `RUST_LOG` with INFO as the floor.
pub fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        );

    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Runs the demo: loads the config, opens audio output and serves stdin commands.
pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = ConfigLoader::new(config_path)
        .load_or_default()
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let stdin = io::stdin();
    serve_or_silent(KiraBackend::new(), &config, stdin.lock(), io::stdout())
}

/// Serves commands on `backend`, or on a [`SilentBackend`] if it failed to open.
pub fn serve_or_silent<B, R, W>(
    backend: soundmanager_core::Result<B>,
    config: &SoundManagerConfig,
    input: R,
    out: W,
) -> anyhow::Result<()>
where
    B: AudioBackend,
    R: BufRead,
    W: Write,
{
    match backend {
        Ok(backend) => serve(backend, config, input, out),
        Err(e) => {
            tracing::warn!(
                "No audio output device detected ({}). Sound playback will be disabled.",
                e
            );
            serve(SilentBackend::new(), config, input, out)
        }
    }
}

fn serve<B, R, W>(backend: B, config: &SoundManagerConfig, input: R, mut out: W) -> anyhow::Result<()>
where
    B: AudioBackend,
    R: BufRead,
    W: Write,
{
    let mut state = DemoState::new(backend, config)?;
    writeln!(out, "{}", HELP)?;
    let result = serve_io(&mut state, input, out);
    state.cleanup();
    result
}

/// Reads commands from `input` until EOF or `quit`, writing replies to `out`.
///
/// A bad line or a failed command prints `error: ...` and the loop carries on.
pub fn serve_io<B, R, W>(state: &mut DemoState<B>, input: R, mut out: W) -> anyhow::Result<()>
where
    B: AudioBackend,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {:#}", e)?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        match execute(state, &command) {
            Ok(output) if output.is_empty() => {}
            Ok(output) => writeln!(out, "{}", output)?,
            Err(e) => writeln!(out, "error: {:#}", e)?,
        }
        out.flush()?;
    }
    Ok(())
}
