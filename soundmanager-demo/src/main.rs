use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    soundmanager_demo::init_tracing();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(soundmanager_demo::DEFAULT_CONFIG));

    soundmanager_demo::run(&config_path)
}
