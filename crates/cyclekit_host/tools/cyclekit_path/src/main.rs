use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cyclekit_path::config::{print_usage, Config, Mode};
use cyclekit_path::render;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_args().context("parse arguments")?;
    if config.mode == Mode::Help {
        print_usage();
        return Ok(());
    }

    info!(mode = ?config.mode, "resolving");
    let lines = render(&config.mode).with_context(|| format!("resolve {:?}", config.mode))?;
    for line in lines {
        println!("{line}");
    }

    Ok(())
}
