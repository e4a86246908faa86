use anyhow::Context;
use clap::Parser;
use std::io;
use tracing::info;
use blooms_console::cli::Cli;
use blooms_console::{telemetry, Console, Shop};
use blooms_core::SystemClock;
use blooms_store::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    let _log_guard = telemetry::init(&config).context("Failed to set up logging")?;
    info!(data_dir = %config.storage.data_dir.display(), "Starting Beautiful Blooms");

    let (mut shop, notices) = Shop::open(&config, Box::new(SystemClock));

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    blooms_console::run(&mut shop, &mut console, &notices).context("Console session failed")?;
    Ok(())
}
