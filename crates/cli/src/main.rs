use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use stockroom_infra::{InventoryStore, JsonFileSnapshotStore, SystemClock};

mod args;
mod commands;
mod config;

use args::{Cli, Command};
use config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    stockroom_observability::init(cli.global.log_format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // The import job never touches the store.
    if let Command::ImportSheet { grid } = &cli.command {
        return commands::sheet(grid, &mut out);
    }

    let config = Config::from_args(&cli.global);
    tracing::debug!(data_dir = %config.data_dir.display(), slot = %config.slot, "configuration resolved");

    let snapshots = JsonFileSnapshotStore::new(&config.data_dir, &config.slot);
    let path = snapshots.path().to_path_buf();
    let mut store = InventoryStore::open(snapshots, Arc::new(SystemClock))
        .with_context(|| format!("failed to open inventory slot {}", path.display()))?;

    commands::run(cli.command, &mut store, &config, &mut out)
}
