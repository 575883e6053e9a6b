use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use super::{Cli, Commands};
use crate::app::{self, StartPage};
use crate::cli_cmds::*;
use crate::lock::InstanceLock;
use crate::logging;
use crate::paths::Paths;
use crate::services::Services;

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve();

    let interactive = cli.command.is_none() && !cli.shuffle;
    let log_file = interactive.then(|| paths.log_file());
    logging::init_tracing(cli.verbose, log_file.as_deref());

    if cli.shuffle {
        // Headless: report problems in the log, never through the exit code
        let services = Services::start(paths, cli.dry_run);
        if let Err(err) = cmd_shuffle(&services) {
            warn!("shuffle failed: {err:#}");
        }
        services.shutdown().await;
        return Ok(());
    }

    let Some(command) = cli.command else {
        let Some(_lock) = InstanceLock::acquire(&paths.runtime_dir) else {
            info!("another wallpick instance is running");
            return Ok(());
        };
        let services = Services::start(paths, cli.dry_run);
        let page = if cli.settings {
            StartPage::Settings
        } else {
            StartPage::Grid
        };
        return app::run_tui(services, page).await;
    };

    let services = Services::start(paths, cli.dry_run);
    let result = dispatch(command, &services).await;
    services.shutdown().await;
    result
}

async fn dispatch(command: Commands, services: &Services) -> Result<()> {
    match command {
        Commands::List { sort, max, long } => {
            cmd_list(services, sort, max, long)?;
        }
        Commands::Apply { path, mode } => {
            cmd_apply(services, &path, mode)?;
        }
        Commands::Current => {
            cmd_current(services);
        }
        Commands::Thumb { path } => {
            cmd_thumb(services, &path)?;
        }
        Commands::Cache { action } => {
            cmd_cache(services, action);
        }
        Commands::Fav { action } => {
            cmd_fav(services, action);
        }
        Commands::Stats { reset } => {
            cmd_stats(services, reset).await;
        }
        Commands::Config { action } => {
            cmd_config(services, action)?;
        }
        Commands::Delete { path, yes } => {
            cmd_delete(services, &path, yes)?;
        }
    }

    Ok(())
}
