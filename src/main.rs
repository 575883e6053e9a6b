mod app;
mod applier;
mod cli;
mod cli_cmds;
mod desktop;
mod favorites;
mod lock;
mod logging;
mod paths;
mod services;
mod stats;
mod store;
mod thumbnail;
mod ui;
mod utils;
mod wallpaper;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
