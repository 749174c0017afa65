mod cli;
mod config;
mod logging;

use anyhow::Context;
use biography_database::FileStore;
use biography_net::{build_app, serve, AppOptions};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let store = FileStore::open(&config.data_dir)
        .with_context(|| format!("cannot use data directory {}", config.data_dir.display()))?;
    info!(data_dir = %store.data_dir().display(), "using data directory");

    let options = AppOptions {
        cors: config.cors,
        max_upload_bytes: config.max_upload_bytes,
    };
    let app = build_app(store, &options);

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("cannot listen on {}", config.bind))?;

    serve(listener, app).await?;
    Ok(())
}
