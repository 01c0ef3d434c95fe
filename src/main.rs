mod config;
mod disk;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use salon::catalog::{Catalog, CatalogError};
use salon::session::Session;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::disk::DiskStorage;

#[derive(Debug, thiserror::Error)]
enum HostError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead { path: PathBuf, source: std::io::Error },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to open data dir {path}: {source}")]
    DataDir { path: PathBuf, source: std::io::Error },
    #[error("stdio failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    let config = Config::parse();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "nail-art-match failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), HostError> {
    let raw = tokio::fs::read_to_string(&config.catalog)
        .await
        .map_err(|source| HostError::CatalogRead { path: config.catalog.clone(), source })?;
    let catalog = Catalog::from_json(&raw)?;
    let storage = DiskStorage::open(&config.data_dir)
        .map_err(|source| HostError::DataDir { path: config.data_dir.clone(), source })?;

    info!(
        tasks = catalog.len(),
        data_dir = %storage.dir().display(),
        tick_ms = config.tick_ms,
        fresh = config.fresh,
        "nail-art-match ready"
    );

    let session = if config.fresh { Session::fresh(catalog, storage) } else { Session::hydrate(catalog, storage) };
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    runner::run(session, stdin, tokio::io::stdout(), config.tick_interval()).await?;
    Ok(())
}
