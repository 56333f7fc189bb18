//! Wealth Quest - leaderboard service CLI.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, StorageBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wealth_quest::{DbStore, FileStore, MemoryStore, ScoreStore, router, seed_demo_scores};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            host,
            storage,
            data_file,
            db_path,
            no_seed,
        } => run_server(host, port, storage, data_file, db_path, no_seed).await,
    }
}

/// Run the leaderboard HTTP server
async fn run_server(
    host: String,
    port: u16,
    storage: StorageBackend,
    data_file: std::path::PathBuf,
    db_path: String,
    no_seed: bool,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(?storage, "Starting Wealth Quest leaderboard server");

    let store: Arc<dyn ScoreStore> = match storage {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::new(data_file)),
        StorageBackend::Sqlite => Arc::new(DbStore::new(db_path)?),
    };

    if !no_seed {
        seed_demo_scores(store.as_ref())?;
    }

    let app = router(store);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Server ready at http://{host}:{port}/");
    info!("Routes: GET /scores, POST /scores");

    axum::serve(listener, app).await?;

    Ok(())
}
