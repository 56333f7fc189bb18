//! Command-line interface for wealth_quest.

use clap::{Parser, Subcommand, ValueEnum};

/// Wealth Quest - financial literacy board game with a leaderboard service
#[derive(Parser, Debug)]
#[command(name = "wealth_quest")]
#[command(about = "Financial literacy board game engine and leaderboard server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Leaderboard backend, chosen explicitly at startup.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Volatile in-memory store (scores lost on exit).
    Memory,
    /// JSON file persistence (default, no setup required).
    File,
    /// SQLite database.
    Sqlite,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the leaderboard HTTP server
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Leaderboard storage backend
        #[arg(long, value_enum, default_value = "file")]
        storage: StorageBackend,

        /// Path to the JSON data file (file backend)
        #[arg(long, default_value = "scores-data.json")]
        data_file: std::path::PathBuf,

        /// Path to the SQLite database (sqlite backend, created if missing)
        #[arg(long, default_value = "wealth_quest.db")]
        db_path: String,

        /// Skip inserting demonstration scores into an empty store
        #[arg(long)]
        no_seed: bool,
    },
}
