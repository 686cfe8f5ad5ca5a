use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "serve-api", version)]
#[command(about = "Serve a directory over HTTP, plus a read-only JSON query endpoint at /api")]
pub struct Args {
    /// Config file (TOML). Defaults to $HOME/.serve.toml when that exists.
    #[arg(long, env = "SERVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Every request will be logged. `--verbose=false` overrides the config file.
    #[arg(
        short,
        long,
        env = "SERVE_VERBOSE",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub verbose: Option<bool>,

    /// Port to bind to [default: 3000]
    #[arg(short, long, env = "SERVE_PORT")]
    pub port: Option<u16>,

    /// Address to bind to [default: 0.0.0.0]
    #[arg(short, long = "ip-address", env = "SERVE_IP_ADDRESS")]
    pub ip_address: Option<String>,

    /// Directory to serve static files from [default: ./]
    #[arg(short, long, env = "SERVE_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// SQLite database queried by /api [default: sqlite.db]
    #[arg(long, env = "SERVE_DATABASE")]
    pub database: Option<PathBuf>,

    /// Upper bound on a single /api read, 0 disables [default: 30000]
    #[arg(long, env = "SERVE_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Logging level (stderr). Also supports RUST_LOG.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
