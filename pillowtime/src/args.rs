use std::path::PathBuf;

use clap::Parser;

/// Pillowtime audio service
#[derive(Debug, Parser)]
#[command(name = "pillowtime", about = "Turns prompts and text into stored bedtime-story audio")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "pillowtime.toml", env = "PILLOWTIME_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "PILLOWTIME_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info", env = "PILLOWTIME_LOG")]
    pub log: String,
}
