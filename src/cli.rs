// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

/// Every option may also come from the `--config` file; flags given here win
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pixelstrom-client")]
#[command(about = "Streams an image onto a pixelstrom canvas", long_about = None)]
pub struct Cli {
    /// Image to draw
    pub image: Option<PathBuf>,

    /// Server host name or address
    #[arg(long)]
    pub host: Option<String>,

    /// Server port
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(short, long)]
    pub password: Option<String>,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fixed seed for image placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up when the server stays silent this long (waits forever by default)
    #[arg(long = "read-timeout-ms")]
    pub read_timeout_ms: Option<u64>,
}
