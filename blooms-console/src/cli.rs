use clap::Parser;
use std::path::PathBuf;

/// Beautiful Blooms shop management console
#[derive(Parser, Debug)]
#[command(name = "beautiful-blooms", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./blooms.toml when present)
    #[arg(short, long, env = "BLOOMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding Products.txt, Addons.txt and Orders.txt
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}
