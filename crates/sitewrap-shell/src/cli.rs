use std::path::PathBuf;

use clap::Parser;

/// Sitewrap — wrap any web site as a desktop application.
#[derive(Parser, Debug)]
#[command(name = "sitewrap", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target URL override (takes precedence over the config file).
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
