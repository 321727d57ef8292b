use std::path::PathBuf;

use clap::Parser;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Session health dashboard for the OpenClaw main agent")]
pub struct CliArgs {
    /// Port to listen on (overrides the config file for this run)
    pub port: Option<u16>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
