use std::path::PathBuf;

use clap::Parser;

/// Deluge Upload Resetter - Reset uploaded amount
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory containing torrents.fastresume (default: current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Prompt for confirmation before resetting each torrent
    #[arg(short, long)]
    pub single: bool,

    /// Report what would be reset without writing anything
    #[arg(long, conflicts_with = "dump")]
    pub dry_run: bool,

    /// Print the state file as JSON and exit
    #[arg(long)]
    pub dump: bool,

    /// Log per-torrent details
    #[arg(short, long)]
    pub verbose: bool,
}
