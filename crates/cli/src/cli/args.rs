pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notes")]
#[command(about = "Keep one signed note per identity on a local ledger")]
pub struct Args {
    /// Path to the notes config directory (defaults to ~/.notes)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
