// kako-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Kako: Extract frames from an MP4 and batch-crop them",
    long_about = "Interactively extracts still frames from an MP4 video with ffmpeg and \
                  optionally crops every frame by fixed pixel margins."
)]
pub struct Cli {
    /// Use this ffmpeg binary instead of the bundled one
    #[arg(long, value_name = "PATH", env = "KAKO_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Show debug log records on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Optional: Directory for a timestamped run log
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
