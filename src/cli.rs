use std::path::PathBuf;

use clap::Parser;

/// Wait for filesystem change notifications on the given paths.
///
/// Prints one line per changed path, decoding the notification's event flags
/// into names. By default the process exits after the first batch of events;
/// with --monitor it keeps reporting until interrupted.
#[derive(Parser, Debug)]
#[command(name = "fswait", version, about, long_about = None)]
pub struct Cli {
    /// Paths to watch (at least one).
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Listen forever instead of exiting after the first event batch.
    #[arg(short, long)]
    pub monitor: bool,

    /// Shell command to execute after each event batch.
    #[arg(short, long, value_name = "CMD")]
    pub exec: Option<String>,
}
