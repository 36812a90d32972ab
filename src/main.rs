mod cli;
mod flags;
mod format;
mod runner;
mod watch;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use cli::Cli;
use runner::RunConfig;
use watch::BatchSource;

/// Shell used to run `--exec` commands.
const ACTION_SHELL: &str = "/bin/sh";

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            // --help and --version are not usage errors.
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                std::process::exit(0);
            }
            // Usage errors report on stdout, where the usage text lives.
            _ => {
                print!("{}", err.render());
                std::process::exit(1);
            }
        },
    };

    let config = RunConfig {
        monitor: cli.monitor,
        action: cli
            .exec
            .map(|cmd| vec![ACTION_SHELL.to_string(), "-c".to_string(), cmd]),
    };

    let mut source = BatchSource::subscribe(&cli.paths)?;
    runner::run(&mut source, &config)
}
