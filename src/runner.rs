//! The run loop: formats each delivered batch, fires the optional action,
//! and decides whether to keep waiting or finish.

use std::io;
use std::process::Command;

use anyhow::Context;

use crate::format::{self, EventRecord};
use crate::watch::BatchSource;

/// Mode flags and the optional action command, fixed at startup.
#[derive(Debug)]
pub struct RunConfig {
    /// Keep processing batches forever instead of exiting after the first.
    pub monitor: bool,
    /// Program + arguments to run once per batch, when configured.
    pub action: Option<Vec<String>>,
}

/// Drive the watch loop until one-shot completion or a fatal error.
///
/// Batches are handled strictly one at a time: the action for batch N runs to
/// completion before batch N+1 is read, so actions never overlap. A hung
/// action therefore blocks the watcher; there is deliberately no timeout.
pub fn run(source: &mut BatchSource, config: &RunConfig) -> anyhow::Result<()> {
    loop {
        let batch = source.next_batch()?;
        if batch.is_empty() {
            continue;
        }
        process_batch(&batch, config.action.as_deref())?;
        if !config.monitor {
            return Ok(());
        }
    }
}

/// Format every record in delivery order, then fire the action once for the
/// whole batch.
fn process_batch(batch: &[EventRecord], action: Option<&[String]>) -> anyhow::Result<()> {
    let mut out = io::stdout();
    for record in batch {
        format::emit(record, &mut out)?;
    }
    if let Some(command) = action {
        run_action(command)?;
    }
    Ok(())
}

/// Spawn the action command and block until it exits.
///
/// Failing to spawn or wait is fatal: a broken action command should stop the
/// watcher, not leave it running silently degraded. The command's own exit
/// status is not inspected; a command that runs and fails is the user's
/// business.
fn run_action(command: &[String]) -> anyhow::Result<()> {
    let (program, args) = command.split_first().context("empty action command")?;
    Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to run action command `{program}`"))?;
    Ok(())
}
