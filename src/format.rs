//! Renders one output line per changed path.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::flags;

/// One changed path as delivered by the notification backend.
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// The path the change applies to.
    pub path: PathBuf,
    /// Raw flag bitmask describing what happened (see `flags`).
    pub flags: u32,
    /// Process-local monotonically increasing event id. Part of the record
    /// the backend delivers; the output path does not consume it.
    #[allow(dead_code)]
    pub id: u64,
}

/// Write the rendered line for `record` and flush immediately, so downstream
/// consumers see each event as soon as it is decoded rather than when the
/// batch (or the process) ends.
pub fn emit(record: &EventRecord, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", render(record))?;
    out.flush()?;
    Ok(())
}

/// Render a record into its output line.
///
/// File items print as `<parent> <names> <basename>` so the directory and the
/// file name can be consumed as separate fields; everything else prints as
/// `<path> <names>`. The first flag name is preceded by a space, later ones
/// by a comma, and a zero bitmask renders the bare path.
pub fn render(record: &EventRecord) -> String {
    let names = flags::decode(record.flags);
    let split = if record.flags & flags::ITEM_IS_FILE != 0 {
        split_file_path(&record.path)
    } else {
        None
    };

    let mut line = match split {
        Some((parent, _)) => parent.display().to_string(),
        None => record.path.display().to_string(),
    };
    for (i, name) in names.iter().enumerate() {
        line.push(if i == 0 { ' ' } else { ',' });
        line.push_str(name);
    }
    if let Some((_, file_name)) = split {
        line.push(' ');
        line.push_str(&file_name.to_string_lossy());
    }

    line
}

/// Split a file path into (parent directory, base name).
///
/// Returns `None` when the path has no final component (e.g. `/` or `..`), in
/// which case the caller falls back to printing the path whole. An empty
/// parent renders as `.`, matching dirname semantics for bare file names.
fn split_file_path(path: &Path) -> Option<(&Path, &OsStr)> {
    let file_name = path.file_name()?;
    let parent = path.parent()?;
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    Some((parent, file_name))
}
