//! Adapts the `notify` backend into coalesced batches of flagged records.
//!
//! The backend delivers raw events from its own thread into a std mpsc
//! channel; everything downstream of the channel runs on the caller's thread.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::Context;
use notify::event::{CreateKind, MetadataKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::flags;
use crate::format::EventRecord;

/// Coalescing window: once a raw event arrives, keep draining the channel
/// until this much time passes with nothing new, then deliver the batch.
const LATENCY: Duration = Duration::from_millis(500);

/// A live subscription producing coalesced event batches.
pub struct BatchSource {
    rx: Receiver<notify::Result<Event>>,
    /// Keep alive: dropping the watcher stops event delivery.
    _watcher: RecommendedWatcher,
    next_id: u64,
}

impl BatchSource {
    /// Establish the subscription for every path in the watch set.
    ///
    /// Any path that cannot be watched fails the whole subscription; a watch
    /// set that silently shrinks would report a misleading picture.
    pub fn subscribe(paths: &[PathBuf]) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(tx).context("failed to create filesystem watcher")?;

        // Recursive: a watched directory reports changes anywhere under it,
        // matching FSEvents subtree delivery.
        for path in paths {
            watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("failed to watch {}", path.display()))?;
        }

        Ok(Self {
            rx,
            _watcher: watcher,
            next_id: 0,
        })
    }

    /// Block until the next batch is ready and return it in delivery order.
    ///
    /// May return an empty batch when every raw event in the window was
    /// ignorable (an access, or an error report); the caller skips those
    /// without leaving its waiting state.
    pub fn next_batch(&mut self) -> anyhow::Result<Vec<EventRecord>> {
        let mut records = Vec::new();

        let first = self.rx.recv().context("watch channel closed")?;
        self.push_event(first, &mut records);
        loop {
            match self.rx.recv_timeout(LATENCY) {
                Ok(event) => self.push_event(event, &mut records),
                Err(RecvTimeoutError::Timeout) => break,
                // Deliver what we have; the next call surfaces the closure.
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(records)
    }

    /// Append one record per path carried by a raw event.
    fn push_event(&mut self, result: notify::Result<Event>, records: &mut Vec<EventRecord>) {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                eprintln!("warning: watch error: {err}");
                return;
            }
        };
        let Some(kind_mask) = kind_mask(&event) else {
            return;
        };
        for path in event.paths {
            let mask = kind_mask | type_mask(&path, &event.kind);
            let id = self.next_id;
            self.next_id += 1;
            records.push(EventRecord {
                path,
                flags: mask,
                id,
            });
        }
    }
}

/// Translate a raw event's kind into registry flag bits.
///
/// Returns `None` for access events, which carry no change worth reporting.
fn kind_mask(event: &Event) -> Option<u32> {
    let mut mask = match event.kind {
        EventKind::Access(_) => return None,
        EventKind::Create(_) => flags::CREATED,
        EventKind::Remove(_) => flags::REMOVED,
        EventKind::Modify(ModifyKind::Name(_)) => flags::RENAMED,
        EventKind::Modify(ModifyKind::Metadata(meta)) => match meta {
            MetadataKind::Ownership | MetadataKind::Permissions => flags::CHANGE_OWNER,
            MetadataKind::Extended => flags::XATTR_MOD,
            _ => flags::INODE_META_MOD,
        },
        EventKind::Modify(_) => flags::MODIFIED,
        EventKind::Any | EventKind::Other => 0,
    };
    if event.need_rescan() {
        mask |= flags::MUST_SCAN_SUB_DIRS;
    }
    Some(mask)
}

/// Item-type bits for a path, from an lstat of the path itself.
///
/// The path may already be gone (removes, rapid rename chains); fall back to
/// whatever the event kind says about the item type.
fn type_mask(path: &Path, kind: &EventKind) -> u32 {
    if let Ok(meta) = fs::symlink_metadata(path) {
        let file_type = meta.file_type();
        return if file_type.is_symlink() {
            flags::ITEM_IS_SYMLINK
        } else if file_type.is_dir() {
            flags::ITEM_IS_DIR
        } else {
            flags::ITEM_IS_FILE
        };
    }
    match kind {
        EventKind::Create(CreateKind::File) | EventKind::Remove(RemoveKind::File) => {
            flags::ITEM_IS_FILE
        }
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {
            flags::ITEM_IS_DIR
        }
        _ => 0,
    }
}
