//! The event-flag registry: names for the notification backend's flag bits.
//!
//! The bit layout mirrors the macOS FSEvents stream flags, which is the
//! richest vocabulary any backend reports; the watch adapter composes the
//! same masks on other platforms so decoding behaves identically everywhere.

// Stream-level flags.
pub const MUST_SCAN_SUB_DIRS: u32 = 1 << 0;
pub const USER_DROPPED: u32 = 1 << 1;
pub const KERNEL_DROPPED: u32 = 1 << 2;
pub const IDS_WRAPPED: u32 = 1 << 3;
pub const HISTORY_DONE: u32 = 1 << 4;
pub const ROOT_CHANGED: u32 = 1 << 5;
pub const MOUNT: u32 = 1 << 6;
pub const UNMOUNT: u32 = 1 << 7;

// Per-item flags.
pub const CREATED: u32 = 1 << 8;
pub const REMOVED: u32 = 1 << 9;
pub const INODE_META_MOD: u32 = 1 << 10;
pub const RENAMED: u32 = 1 << 11;
pub const MODIFIED: u32 = 1 << 12;
pub const FINDER_INFO_MOD: u32 = 1 << 13;
pub const CHANGE_OWNER: u32 = 1 << 14;
pub const XATTR_MOD: u32 = 1 << 15;

// Item-type markers. Decoded like any other flag; `ITEM_IS_FILE` additionally
// selects the split path rendering in the formatter.
pub const ITEM_IS_FILE: u32 = 1 << 16;
pub const ITEM_IS_DIR: u32 = 1 << 17;
pub const ITEM_IS_SYMLINK: u32 = 1 << 18;

/// Number of bit positions `decode` inspects. One wider than the table below:
/// bit 19 is scanned for compatibility but has no name assigned, so it decodes
/// to the `UNKNOWN` fallback like any future flag would.
const FLAG_WINDOW_BITS: u32 = 20;

/// Fallback name for a set bit with no registry entry.
const UNKNOWN_NAME: &str = "UNKNOWN";

/// Bit value → name, ascending by bit position. Decode order follows this
/// table, which keeps multi-flag output deterministic.
const FLAG_NAMES: [(u32, &str); 19] = [
    (MUST_SCAN_SUB_DIRS, "MUSTSCANSUBDIRS"),
    (USER_DROPPED, "USERDROPPED"),
    (KERNEL_DROPPED, "KERNELDROPPED"),
    (IDS_WRAPPED, "IDSWRAPPED"),
    (HISTORY_DONE, "HISTORYDONE"),
    (ROOT_CHANGED, "ROOTCHANGED"),
    (MOUNT, "MOUNT"),
    (UNMOUNT, "UNMOUNT"),
    (CREATED, "CREATED"),
    (REMOVED, "REMOVED"),
    (INODE_META_MOD, "INODEMETAMOD"),
    (RENAMED, "RENAMED"),
    (MODIFIED, "MODIFIED"),
    (FINDER_INFO_MOD, "FINDERINFOMOD"),
    (CHANGE_OWNER, "CHANGEOWNER"),
    (XATTR_MOD, "XATTRMOD"),
    (ITEM_IS_FILE, "ISFILE"),
    (ITEM_IS_DIR, "ISDIR"),
    (ITEM_IS_SYMLINK, "SYMLINK"),
];

/// Decode a flag bitmask into event names, lowest bit first.
///
/// A set bit inside the inspection window with no registry entry produces a
/// `warning: unsupported event flag` line on stderr and the `UNKNOWN`
/// placeholder at that position; it never aborts decoding. Bits at or above
/// the window are ignored entirely.
pub fn decode(mask: u32) -> Vec<&'static str> {
    decode_with(mask, || eprintln!("warning: unsupported event flag"))
}

/// Decoding core with the warning side-effect injected, one call per
/// undecodable bit, so tests can count emissions.
fn decode_with(mask: u32, mut warn: impl FnMut()) -> Vec<&'static str> {
    let mut names = Vec::new();

    for bit in 0..FLAG_WINDOW_BITS {
        let value = 1u32 << bit;
        if mask & value == 0 {
            continue;
        }
        match FLAG_NAMES.iter().find(|(flag, _)| *flag == value) {
            Some((_, name)) => names.push(*name),
            None => {
                warn();
                names.push(UNKNOWN_NAME);
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_invariants() {
        for (value, name) in FLAG_NAMES {
            assert!(value.is_power_of_two(), "{name} is not a single bit");
            assert!(value < (1 << FLAG_WINDOW_BITS), "{name} outside window");
            assert!(!name.is_empty(), "empty flag name");
            assert!(name.is_ascii(), "{name} is not ASCII");
        }
        // Strictly ascending bit order implies no two entries share a bit.
        for pair in FLAG_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "table not ascending at {}", pair[1].1);
        }
    }

    #[test]
    fn test_each_known_bit_decodes_to_its_name() {
        for (value, name) in FLAG_NAMES {
            assert_eq!(decode(value), vec![name]);
        }
    }

    #[test]
    fn test_zero_mask_decodes_to_nothing() {
        assert!(decode(0).is_empty());
    }

    #[test]
    fn test_unassigned_window_bit_decodes_to_unknown() {
        // Bit 19 sits inside the inspection window but has no registry entry.
        assert_eq!(decode(1 << 19), vec![UNKNOWN_NAME]);
    }

    #[test]
    fn test_unknown_bit_keeps_its_position() {
        let names = decode(CREATED | (1 << 19));
        assert_eq!(names, vec!["CREATED", UNKNOWN_NAME]);
    }

    #[test]
    fn test_unknown_bit_warns_exactly_once() {
        let mut warnings = 0;
        let names = decode_with(CREATED | (1 << 19), || warnings += 1);
        assert_eq!(names, vec!["CREATED", UNKNOWN_NAME]);
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_known_flags_do_not_warn() {
        let mut warnings = 0;
        decode_with(CREATED | MODIFIED | ITEM_IS_FILE, || warnings += 1);
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_bits_above_window_are_ignored() {
        assert!(decode(1 << 20).is_empty());
        assert_eq!(decode(MODIFIED | (1 << 31)), vec!["MODIFIED"]);
    }

    #[test]
    fn test_combined_mask_decodes_in_ascending_bit_order() {
        let names = decode(ITEM_IS_FILE | CREATED | MUST_SCAN_SUB_DIRS);
        assert_eq!(names, vec!["MUSTSCANSUBDIRS", "CREATED", "ISFILE"]);
    }
}
