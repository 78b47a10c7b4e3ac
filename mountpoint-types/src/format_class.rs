// SPDX-License-Identifier: GPL-3.0-only

//! Classification of backend format types
//!
//! The installer treats a handful of format types specially. Everything the
//! editor needs to know about a format type is derived from here so callers
//! never compare format strings themselves.

/// Format types that denote a reserved region rather than a filesystem.
const NON_MOUNTABLE_TYPES: &[&str] = &["biosboot", "prepboot"];

/// Filesystem types the installer cannot recreate yet.
const REFORMAT_LOCKED_TYPES: &[&str] = &["btrfs"];

/// What the installer may do with a request of a given format type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormatClass {
    /// An ordinary filesystem: mountable, reformat is user-controlled.
    #[default]
    Regular,
    /// A reserved area (e.g. BIOS boot). Never mounted, reformat not editable.
    NonMountable,
    /// A filesystem that cannot be reformatted. Reformat stays `false`.
    ReformatLocked,
}

impl FormatClass {
    pub fn of(format_type: &str) -> Self {
        if NON_MOUNTABLE_TYPES.contains(&format_type) {
            Self::NonMountable
        } else if REFORMAT_LOCKED_TYPES.contains(&format_type) {
            Self::ReformatLocked
        } else {
            Self::Regular
        }
    }

    pub fn is_mountable(self) -> bool {
        !matches!(self, Self::NonMountable)
    }

    /// Whether the user may change the reformat flag at all.
    pub fn is_reformat_editable(self) -> bool {
        matches!(self, Self::Regular)
    }
}
