// SPDX-License-Identifier: GPL-3.0-only

//! Assignment validation
//!
//! Pure functions deciding what an edit does to the reformat flag, whether a
//! set of requests is installable, and which per-row controls are enabled.
//! Every caller goes through here so the root-reformat rule cannot be bypassed.

use std::collections::HashSet;

use mountpoint_types::{FormatClass, PartitionRequest, ROOT_MOUNT_POINT};

use crate::error::EditError;

/// Reformat flag after moving a request from `old` to `new`.
///
/// Entering root forces a reformat, leaving root drops the forced reformat,
/// anything else keeps the current flag.
pub fn reformat_on_mount_point_change(old: &str, new: &str, current: bool) -> bool {
    if new == ROOT_MOUNT_POINT {
        return true;
    }
    if old == ROOT_MOUNT_POINT && current {
        return false;
    }
    current
}

/// Reformat flag of `request` after assigning `new_mount_point`, honouring its
/// format class.
pub fn resolve_reformat(request: &PartitionRequest, new_mount_point: &str) -> bool {
    match request.format_class() {
        FormatClass::Regular => {
            reformat_on_mount_point_change(&request.mount_point, new_mount_point, request.reformat)
        }
        FormatClass::ReformatLocked => false,
        FormatClass::NonMountable => request.reformat,
    }
}

/// True iff more than one request uses the non-empty `mount_point`.
pub fn is_duplicate_mount_point(mount_point: &str, requests: &[PartitionRequest]) -> bool {
    !mount_point.is_empty()
        && requests
            .iter()
            .filter(|r| r.mount_point == mount_point)
            .nth(1)
            .is_some()
}

/// True iff no non-empty mount point appears more than once.
pub fn is_set_valid(requests: &[PartitionRequest]) -> bool {
    let mut seen = HashSet::new();
    requests
        .iter()
        .filter(|r| r.is_assigned())
        .all(|r| seen.insert(r.mount_point.as_str()))
}

/// Which controls of a row are enabled and which indicators are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowControls {
    pub mount_point_enabled: bool,
    pub reformat_enabled: bool,
    /// "The root partition is always re-formatted"
    pub root_hint: bool,
    /// Inline "Duplicate mount point" indicator
    pub duplicate: bool,
}

pub fn row_controls(request: &PartitionRequest, requests: &[PartitionRequest]) -> RowControls {
    let class = request.format_class();
    let root = request.is_root();

    RowControls {
        mount_point_enabled: class.is_mountable(),
        reformat_enabled: class.is_reformat_editable() && !root,
        root_hint: root,
        duplicate: is_duplicate_mount_point(&request.mount_point, requests),
    }
}

/// Whether the reformat control of `request` may be toggled by the user.
pub fn can_toggle_reformat(request: &PartitionRequest) -> bool {
    request.format_class().is_reformat_editable() && !request.is_root()
}

/// An entry of the mount-point select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPointOption {
    pub value: String,
    /// Short label for presets, `None` for custom values
    pub name: Option<String>,
}

/// Label shown for a preset mount point.
pub fn preset_name(mount_point: &str) -> String {
    if mount_point == ROOT_MOUNT_POINT {
        return "root".to_string();
    }
    mount_point
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(mount_point)
        .to_string()
}

/// Options of the mount-point select: the presets other than `current`,
/// followed by `current` itself when it is assigned.
pub fn mount_point_options(current: &str, presets: &[String]) -> Vec<MountPointOption> {
    let mut options: Vec<MountPointOption> = presets
        .iter()
        .filter(|preset| preset.as_str() != current)
        .map(|preset| MountPointOption {
            value: preset.clone(),
            name: Some(preset_name(preset)),
        })
        .collect();

    if !current.is_empty() {
        let name = presets
            .iter()
            .any(|preset| preset == current)
            .then(|| preset_name(current));
        options.push(MountPointOption {
            value: current.to_string(),
            name,
        });
    }

    options
}

/// Commit free-text mount point entry.
///
/// Empty input clears the assignment. Anything else must be an absolute path
/// without whitespace; a trailing slash is dropped.
pub fn parse_custom_mount_point(text: &str) -> Result<String, EditError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let invalid = |reason| EditError::InvalidMountPoint {
        mount_point: trimmed.to_string(),
        reason,
    };

    if !trimmed.starts_with('/') {
        return Err(invalid("must be an absolute path"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    if trimmed.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(invalid("must not contain '.' or '..' components"));
    }
    if trimmed.contains("//") {
        return Err(invalid("must not contain empty components"));
    }

    match trimmed.strip_suffix('/') {
        Some("") => Ok(ROOT_MOUNT_POINT.to_string()),
        Some(normalized) => Ok(normalized.to_string()),
        None => Ok(trimmed.to_string()),
    }
}
