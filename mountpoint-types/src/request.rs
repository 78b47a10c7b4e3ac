// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::FormatClass;

/// The root mount point. A request assigned here is always reformatted.
pub const ROOT_MOUNT_POINT: &str = "/";

/// One discovered partition or filesystem and the user's assignment for it.
///
/// Field names follow the backend's request keys (`device-spec`, `format-type`,
/// `mount-point`, `reformat`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PartitionRequest {
    /// Stable identifier of the block device or filesystem, unique within a session
    pub device_spec: String,

    /// Filesystem type as reported by the backend (e.g. "ext4", "biosboot")
    pub format_type: String,

    /// Target path, or an empty string when unassigned
    #[serde(default)]
    pub mount_point: String,

    /// Whether the filesystem is recreated during installation
    #[serde(default)]
    pub reformat: bool,
}

impl PartitionRequest {
    pub fn new(device_spec: impl Into<String>, format_type: impl Into<String>) -> Self {
        Self {
            device_spec: device_spec.into(),
            format_type: format_type.into(),
            mount_point: String::new(),
            reformat: false,
        }
    }

    pub fn with_mount_point(mut self, mount_point: impl Into<String>) -> Self {
        self.mount_point = mount_point.into();
        self
    }

    pub fn with_reformat(mut self, reformat: bool) -> Self {
        self.reformat = reformat;
        self
    }

    pub fn is_root(&self) -> bool {
        self.mount_point == ROOT_MOUNT_POINT
    }

    pub fn is_assigned(&self) -> bool {
        !self.mount_point.is_empty()
    }

    pub fn format_class(&self) -> FormatClass {
        FormatClass::of(&self.format_type)
    }
}
