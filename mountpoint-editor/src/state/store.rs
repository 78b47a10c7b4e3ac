// SPDX-License-Identifier: GPL-3.0-only

use mountpoint_types::PartitionRequest;

use crate::validate::{self, MountPointOption, RowControls};

/// Row of the partitions table as shown by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionRow {
    pub request: PartitionRequest,
    pub controls: RowControls,
    pub options: Vec<MountPointOption>,
}

/// Request list of the current partitioning session.
///
/// The list is only ever replaced as a whole.
#[derive(Debug, Default, Clone)]
pub struct PartitionRecordStore {
    requests: Vec<PartitionRequest>,
}

impl PartitionRecordStore {
    pub fn requests(&self) -> &[PartitionRequest] {
        &self.requests
    }

    /// Replace the snapshot. Returns whether set validity changed.
    pub fn replace(&mut self, requests: Vec<PartitionRequest>) -> bool {
        let was_valid = self.is_valid();
        self.requests = requests;
        was_valid != self.is_valid()
    }

    pub fn get(&self, device: &str) -> Option<&PartitionRequest> {
        self.requests.iter().find(|r| r.device_spec == device)
    }

    pub fn is_valid(&self) -> bool {
        validate::is_set_valid(&self.requests)
    }

    pub fn rows(&self, presets: &[String]) -> Vec<PartitionRow> {
        self.requests
            .iter()
            .map(|request| PartitionRow {
                request: request.clone(),
                controls: validate::row_controls(request, &self.requests),
                options: validate::mount_point_options(&request.mount_point, presets),
            })
            .collect()
    }
}
