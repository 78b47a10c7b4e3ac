// SPDX-License-Identifier: GPL-3.0-only

//! Mutation sequencing
//!
//! Each edit derives a complete new request list from the current snapshot;
//! exactly one request changes and ordering is preserved. The new list is
//! then submitted to the backend as a full replace.

use mountpoint_contracts::{BackendError, PartitioningBackend};
use mountpoint_types::{PartitionRequest, PartitioningPath};

use crate::error::EditError;
use crate::validate::resolve_reformat;

fn replace_one<F>(
    requests: &[PartitionRequest],
    device: &str,
    edit: F,
) -> Result<Vec<PartitionRequest>, EditError>
where
    F: FnOnce(&PartitionRequest) -> PartitionRequest,
{
    let index = requests
        .iter()
        .position(|r| r.device_spec == device)
        .ok_or_else(|| EditError::UnknownDevice(device.to_string()))?;

    let mut next = requests.to_vec();
    next[index] = edit(&requests[index]);
    Ok(next)
}

/// Assign `new_mount_point` to the request of `device`.
///
/// The reformat flag follows the root rule (see [`resolve_reformat`]).
pub fn apply_mount_point_change(
    requests: &[PartitionRequest],
    device: &str,
    new_mount_point: &str,
) -> Result<Vec<PartitionRequest>, EditError> {
    replace_one(requests, device, |request| PartitionRequest {
        mount_point: new_mount_point.to_string(),
        reformat: resolve_reformat(request, new_mount_point),
        ..request.clone()
    })
}

/// Set the reformat flag of the request of `device`.
///
/// The caller only offers this for rows whose reformat control is enabled;
/// locks are not checked again here.
pub fn apply_reformat_toggle(
    requests: &[PartitionRequest],
    device: &str,
    checked: bool,
) -> Result<Vec<PartitionRequest>, EditError> {
    replace_one(requests, device, |request| PartitionRequest {
        reformat: checked,
        ..request.clone()
    })
}

/// Replace the backend's request list with `requests` in one call.
pub async fn submit(
    backend: &dyn PartitioningBackend,
    partitioning: &PartitioningPath,
    requests: &[PartitionRequest],
) -> Result<(), BackendError> {
    match backend
        .set_manual_partitioning_requests(partitioning, requests)
        .await
    {
        Ok(()) => {
            tracing::debug!(%partitioning, count = requests.len(), "submitted requests");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%partitioning, %e, "failed to submit requests");
            Err(e)
        }
    }
}
