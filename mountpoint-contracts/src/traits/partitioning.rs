// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;

use mountpoint_types::{PartitionRequest, PartitioningData, PartitioningMethod, PartitioningPath};

use crate::BackendError;

/// Operations of the installer storage backend used by the mount-point editor.
#[async_trait]
pub trait PartitioningBackend: Send + Sync {
    /// Set the boot-loader target drive. An empty drive clears the selection.
    async fn set_bootloader_drive(&self, drive: &str) -> Result<(), BackendError>;

    async fn create_partitioning(
        &self,
        method: &PartitioningMethod,
    ) -> Result<PartitioningPath, BackendError>;

    /// Replace the complete request list of a manual partitioning object.
    async fn set_manual_partitioning_requests(
        &self,
        partitioning: &PartitioningPath,
        requests: &[PartitionRequest],
    ) -> Result<(), BackendError>;

    async fn partitioning_method(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<PartitioningMethod, BackendError>;

    async fn manual_requests(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, BackendError>;

    /// Enumerate requests for every filesystem the backend discovered.
    async fn gather_requests(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, BackendError>;

    /// Partitioning objects created so far, oldest first.
    async fn created_partitioning(&self) -> Result<Vec<PartitioningPath>, BackendError>;

    async fn partitioning_data(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<PartitioningData, BackendError> {
        let method = self.partitioning_method(partitioning).await?;
        let requests = if method.is_manual() {
            self.manual_requests(partitioning).await?
        } else {
            Vec::new()
        };

        Ok(PartitioningData {
            path: Some(partitioning.clone()),
            method: Some(method),
            requests,
        })
    }

    /// Data of the most recently created partitioning, or empty data if none exists.
    async fn current_partitioning_data(&self) -> Result<PartitioningData, BackendError> {
        match self.created_partitioning().await?.last() {
            Some(path) => self.partitioning_data(path).await,
            None => Ok(PartitioningData::empty()),
        }
    }
}
