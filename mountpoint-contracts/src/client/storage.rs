// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;
use mountpoint_types::{PartitionRequest, PartitioningMethod, PartitioningPath};
use zbus::proxy::CacheProperties;
use zbus::zvariant::OwnedObjectPath;
use zbus::{Connection, proxy};

use super::codec::{RequestStruct, decode_requests, encode_requests};
use super::connection::{BusTarget, shared_connection};
use super::error::ClientError;
use crate::{BackendError, PartitioningBackend};

/// D-Bus proxy interface for the storage module root object
#[proxy(
    interface = "org.fedoraproject.Anaconda.Modules.Storage",
    default_service = "org.fedoraproject.Anaconda.Modules.Storage",
    default_path = "/org/fedoraproject/Anaconda/Modules/Storage"
)]
pub trait StorageInterface {
    /// Create a new partitioning object for the given method
    async fn create_partitioning(&self, method: &str) -> zbus::Result<OwnedObjectPath>;

    /// Partitioning objects created so far
    #[zbus(property)]
    fn created_partitioning(&self) -> zbus::Result<Vec<OwnedObjectPath>>;
}

/// D-Bus proxy interface for boot-loader configuration
#[proxy(
    interface = "org.fedoraproject.Anaconda.Modules.Storage.Bootloader",
    default_service = "org.fedoraproject.Anaconda.Modules.Storage",
    default_path = "/org/fedoraproject/Anaconda/Modules/Storage/Bootloader"
)]
pub trait BootloaderInterface {
    #[zbus(property)]
    fn set_drive(&self, drive: &str) -> zbus::Result<()>;
}

/// Base interface shared by every partitioning object
#[proxy(
    interface = "org.fedoraproject.Anaconda.Modules.Storage.Partitioning",
    default_service = "org.fedoraproject.Anaconda.Modules.Storage"
)]
pub trait PartitioningInterface {
    #[zbus(property)]
    fn partitioning_method(&self) -> zbus::Result<String>;
}

/// Interface of a MANUAL partitioning object
#[proxy(
    interface = "org.fedoraproject.Anaconda.Modules.Storage.Partitioning.Manual",
    default_service = "org.fedoraproject.Anaconda.Modules.Storage"
)]
pub trait ManualPartitioningInterface {
    /// Requests for every usable device, merged with the current ones
    async fn gather_requests(&self) -> zbus::Result<Vec<RequestStruct>>;

    #[zbus(property)]
    fn requests(&self) -> zbus::Result<Vec<RequestStruct>>;

    #[zbus(property)]
    fn set_requests(&self, requests: Vec<RequestStruct>) -> zbus::Result<()>;
}

/// Client for the storage module operations used by the mount-point editor
#[derive(Clone)]
pub struct StorageClient {
    connection: Connection,
}

impl StorageClient {
    /// Create a client on the shared installer bus connection
    pub async fn new(target: &BusTarget) -> Result<Self, ClientError> {
        let conn = shared_connection(target).await?;
        Ok(Self::with_connection(conn.clone()))
    }

    pub fn with_connection(connection: Connection) -> Self {
        Self { connection }
    }

    async fn storage(&self) -> Result<StorageInterfaceProxy<'_>, ClientError> {
        StorageInterfaceProxy::builder(&self.connection)
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(|e| ClientError::Connection(format!("Failed to create storage proxy: {e}")))
    }

    async fn partitioning(
        &self,
        path: &PartitioningPath,
    ) -> Result<PartitioningInterfaceProxy<'_>, ClientError> {
        Ok(PartitioningInterfaceProxy::builder(&self.connection)
            .path(path.as_str().to_owned())?
            .cache_properties(CacheProperties::No)
            .build()
            .await?)
    }

    async fn manual(
        &self,
        path: &PartitioningPath,
    ) -> Result<ManualPartitioningInterfaceProxy<'_>, ClientError> {
        Ok(ManualPartitioningInterfaceProxy::builder(&self.connection)
            .path(path.as_str().to_owned())?
            .cache_properties(CacheProperties::No)
            .build()
            .await?)
    }

    async fn set_drive(&self, drive: &str) -> Result<(), ClientError> {
        let proxy = BootloaderInterfaceProxy::new(&self.connection).await?;
        Ok(proxy.set_drive(drive).await?)
    }

    async fn create(&self, method: &PartitioningMethod) -> Result<PartitioningPath, ClientError> {
        let path = self.storage().await?.create_partitioning(method.as_str()).await?;
        Ok(PartitioningPath::new(path.as_str()))
    }

    async fn set_requests(
        &self,
        partitioning: &PartitioningPath,
        requests: &[PartitionRequest],
    ) -> Result<(), ClientError> {
        let encoded = encode_requests(requests)?;
        Ok(self.manual(partitioning).await?.set_requests(encoded).await?)
    }

    async fn method(&self, partitioning: &PartitioningPath) -> Result<PartitioningMethod, ClientError> {
        let method = self.partitioning(partitioning).await?.partitioning_method().await?;
        Ok(PartitioningMethod::from(method))
    }

    async fn requests(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, ClientError> {
        decode_requests(self.manual(partitioning).await?.requests().await?)
    }

    async fn gather(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, ClientError> {
        decode_requests(self.manual(partitioning).await?.gather_requests().await?)
    }

    async fn created(&self) -> Result<Vec<PartitioningPath>, ClientError> {
        let paths = self.storage().await?.created_partitioning().await?;
        Ok(paths
            .iter()
            .map(|path| PartitioningPath::new(path.as_str()))
            .collect())
    }
}

#[async_trait]
impl PartitioningBackend for StorageClient {
    async fn set_bootloader_drive(&self, drive: &str) -> Result<(), BackendError> {
        tracing::debug!(drive, "setting boot-loader drive");
        Ok(self.set_drive(drive).await?)
    }

    async fn create_partitioning(
        &self,
        method: &PartitioningMethod,
    ) -> Result<PartitioningPath, BackendError> {
        let path = self.create(method).await?;
        tracing::info!(%method, %path, "created partitioning");
        Ok(path)
    }

    async fn set_manual_partitioning_requests(
        &self,
        partitioning: &PartitioningPath,
        requests: &[PartitionRequest],
    ) -> Result<(), BackendError> {
        tracing::debug!(%partitioning, count = requests.len(), "replacing manual requests");
        Ok(self.set_requests(partitioning, requests).await?)
    }

    async fn partitioning_method(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<PartitioningMethod, BackendError> {
        Ok(self.method(partitioning).await?)
    }

    async fn manual_requests(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, BackendError> {
        Ok(self.requests(partitioning).await?)
    }

    async fn gather_requests(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, BackendError> {
        Ok(self.gather(partitioning).await?)
    }

    async fn created_partitioning(&self) -> Result<Vec<PartitioningPath>, BackendError> {
        Ok(self.created().await?)
    }
}
