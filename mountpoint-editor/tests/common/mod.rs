// SPDX-License-Identifier: GPL-3.0-only

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mountpoint_contracts::{BackendError, BackendErrorKind, PartitioningBackend};
use mountpoint_editor::{Notification, Notifier};
use mountpoint_types::{PartitionRequest, PartitioningData, PartitioningMethod, PartitioningPath};

pub const CREATED_PATH: &str = "/org/fedoraproject/Anaconda/Modules/Storage/Partitioning/2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetBootloaderDrive(String),
    SetBootloaderDriveResolved,
    CreatePartitioning(PartitioningMethod),
    CreatePartitioningResolved,
    SetRequests(PartitioningPath, Vec<PartitionRequest>),
    ManualRequests(PartitioningPath),
    GatherRequests(PartitioningPath),
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    calls: Arc<Mutex<Vec<Call>>>,
    requests: Arc<Mutex<Vec<PartitionRequest>>>,
    gathered: Arc<Mutex<Vec<PartitionRequest>>>,
    drive_result: Arc<Mutex<Option<String>>>,
    create_result: Arc<Mutex<Option<String>>>,
    set_requests_result: Arc<Mutex<Option<String>>>,
}

fn result(slot: &Mutex<Option<String>>) -> Result<(), BackendError> {
    match slot.lock().unwrap().clone() {
        Some(message) => Err(BackendError::new(BackendErrorKind::Internal, message)),
        None => Ok(()),
    }
}

impl FakeBackend {
    pub fn with_requests(requests: Vec<PartitionRequest>) -> Self {
        let backend = Self::default();
        *backend.requests.lock().unwrap() = requests;
        backend
    }

    pub fn set_gathered(&self, requests: Vec<PartitionRequest>) {
        *self.gathered.lock().unwrap() = requests;
    }

    pub fn fail_drive_reset(&self, message: &str) {
        *self.drive_result.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_create(&self, message: &str) {
        *self.create_result.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_set_requests(&self, message: Option<&str>) {
        *self.set_requests_result.lock().unwrap() = message.map(str::to_string);
    }

    pub fn stored_requests(&self) -> Vec<PartitionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PartitioningBackend for FakeBackend {
    async fn set_bootloader_drive(&self, drive: &str) -> Result<(), BackendError> {
        self.record(Call::SetBootloaderDrive(drive.to_string()));
        tokio::task::yield_now().await;
        let res = result(&self.drive_result);
        self.record(Call::SetBootloaderDriveResolved);
        res
    }

    async fn create_partitioning(
        &self,
        method: &PartitioningMethod,
    ) -> Result<PartitioningPath, BackendError> {
        self.record(Call::CreatePartitioning(method.clone()));
        tokio::task::yield_now().await;
        let res = result(&self.create_result);
        self.record(Call::CreatePartitioningResolved);
        res.map(|()| PartitioningPath::new(CREATED_PATH))
    }

    async fn set_manual_partitioning_requests(
        &self,
        partitioning: &PartitioningPath,
        requests: &[PartitionRequest],
    ) -> Result<(), BackendError> {
        self.record(Call::SetRequests(partitioning.clone(), requests.to_vec()));
        result(&self.set_requests_result)?;
        *self.requests.lock().unwrap() = requests.to_vec();
        Ok(())
    }

    async fn partitioning_method(
        &self,
        _partitioning: &PartitioningPath,
    ) -> Result<PartitioningMethod, BackendError> {
        Ok(PartitioningMethod::Manual)
    }

    async fn manual_requests(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, BackendError> {
        self.record(Call::ManualRequests(partitioning.clone()));
        Ok(self.stored_requests())
    }

    async fn gather_requests(
        &self,
        partitioning: &PartitioningPath,
    ) -> Result<Vec<PartitionRequest>, BackendError> {
        self.record(Call::GatherRequests(partitioning.clone()));
        Ok(self.gathered.lock().unwrap().clone())
    }

    async fn created_partitioning(&self) -> Result<Vec<PartitioningPath>, BackendError> {
        Ok(vec![PartitioningPath::new(CREATED_PATH)])
    }
}

/// Collects everything the page reports.
#[derive(Default)]
pub struct RecordingNotifier {
    pub errors: Mutex<Vec<Notification>>,
    pub validity: Mutex<Vec<bool>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<Notification> {
        self.errors.lock().unwrap().clone()
    }

    pub fn validity(&self) -> Vec<bool> {
        self.validity.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, notification: Notification) {
        self.errors.lock().unwrap().push(notification);
    }

    fn validity_changed(&self, valid: bool) {
        self.validity.lock().unwrap().push(valid);
    }
}

pub fn req(device: &str, format: &str, mount_point: &str, reformat: bool) -> PartitionRequest {
    PartitionRequest::new(device, format)
        .with_mount_point(mount_point)
        .with_reformat(reformat)
}

pub fn automatic_data() -> PartitioningData {
    PartitioningData {
        path: Some(PartitioningPath::new(
            "/org/fedoraproject/Anaconda/Modules/Storage/Partitioning/1",
        )),
        method: Some(PartitioningMethod::Automatic),
        requests: vec![],
    }
}

pub fn manual_data(requests: Vec<PartitionRequest>) -> PartitioningData {
    PartitioningData {
        path: Some(PartitioningPath::new(CREATED_PATH)),
        method: Some(PartitioningMethod::Manual),
        requests,
    }
}

pub fn presets() -> Vec<String> {
    vec!["/".to_string(), "/boot".to_string(), "/home".to_string()]
}
