// SPDX-License-Identifier: GPL-3.0-only

//! The mount-point editing page
//!
//! Binds the session handshake, the record store and the sequencer together
//! and exposes what the hosting page needs: rows, validity and error
//! notifications. Every event takes `&mut self`, so edits run to completion
//! one after another; dropping the page abandons whatever is in flight.

use std::sync::Arc;

use mountpoint_contracts::{BackendError, PartitioningBackend};
use mountpoint_types::{FormatClass, PartitionRequest, PartitioningData, PartitioningPath};

use crate::error::{EditError, SetupError};
use crate::sequencer;
use crate::session::{SessionInitializer, SessionState};
use crate::state::{PartitionRecordStore, PartitionRow};
use crate::validate;

/// Step identifier of this page in the installer's step notifications.
pub const STEP_ID: &str = "custom-mountpoint";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub step: String,
    pub message: String,
}

impl Notification {
    pub fn new(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            message: message.into(),
        }
    }

    fn for_page(message: impl Into<String>) -> Self {
        Self::new(STEP_ID, message)
    }
}

/// Callbacks into the hosting page.
pub trait Notifier: Send + Sync {
    /// A backend call was rejected.
    fn error(&self, notification: Notification);

    /// Validity of the request set changed; gates the "next" button.
    fn validity_changed(&self, _valid: bool) {}
}

pub struct MountPointPage {
    backend: Arc<dyn PartitioningBackend>,
    notifier: Arc<dyn Notifier>,
    session: SessionInitializer,
    store: PartitionRecordStore,
    presets: Vec<String>,
    setup_error: Option<SetupError>,
    submission_error: Option<BackendError>,
    step_notification: Option<Notification>,
}

impl MountPointPage {
    pub fn new(
        backend: Arc<dyn PartitioningBackend>,
        notifier: Arc<dyn Notifier>,
        presets: Vec<String>,
    ) -> Self {
        Self {
            backend,
            notifier,
            session: SessionInitializer::new(),
            store: PartitionRecordStore::default(),
            presets,
            setup_error: None,
            submission_error: None,
            step_notification: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn is_editable(&self) -> bool {
        self.session.is_ready()
    }

    pub fn partitioning(&self) -> Option<&PartitioningPath> {
        self.session.partitioning()
    }

    pub fn setup_error(&self) -> Option<&SetupError> {
        self.setup_error.as_ref()
    }

    /// Rejection of the most recent submission, cleared by the next accepted one.
    pub fn submission_error(&self) -> Option<&BackendError> {
        self.submission_error.as_ref()
    }

    pub fn requests(&self) -> &[PartitionRequest] {
        self.store.requests()
    }

    pub fn rows(&self) -> Vec<PartitionRow> {
        self.store.rows(&self.presets)
    }

    pub fn is_valid(&self) -> bool {
        self.store.is_valid()
    }

    /// Installer-wide step notification; only shown when addressed to this page.
    pub fn set_step_notification(&mut self, notification: Option<Notification>) {
        self.step_notification = notification;
    }

    pub fn step_notification(&self) -> Option<&Notification> {
        self.step_notification
            .as_ref()
            .filter(|notification| notification.step == STEP_ID)
    }

    /// Make sure a MANUAL partitioning exists, then load its requests.
    pub async fn mount(&mut self, data: PartitioningData) -> Result<(), SetupError> {
        let path = match self.session.run(self.backend.as_ref(), &data).await {
            Ok(path) => path,
            Err(e) => {
                if matches!(
                    e,
                    SetupError::ResetBootloaderDrive(_) | SetupError::CreatePartitioning(_)
                ) {
                    self.notifier.error(Notification::for_page(e.to_string()));
                    self.setup_error = Some(e.clone());
                }
                return Err(e);
            }
        };

        let already_loaded = data.is_manual() && data.path.as_ref() == Some(&path);
        if already_loaded && !data.requests.is_empty() {
            self.store.replace(data.requests);
        } else {
            // Reported through the notifier; the page stays editable.
            let _ = self.load(&path).await;
        }

        self.notifier.validity_changed(self.is_valid());
        Ok(())
    }

    /// Re-read the requests from the backend, the source of truth after a
    /// rejected submission.
    pub async fn reload(&mut self) -> Result<(), BackendError> {
        let Some(path) = self.session.partitioning().cloned() else {
            return Ok(());
        };

        let was_valid = self.is_valid();
        let result = self.load(&path).await;
        if was_valid != self.is_valid() {
            self.notifier.validity_changed(self.is_valid());
        }
        result
    }

    /// Replace the store with the backend's requests without announcing the
    /// validity change.
    ///
    /// A fresh manual partitioning has no requests yet; those are gathered
    /// from the backend's device list, kept, and submitted once.
    async fn load(&mut self, path: &PartitioningPath) -> Result<(), BackendError> {
        let requests = match self.backend.manual_requests(path).await {
            Ok(requests) if !requests.is_empty() => requests,
            Ok(_) => match self.backend.gather_requests(path).await {
                Ok(gathered) => {
                    tracing::debug!(%path, count = gathered.len(), "gathered requests");
                    self.store.replace(gathered);
                    if !self.store.requests().is_empty() {
                        self.submit(path).await;
                    }
                    return Ok(());
                }
                Err(e) => return Err(self.load_failed(path, e)),
            },
            Err(e) => return Err(self.load_failed(path, e)),
        };

        tracing::debug!(%path, count = requests.len(), "loaded requests");
        self.store.replace(requests);
        Ok(())
    }

    fn load_failed(&self, path: &PartitioningPath, e: BackendError) -> BackendError {
        tracing::error!(%path, %e, "failed to load requests");
        self.notifier.error(Notification::for_page(e.to_string()));
        e
    }

    /// Assign a mount point chosen from the select (empty clears it).
    pub async fn select_mount_point(
        &mut self,
        device: &str,
        mount_point: &str,
    ) -> Result<(), EditError> {
        let path = self.ready_partitioning()?;
        if let Some(request) = self.store.get(device)
            && request.format_class() == FormatClass::NonMountable
        {
            return Err(EditError::NotMountable(device.to_string()));
        }

        let next = sequencer::apply_mount_point_change(self.store.requests(), device, mount_point)?;
        tracing::info!(device, mount_point, "mount point changed");
        self.commit(&path, next).await;
        Ok(())
    }

    /// Commit a mount point typed by the user.
    pub async fn commit_custom_mount_point(
        &mut self,
        device: &str,
        text: &str,
    ) -> Result<(), EditError> {
        let mount_point = validate::parse_custom_mount_point(text)?;
        self.select_mount_point(device, &mount_point).await
    }

    pub async fn toggle_reformat(&mut self, device: &str, checked: bool) -> Result<(), EditError> {
        let path = self.ready_partitioning()?;
        let request = self
            .store
            .get(device)
            .ok_or_else(|| EditError::UnknownDevice(device.to_string()))?;
        if !validate::can_toggle_reformat(request) {
            return Err(EditError::ReformatLocked(device.to_string()));
        }

        let next = sequencer::apply_reformat_toggle(self.store.requests(), device, checked)?;
        tracing::info!(device, checked, "reformat toggled");
        self.commit(&path, next).await;
        Ok(())
    }

    fn ready_partitioning(&self) -> Result<PartitioningPath, EditError> {
        if !self.session.is_ready() {
            return Err(EditError::NotReady);
        }
        self.session.partitioning().cloned().ok_or(EditError::NotReady)
    }

    fn replace_requests(&mut self, requests: Vec<PartitionRequest>) {
        if self.store.replace(requests) {
            self.notifier.validity_changed(self.store.is_valid());
        }
    }

    /// Keep `next` locally and submit it.
    async fn commit(&mut self, path: &PartitioningPath, next: Vec<PartitionRequest>) {
        self.replace_requests(next);
        self.submit(path).await;
    }

    /// Submit the stored list. A rejection is reported but not rolled back.
    async fn submit(&mut self, path: &PartitioningPath) {
        match sequencer::submit(self.backend.as_ref(), path, self.store.requests()).await {
            Ok(()) => self.submission_error = None,
            Err(e) => {
                self.notifier.error(Notification::for_page(e.to_string()));
                self.submission_error = Some(e);
            }
        }
    }
}
