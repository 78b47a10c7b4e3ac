// SPDX-License-Identifier: GPL-3.0-only

//! Manual partitioning handshake
//!
//! Before any edit the backend must hold a MANUAL partitioning object. When it
//! does not, the boot-loader drive is cleared first and only then is a new
//! object created; a stale drive selection would otherwise make the backend's
//! automatic drive selection fail during partitioning.
//!
//! ```text
//! Uninitialized ─start─▶ Initializing(ResetBootloaderDrive) ─▶ Initializing(CreatePartitioning) ─▶ Ready
//!       │                              │                                    │
//!       └──(already MANUAL)──▶ Ready   └──────────────▶ Failed ◀────────────┘
//! ```
//!
//! The state machine only emits the next [`SetupCall`]; [`SessionInitializer::run`]
//! drives it against a backend.

use mountpoint_contracts::{BackendError, PartitioningBackend};
use mountpoint_types::{PartitioningData, PartitioningMethod, PartitioningPath};

use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    ResetBootloaderDrive,
    CreatePartitioning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing(SetupStep),
    Ready,
    Failed,
}

/// Backend call the handshake is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupCall {
    SetBootloaderDrive(String),
    CreatePartitioning(PartitioningMethod),
}

/// Successful result of a [`SetupCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupReply {
    BootloaderDriveSet,
    Created(PartitioningPath),
}

#[derive(Debug, Default)]
pub struct SessionInitializer {
    state: SessionState,
    partitioning: Option<PartitioningPath>,
}

impl SessionInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Edits are only accepted once ready.
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// The handshake is outstanding; the editing surface shows a loading state.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            SessionState::Uninitialized | SessionState::Initializing(_)
        )
    }

    pub fn partitioning(&self) -> Option<&PartitioningPath> {
        self.partitioning.as_ref()
    }

    /// Begin the handshake for the page's current partitioning data.
    ///
    /// Returns `None` when the data already describes a MANUAL object; the
    /// session is then ready without any backend call.
    pub fn start(&mut self, data: &PartitioningData) -> Result<Option<SetupCall>, SetupError> {
        if self.state != SessionState::Uninitialized {
            return Err(SetupError::AlreadyStarted);
        }

        if let (true, Some(path)) = (data.is_manual(), data.path.as_ref()) {
            tracing::debug!(%path, "partitioning already manual");
            self.partitioning = Some(path.clone());
            self.state = SessionState::Ready;
            return Ok(None);
        }

        tracing::info!(
            method = data.method.as_ref().map(PartitioningMethod::as_str),
            "switching to manual partitioning"
        );
        self.state = SessionState::Initializing(SetupStep::ResetBootloaderDrive);
        Ok(Some(SetupCall::SetBootloaderDrive(String::new())))
    }

    /// Feed the result of the outstanding call and get the next one.
    pub fn resolve(
        &mut self,
        reply: Result<SetupReply, BackendError>,
    ) -> Result<Option<SetupCall>, SetupError> {
        let SessionState::Initializing(step) = self.state else {
            return Err(SetupError::NoOutstandingStep);
        };

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(?step, %e, "manual partitioning setup failed");
                self.state = SessionState::Failed;
                return Err(SetupError::from_step(step, e));
            }
        };

        match (step, reply) {
            (SetupStep::ResetBootloaderDrive, SetupReply::BootloaderDriveSet) => {
                self.state = SessionState::Initializing(SetupStep::CreatePartitioning);
                Ok(Some(SetupCall::CreatePartitioning(PartitioningMethod::Manual)))
            }
            (SetupStep::CreatePartitioning, SetupReply::Created(path)) => {
                tracing::info!(%path, "manual partitioning ready");
                self.partitioning = Some(path);
                self.state = SessionState::Ready;
                Ok(None)
            }
            (step, _) => {
                self.state = SessionState::Failed;
                Err(SetupError::UnexpectedReply(step))
            }
        }
    }

    /// Run the handshake to completion against `backend`.
    ///
    /// Each call is awaited before the next one is issued.
    pub async fn run(
        &mut self,
        backend: &dyn PartitioningBackend,
        data: &PartitioningData,
    ) -> Result<PartitioningPath, SetupError> {
        let mut next = self.start(data)?;

        while let Some(call) = next {
            let reply = match call {
                SetupCall::SetBootloaderDrive(drive) => backend
                    .set_bootloader_drive(&drive)
                    .await
                    .map(|()| SetupReply::BootloaderDriveSet),
                SetupCall::CreatePartitioning(method) => backend
                    .create_partitioning(&method)
                    .await
                    .map(SetupReply::Created),
            };
            next = self.resolve(reply)?;
        }

        // Ready always records the partitioning path.
        self.partitioning
            .clone()
            .ok_or(SetupError::UnexpectedReply(SetupStep::CreatePartitioning))
    }
}
