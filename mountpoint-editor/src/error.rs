// SPDX-License-Identifier: GPL-3.0-only

use mountpoint_contracts::BackendError;
use thiserror::Error;

use crate::session::SetupStep;

/// Errors raised while applying a single edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("No partition request for device {0}")]
    UnknownDevice(String),

    #[error("Invalid mount point {mount_point:?}: {reason}")]
    InvalidMountPoint {
        mount_point: String,
        reason: &'static str,
    },

    #[error("{0} is not mountable")]
    NotMountable(String),

    #[error("The reformat option of {0} cannot be changed")]
    ReformatLocked(String),

    #[error("Editing is disabled until manual partitioning is ready")]
    NotReady,
}

/// Errors of the manual partitioning handshake. Fatal for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Failed to reset the boot-loader drive: {0}")]
    ResetBootloaderDrive(BackendError),

    #[error("Failed to create manual partitioning: {0}")]
    CreatePartitioning(BackendError),

    #[error("Manual partitioning setup was already started")]
    AlreadyStarted,

    #[error("No manual partitioning setup step is outstanding")]
    NoOutstandingStep,

    #[error("Unexpected backend reply while waiting for {0:?}")]
    UnexpectedReply(SetupStep),
}

impl SetupError {
    pub(crate) fn from_step(step: SetupStep, err: BackendError) -> Self {
        match step {
            SetupStep::ResetBootloaderDrive => Self::ResetBootloaderDrive(err),
            SetupStep::CreatePartitioning => Self::CreatePartitioning(err),
        }
    }
}
