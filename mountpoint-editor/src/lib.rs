// SPDX-License-Identifier: GPL-3.0-only

//! Manual mount-point assignment for the installer
//!
//! Keeps the mapping from discovered partitions to mount points and reformat
//! flags, enforces the rules that keep it installable, and puts the storage
//! backend into manual partitioning mode before any edit.
//!
//! - [`validate`]: pure assignment rules (root reformat, duplicates, row controls)
//! - [`sequencer`]: derives full request lists from single edits and submits them
//! - [`session`]: the reset-then-create handshake as a state machine
//! - [`page`]: the editing page the installer front-end hosts

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod page;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod update;
pub mod validate;
pub mod view;

pub use error::{EditError, SetupError};
pub use page::{MountPointPage, Notification, Notifier, STEP_ID};
pub use session::{SessionInitializer, SessionState, SetupCall, SetupReply, SetupStep};
pub use state::{PartitionRecordStore, PartitionRow};
