// SPDX-License-Identifier: GPL-3.0-only

//! Domain models for manual mount-point assignment
//!
//! This crate is the single source of truth for the data exchanged between the
//! installer storage backend and the mount-point editor:
//!
//! - **mountpoint-contracts**: encodes these types for D-Bus transport
//! - **mountpoint-editor**: validates and edits them, and derives row state for the page
//!
//! ## Overview
//!
//! - `PartitionRequest` → one discovered partition/filesystem with its assignment
//! - `PartitioningData` → a backend partitioning object, its method and requests
//! - `FormatClass` → what the installer may do with a given format type

pub mod format_class;
pub mod partitioning;
pub mod request;

pub use format_class::FormatClass;
pub use partitioning::{PartitioningData, PartitioningMethod, PartitioningPath};
pub use request::{PartitionRequest, ROOT_MOUNT_POINT};
