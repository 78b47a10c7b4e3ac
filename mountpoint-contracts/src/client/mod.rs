// SPDX-License-Identifier: GPL-3.0-only

//! D-Bus client for the installer storage module

pub mod codec;
pub mod connection;
pub mod error;
pub mod storage;

pub use connection::{BusTarget, shared_connection};
pub use error::ClientError;
pub use storage::StorageClient;
