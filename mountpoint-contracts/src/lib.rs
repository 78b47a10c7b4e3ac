// SPDX-License-Identifier: GPL-3.0-only

pub mod client;
pub mod protocol;
pub mod traits;

pub use protocol::{BackendError, BackendErrorKind};
pub use traits::PartitioningBackend;
