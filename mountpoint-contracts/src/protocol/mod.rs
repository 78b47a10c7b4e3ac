// SPDX-License-Identifier: GPL-3.0-only

pub mod errors;

pub use errors::{BackendError, BackendErrorKind};
