// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendErrorKind {
    InvalidInput,
    NotFound,
    PermissionDenied,
    Unsupported,
    Unavailable,
    Internal,
}

impl BackendErrorKind {
    /// Best-effort classification of a D-Bus error name.
    pub fn from_error_name(name: &str) -> Self {
        let short = name.rsplit('.').next().unwrap_or(name);
        match short {
            "InvalidArgs" | "InvalidValueError" | "InvalidSignature" => Self::InvalidInput,
            "UnknownObject" | "UnknownInterface" | "UnknownProperty" | "UnknownMethod" => {
                Self::NotFound
            }
            "AccessDenied" | "AuthFailed" | "PropertyReadOnly" => Self::PermissionDenied,
            "NotSupported" | "UnsupportedValueError" => Self::Unsupported,
            "ServiceUnknown" | "NameHasNoOwner" | "NoReply" | "Disconnected" | "Timeout" => {
                Self::Unavailable
            }
            _ => Self::Internal,
        }
    }
}

/// A rejected backend call, reduced to something the page can show.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
