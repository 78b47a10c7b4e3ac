// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

use crate::{BackendError, BackendErrorKind};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("D-Bus connection error: {0}")]
    Connection(String),

    #[error("D-Bus call failed: {0}")]
    Call(#[from] zbus::Error),

    #[error("Invalid backend data: {0}")]
    ParseError(String),
}

impl From<zbus::zvariant::Error> for ClientError {
    fn from(err: zbus::zvariant::Error) -> Self {
        ClientError::ParseError(err.to_string())
    }
}

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        let kind = match &err {
            ClientError::Connection(_) => BackendErrorKind::Unavailable,
            ClientError::Call(zbus::Error::MethodError(name, _, _)) => {
                BackendErrorKind::from_error_name(name.as_str())
            }
            ClientError::Call(zbus::Error::InputOutput(_)) => BackendErrorKind::Unavailable,
            ClientError::Call(_) => BackendErrorKind::Internal,
            ClientError::ParseError(_) => BackendErrorKind::InvalidInput,
        };

        BackendError::new(kind, err.to_string())
    }
}
