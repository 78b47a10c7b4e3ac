// SPDX-License-Identifier: GPL-3.0-only

//! Shared D-Bus connection management
//!
//! The installer runs its modules on a private bus whose address is published
//! in a file. The connection is established once and reused by every client.

use std::path::Path;
use std::sync::OnceLock;

use zbus::Connection;

use super::error::ClientError;

/// Cached installer bus connection
static INSTALLER_CONNECTION: OnceLock<Connection> = OnceLock::new();

/// Which bus the storage module lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusTarget {
    /// An explicit D-Bus address, e.g. `unix:path=/run/anaconda/bus`
    Address(String),
    Session,
}

impl BusTarget {
    /// Prefer an explicit address, then the address file, then the session bus.
    pub fn resolve(address: Option<&str>, address_file: &Path) -> Self {
        if let Some(address) = address.map(str::trim).filter(|a| !a.is_empty()) {
            return Self::Address(address.to_string());
        }

        match std::fs::read_to_string(address_file) {
            Ok(contents) if !contents.trim().is_empty() => {
                Self::Address(contents.trim().to_string())
            }
            Ok(_) => {
                tracing::warn!(file = %address_file.display(), "bus address file is empty");
                Self::Session
            }
            Err(e) => {
                tracing::debug!(file = %address_file.display(), %e, "no bus address file");
                Self::Session
            }
        }
    }
}

async fn connect(target: &BusTarget) -> Result<Connection, ClientError> {
    let result = match target {
        BusTarget::Address(address) => match zbus::connection::Builder::address(address.as_str()) {
            Ok(builder) => builder.build().await,
            Err(e) => Err(e),
        },
        BusTarget::Session => Connection::session().await,
    };

    result.map_err(|e| ClientError::Connection(format!("Failed to connect to {target:?}: {e}")))
}

/// Get or create the shared installer bus connection
///
/// The first successful call decides the bus; later calls reuse it regardless
/// of `target`.
pub async fn shared_connection(target: &BusTarget) -> Result<&'static Connection, ClientError> {
    if let Some(conn) = INSTALLER_CONNECTION.get() {
        return Ok(conn);
    }

    let conn = connect(target).await?;
    tracing::debug!(?target, "connected to installer bus");

    // Another task may have won the race; the OnceLock keeps exactly one.
    let _ = INSTALLER_CONNECTION.set(conn);

    INSTALLER_CONNECTION.get().ok_or_else(|| {
        ClientError::Connection("Failed to initialize shared installer bus connection".to_string())
    })
}
