// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PartitionRequest;

/// Partitioning method of a backend partitioning object.
///
/// Unknown method names are kept verbatim so a newer backend does not break
/// the editor; they are simply "not manual".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartitioningMethod {
    Automatic,
    Custom,
    Manual,
    Interactive,
    Blivet,
    Other(String),
}

impl PartitioningMethod {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Automatic => "AUTOMATIC",
            Self::Custom => "CUSTOM",
            Self::Manual => "MANUAL",
            Self::Interactive => "INTERACTIVE",
            Self::Blivet => "BLIVET",
            Self::Other(name) => name,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual)
    }
}

impl From<&str> for PartitioningMethod {
    fn from(value: &str) -> Self {
        match value {
            "AUTOMATIC" => Self::Automatic,
            "CUSTOM" => Self::Custom,
            "MANUAL" => Self::Manual,
            "INTERACTIVE" => Self::Interactive,
            "BLIVET" => Self::Blivet,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for PartitioningMethod {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<PartitioningMethod> for String {
    fn from(value: PartitioningMethod) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PartitioningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle of a backend partitioning object (a D-Bus object path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitioningPath(String);

impl PartitioningPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitioningPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a backend partitioning object as read by the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitioningData {
    /// `None` until a partitioning object has been created
    pub path: Option<PartitioningPath>,
    pub method: Option<PartitioningMethod>,
    /// Backend enumeration order
    #[serde(default)]
    pub requests: Vec<PartitionRequest>,
}

impl PartitioningData {
    /// No partitioning object exists yet.
    pub fn empty() -> Self {
        Self {
            path: None,
            method: None,
            requests: Vec::new(),
        }
    }

    pub fn is_manual(&self) -> bool {
        self.method.as_ref().is_some_and(PartitioningMethod::is_manual)
    }
}
