//! Shared types for podscanner
//!
//! This crate contains data structures used across multiple podscanner crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Cluster Resource Types
// ============================================================================

/// A container declared in a pod spec
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
}

impl ContainerSpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// The parts of a pod the scanner cares about
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodRecord {
    pub name: String,
    pub containers: Vec<ContainerSpec>,
}

impl PodRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            containers: Vec::new(),
        }
    }

    /// Builder-style helper for attaching a container
    pub fn with_container(mut self, name: impl Into<String>, image: impl Into<String>) -> Self {
        self.containers.push(ContainerSpec::new(name, image));
        self
    }
}

// ============================================================================
// Scan Results
// ============================================================================

/// A container whose image reference is unpinned
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IdentifiedWorkload {
    pub namespace: String,
    pub pod: String,
    pub container_name: String,
    pub image: String,
}

impl IdentifiedWorkload {
    pub fn new(
        namespace: impl Into<String>,
        pod: impl Into<String>,
        container_name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            pod: pod.into(),
            container_name: container_name.into(),
            image: image.into(),
        }
    }
}

/// A namespace that could not be scanned
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamespaceFailure {
    pub namespace: String,
    pub cause: String,
}

/// Final result of a scan, ready for rendering
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Offending containers, sorted by namespace
    pub workloads: Vec<IdentifiedWorkload>,

    /// Namespaces that failed (only populated in keep-going mode)
    pub failures: Vec<NamespaceFailure>,
}

impl ScanReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

// ============================================================================
// Scan Settings
// ============================================================================

/// How per-namespace failures are handled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Abort the whole scan on the first failed namespace
    #[default]
    FailFast,
    /// Keep scanning and report failed namespaces alongside the results
    KeepGoing,
}

/// Report output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
