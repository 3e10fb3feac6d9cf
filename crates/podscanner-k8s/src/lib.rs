//! Kubernetes client for podscanner
//!
//! This crate provides the cluster-facing side of the scanner: a `ClusterClient`
//! trait for listing namespaces and pods, a `kube`-backed implementation with
//! client-side request throttling, and kubeconfig path resolution.

mod client;
mod error;
mod kubeconfig;
mod rate_limit;

pub use client::{ClientSettings, ClusterClient, DEFAULT_BURST, DEFAULT_QPS, KubeClient};
pub use error::ClusterError;
pub use kubeconfig::resolve_kubeconfig_path;
pub use rate_limit::RateLimiter;

// Re-export types that are used in our public API
pub use podscanner_types::PodRecord;
