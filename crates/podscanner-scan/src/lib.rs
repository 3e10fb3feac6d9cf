//! Namespace scanning for podscanner
//!
//! This crate holds the scan pipeline: estimate the result channel size from a
//! cluster-wide container count, resolve the namespaces to scan, fan out one
//! worker per namespace, then drain and sort the results.

mod aggregate;
mod capacity;
mod dispatch;
mod error;
mod image;
mod scanner;
mod targets;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use tokio::sync::mpsc;

pub use aggregate::drain_sorted;
pub use capacity::{channel_capacity, count_containers};
pub use dispatch::dispatch;
pub use error::{ScanError, error_chain};
pub use image::is_unpinned;
pub use scanner::scan_namespace;
pub use targets::resolve_targets;

// Re-export types used in our public API
pub use podscanner_types::{IdentifiedWorkload, NamespaceFailure, ScanMode, ScanReport};

/// What to scan and how to treat failures
#[derive(Clone, Debug, Default)]
pub struct ScanConfig {
    /// Only scan this namespace; `None` scans every namespace
    pub namespace: Option<String>,
    pub mode: ScanMode,
}

/// Run a complete scan against `client`
pub async fn run_scan<C>(config: &ScanConfig, client: Arc<C>) -> Result<ScanReport, ScanError>
where
    C: podscanner_k8s::ClusterClient + ?Sized + 'static,
{
    let containers = count_containers(client.as_ref()).await?;
    let capacity = channel_capacity(containers);
    tracing::info!(containers, capacity, "sized result channel");

    let targets = resolve_targets(client.as_ref(), config.namespace.as_deref()).await?;
    tracing::info!(namespaces = targets.len(), mode = ?config.mode, "starting scan");

    let (tx, rx) = mpsc::channel(capacity);
    let failures = dispatch(client, targets, tx, config.mode).await?;
    let workloads = drain_sorted(rx).await;

    tracing::info!(
        found = workloads.len(),
        failed = failures.len(),
        "scan complete"
    );

    Ok(ScanReport {
        workloads,
        failures,
    })
}
