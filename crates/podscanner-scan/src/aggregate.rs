use podscanner_types::IdentifiedWorkload;
use tokio::sync::mpsc;

/// Drain the closed result channel and sort by namespace
///
/// Only returns once every sender is gone and the channel is empty. The sort
/// is stable and keyed on namespace alone, so records within a namespace
/// keep the order they arrived in.
pub async fn drain_sorted(mut rx: mpsc::Receiver<IdentifiedWorkload>) -> Vec<IdentifiedWorkload> {
    let mut workloads = Vec::with_capacity(rx.len());
    while let Some(workload) = rx.recv().await {
        workloads.push(workload);
    }

    workloads.sort_by(|a, b| a.namespace.cmp(&b.namespace));
    workloads
}
