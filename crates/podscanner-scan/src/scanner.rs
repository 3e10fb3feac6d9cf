use podscanner_k8s::{ClusterClient, ClusterError};
use podscanner_types::IdentifiedWorkload;
use tokio::sync::mpsc;

use crate::is_unpinned;

/// Scan one namespace and send every unpinned container to `tx`
///
/// Returns the number of records sent. Sending waits while the channel is
/// full. A closed channel ends the scan early, since nobody is left to read.
pub async fn scan_namespace<C>(
    client: &C,
    namespace: &str,
    tx: &mpsc::Sender<IdentifiedWorkload>,
) -> Result<usize, ClusterError>
where
    C: ClusterClient + ?Sized,
{
    let pods = client.list_pods(Some(namespace)).await?;
    let mut sent = 0;

    for pod in pods {
        for container in pod.containers {
            if !is_unpinned(&container.image) {
                continue;
            }

            let workload =
                IdentifiedWorkload::new(namespace, &pod.name, container.name, container.image);
            if tx.send(workload).await.is_err() {
                tracing::debug!(namespace, "result channel closed, stopping");
                return Ok(sent);
            }
            sent += 1;
        }
    }

    Ok(sent)
}
