use podscanner_k8s::ClusterClient;

use crate::ScanError;

/// Count every container in every pod across the cluster
///
/// Issues a single cluster-wide pod listing.
pub async fn count_containers<C>(client: &C) -> Result<usize, ScanError>
where
    C: ClusterClient + ?Sized,
{
    let pods = client.list_pods(None).await.map_err(ScanError::Capacity)?;
    Ok(pods.iter().map(|pod| pod.containers.len()).sum())
}

/// Result channel size for `containers` known containers
///
/// Adds 10% headroom for containers started between the estimate and the
/// scan. This is a best-effort bound; faster growth can still fill the
/// channel. Never returns zero.
pub fn channel_capacity(containers: usize) -> usize {
    containers.saturating_add(containers / 10).max(1)
}
