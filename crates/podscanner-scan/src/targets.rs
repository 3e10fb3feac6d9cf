use podscanner_k8s::ClusterClient;

use crate::ScanError;

/// Resolve the namespaces to scan
///
/// An explicit namespace is returned as-is without contacting the cluster.
/// Otherwise every namespace is listed, in the order the cluster returns them.
pub async fn resolve_targets<C>(
    client: &C,
    namespace: Option<&str>,
) -> Result<Vec<String>, ScanError>
where
    C: ClusterClient + ?Sized,
{
    match namespace {
        Some(namespace) => {
            tracing::info!(namespace, "--namespace flag used, only scanning one namespace");
            Ok(vec![namespace.to_string()])
        }
        None => {
            tracing::info!("--namespace flag not used, scanning all namespaces");
            client
                .list_namespaces()
                .await
                .map_err(ScanError::Namespaces)
        }
    }
}
