use std::collections::HashMap;
use std::error::Error as _;
use std::sync::Arc;

use podscanner_k8s::ClusterClient;
use podscanner_types::{IdentifiedWorkload, NamespaceFailure, ScanMode};
use tokio::sync::mpsc;
use tokio::task::{self, JoinSet};

use crate::{ScanError, error_chain, scan_namespace};

/// Run one scanner task per namespace and wait for all of them
///
/// Each task gets its own clone of `tx`; the original is dropped here, so the
/// result channel closes exactly when the last task finishes. The `JoinSet`
/// tracks outstanding work, one entry per namespace, and task ids map back to
/// namespaces so a panicking worker is still attributed.
///
/// In [`ScanMode::FailFast`] the first failed namespace aborts the remaining
/// tasks and is returned as the error. In [`ScanMode::KeepGoing`] failures are
/// collected and returned sorted by namespace.
pub async fn dispatch<C>(
    client: Arc<C>,
    targets: Vec<String>,
    tx: mpsc::Sender<IdentifiedWorkload>,
    mode: ScanMode,
) -> Result<Vec<NamespaceFailure>, ScanError>
where
    C: ClusterClient + ?Sized + 'static,
{
    let mut workers = JoinSet::new();
    let mut names: HashMap<task::Id, String> = HashMap::with_capacity(targets.len());

    for namespace in targets {
        let client = Arc::clone(&client);
        let tx = tx.clone();
        let name = namespace.clone();

        let handle = workers.spawn(async move {
            scan_namespace(client.as_ref(), &namespace, &tx).await
        });
        names.insert(handle.id(), name);
    }
    drop(tx);

    tracing::debug!(workers = workers.len(), "scan workers started");

    let mut failures = Vec::new();
    while let Some(joined) = workers.join_next_with_id().await {
        let (namespace, error) = match joined {
            Ok((id, Ok(found))) => {
                let namespace = names.remove(&id).unwrap_or_default();
                tracing::debug!(namespace = %namespace, found, "namespace scanned");
                continue;
            }
            Ok((id, Err(source))) => {
                let namespace = names.remove(&id).unwrap_or_default();
                let error = ScanError::Namespace {
                    namespace: namespace.clone(),
                    source,
                };
                (namespace, error)
            }
            Err(source) => {
                let namespace = names.remove(&source.id()).unwrap_or_default();
                let error = ScanError::Worker {
                    namespace: namespace.clone(),
                    source,
                };
                (namespace, error)
            }
        };

        match mode {
            ScanMode::FailFast => {
                tracing::error!(
                    namespace = %namespace,
                    error = %error_chain(&error),
                    "namespace scan failed, aborting"
                );
                workers.abort_all();
                return Err(error);
            }
            ScanMode::KeepGoing => {
                let cause = error
                    .source()
                    .map(|source| error_chain(source))
                    .unwrap_or_else(|| error.to_string());
                tracing::warn!(
                    namespace = %namespace,
                    cause = %cause,
                    "namespace scan failed, continuing"
                );
                failures.push(NamespaceFailure { namespace, cause });
            }
        }
    }

    failures.sort_by(|a, b| a.namespace.cmp(&b.namespace));
    Ok(failures)
}
