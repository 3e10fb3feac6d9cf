use std::error::Error as StdError;

use podscanner_k8s::ClusterError;
use thiserror::Error;

/// Errors that abort a scan
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to count containers")]
    Capacity(#[source] ClusterError),

    #[error("failed to list namespaces")]
    Namespaces(#[source] ClusterError),

    #[error("failed to scan namespace {namespace}")]
    Namespace {
        namespace: String,
        #[source]
        source: ClusterError,
    },

    #[error("scan worker for namespace {namespace} did not complete")]
    Worker {
        namespace: String,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Flatten an error and its sources into one line
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
