use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or talking to the cluster
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("cannot read kubeconfig at {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("home directory could not be determined")]
    NoHomeDir,

    #[error("invalid kubeconfig at {}", path.display())]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: kube::config::KubeconfigError,
    },

    #[error("failed to create client")]
    Client(#[source] kube::Error),

    #[error("invalid rate limit: burst={burst}, qps={qps}")]
    RateLimit { burst: u32, qps: f32 },

    #[error("failed to {operation}")]
    Api {
        operation: String,
        #[source]
        source: kube::Error,
    },
}

impl ClusterError {
    /// Wrap an API error with the operation that produced it
    pub fn api(operation: impl Into<String>, source: kube::Error) -> Self {
        Self::Api {
            operation: operation.into(),
            source,
        }
    }
}
