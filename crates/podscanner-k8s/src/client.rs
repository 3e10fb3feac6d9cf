//! Cluster access for the scanner

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::Api;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};

use crate::{ClusterError, RateLimiter};
use podscanner_types::{ContainerSpec, PodRecord};

/// Default client-side burst ceiling
pub const DEFAULT_BURST: u32 = 50;

/// Default client-side requests per second
pub const DEFAULT_QPS: f32 = 25.0;

/// Listing operations the scanner needs from a cluster
///
/// Implementations are shared by every namespace worker and must be safe
/// for concurrent use.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Names of all namespaces, in the order the cluster returns them
    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError>;

    /// Pods in `namespace`, or in every namespace when `None`
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>, ClusterError>;
}

/// Resolved connection settings
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub kubeconfig: PathBuf,
    pub context: Option<String>,
    pub burst: u32,
    pub qps: f32,
}

/// Kubernetes client wrapper
///
/// Every request goes through a shared token bucket so that a wide fan-out
/// of namespace workers stays within the configured burst/QPS.
#[derive(Clone)]
pub struct KubeClient {
    client: kube::Client,
    limiter: Arc<RateLimiter>,
}

impl KubeClient {
    /// Load the kubeconfig and build a client for the selected context
    pub async fn new(settings: &ClientSettings) -> Result<Self, ClusterError> {
        let limiter = RateLimiter::new(settings.burst, settings.qps)?;

        let kubeconfig = Kubeconfig::read_from(&settings.kubeconfig).map_err(|source| {
            ClusterError::Kubeconfig {
                path: settings.kubeconfig.clone(),
                source,
            }
        })?;

        let config = kube::Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: settings.context.clone(),
                ..Default::default()
            },
        )
        .await
        .map_err(|source| ClusterError::Kubeconfig {
            path: settings.kubeconfig.clone(),
            source,
        })?;

        tracing::debug!(
            cluster_url = %config.cluster_url,
            burst = settings.burst,
            qps = settings.qps,
            "connecting to cluster"
        );

        let client = kube::Client::try_from(config).map_err(ClusterError::Client)?;

        Ok(Self {
            client,
            limiter: Arc::new(limiter),
        })
    }

    /// Convert a k8s Pod into the fields the scanner inspects
    fn pod_to_record(pod: Pod) -> PodRecord {
        let mut record = PodRecord::new(pod.metadata.name.unwrap_or_default());
        if let Some(spec) = pod.spec {
            record.containers = spec
                .containers
                .into_iter()
                .map(|c| ContainerSpec::new(c.name, c.image.unwrap_or_default()))
                .collect();
        }

        record
    }
}

#[async_trait]
impl ClusterClient for KubeClient {
    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError> {
        self.limiter.acquire().await;

        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces
            .list(&ListParams::default())
            .await
            .map_err(|e| ClusterError::api("list namespaces", e))?;

        Ok(list
            .items
            .into_iter()
            .map(|ns| ns.metadata.name.unwrap_or_default())
            .collect())
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>, ClusterError> {
        self.limiter.acquire().await;

        let (pods, operation): (Api<Pod>, String) = match namespace {
            Some(ns) => (
                Api::namespaced(self.client.clone(), ns),
                format!("list pods in {}", ns),
            ),
            None => (
                Api::all(self.client.clone()),
                "list pods in all namespaces".to_string(),
            ),
        };

        let list = pods
            .list(&ListParams::default())
            .await
            .map_err(|e| ClusterError::api(operation, e))?;

        Ok(list
            .items
            .into_iter()
            .map(Self::pod_to_record)
            .collect())
    }
}
