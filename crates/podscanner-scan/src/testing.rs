//! In-memory cluster used by unit tests

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use podscanner_k8s::{ClusterClient, ClusterError, PodRecord};

pub(crate) fn forbidden(operation: &str) -> ClusterError {
    let response = serde_json::from_value(serde_json::json!({
        "status": "Failure",
        "message": format!("{} is forbidden", operation),
        "reason": "Forbidden",
        "code": 403,
    }))
    .unwrap();
    ClusterError::api(operation, kube::Error::Api(response))
}

#[derive(Default)]
pub(crate) struct FakeCluster {
    namespaces: Vec<String>,
    pods: BTreeMap<String, Vec<PodRecord>>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    fail_all_pods: bool,
    fail_namespaces: bool,
    pod_calls: Mutex<Vec<Option<String>>>,
    namespace_calls: Mutex<usize>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        if !self.namespaces.iter().any(|n| n == namespace) {
            self.namespaces.push(namespace.to_string());
        }
        self
    }

    pub fn with_pod(mut self, namespace: &str, pod: &str, containers: &[(&str, &str)]) -> Self {
        self = self.with_namespace(namespace);
        let record = containers
            .iter()
            .fold(PodRecord::new(pod), |record, (name, image)| {
                record.with_container(*name, *image)
            });
        self.pods.entry(namespace.to_string()).or_default().push(record);
        self
    }

    pub fn failing_namespace(mut self, namespace: &str) -> Self {
        self = self.with_namespace(namespace);
        self.failing.insert(namespace.to_string());
        self
    }

    pub fn panicking_namespace(mut self, namespace: &str) -> Self {
        self = self.with_namespace(namespace);
        self.panicking.insert(namespace.to_string());
        self
    }

    pub fn failing_all_pods(mut self) -> Self {
        self.fail_all_pods = true;
        self
    }

    pub fn failing_namespaces(mut self) -> Self {
        self.fail_namespaces = true;
        self
    }

    pub fn pod_calls(&self) -> Vec<Option<String>> {
        self.pod_calls.lock().clone()
    }

    pub fn namespace_calls(&self) -> usize {
        *self.namespace_calls.lock()
    }
}

#[async_trait]
impl ClusterClient for FakeCluster {
    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterError> {
        *self.namespace_calls.lock() += 1;
        if self.fail_namespaces {
            return Err(forbidden("list namespaces"));
        }
        Ok(self.namespaces.clone())
    }

    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>, ClusterError> {
        self.pod_calls.lock().push(namespace.map(str::to_string));

        match namespace {
            None if self.fail_all_pods => Err(forbidden("list pods in all namespaces")),
            None => Ok(self.pods.values().flatten().cloned().collect()),
            Some(ns) if self.panicking.contains(ns) => panic!("pod listing for {} blew up", ns),
            Some(ns) if self.failing.contains(ns) => Err(forbidden(&format!("list pods in {}", ns))),
            Some(ns) => Ok(self.pods.get(ns).cloned().unwrap_or_default()),
        }
    }
}
