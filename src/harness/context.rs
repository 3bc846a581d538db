//! Test-facing cluster façade
//!
//! One `TestContext` is constructed per test and owns its cluster handle for
//! that test's lifetime. Verification, creation, and deletion helpers all go
//! through it.

#![allow(dead_code)]

use anyhow::{Context, Result};
use kube::api::PostParams;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Settings;
use crate::diff;
use crate::error::CheckFailure;
use crate::k8s::{self, ClusterClient, Kubectl};
use crate::output;
use crate::utils::{log_banner, LogLevel, RetryPolicy, SuiteClock};

/// Per-test façade over the cluster
pub struct TestContext {
    cluster: ClusterClient,
    kubectl: Kubectl,
    clock: SuiteClock,
    settings: Settings,
}

impl TestContext {
    /// Acquire a fresh cluster handle for one test
    pub async fn new(clock: SuiteClock, settings: Settings) -> Result<Self> {
        let cluster = ClusterClient::connect().await?;

        // Blank line so the test's first log starts on its own line.
        info!("");

        Ok(Self {
            cluster,
            kubectl: Kubectl::from_env(),
            clock,
            settings,
        })
    }

    pub fn cluster(&self) -> &ClusterClient {
        &self.cluster
    }

    /// Structural comparison of two values.
    ///
    /// Mapping key order is irrelevant, sequence order is significant. On
    /// mismatch the failure carries a per-path diff naming what differs.
    pub fn assert_same(left: &Value, right: &Value) -> Result<()> {
        let report = diff::diff(left, right);
        if report.is_empty() {
            Ok(())
        } else {
            Err(CheckFailure::Mismatch { report }.into())
        }
    }

    /// See [`output::write_json`]
    pub fn write_json(path: impl AsRef<Path>, data: &impl Serialize) -> Result<()> {
        output::write_json(path, data)
    }

    /// Emit `msg` in an ASCII box prefixed with elapsed suite time
    pub fn log_banner(&self, msg: &str, level: LogLevel) {
        log_banner(&self.clock, msg, level);
    }

    /// Assert every pod in `namespace` is Running, printing each pod scanned
    pub async fn check_pod_status(&self, namespace: &str) -> Result<()> {
        k8s::check_pod_status(&self.cluster, namespace).await
    }

    /// Map of pod name to phase for every pod in `namespace`
    pub async fn pod_snapshot(&self, namespace: &str) -> Result<BTreeMap<String, String>> {
        k8s::pod_snapshot(&self.cluster, namespace).await
    }

    /// Create a namespace; an existing namespace of the same name is an error
    pub async fn create_namespace(&self, name: &str) -> Result<()> {
        self.cluster
            .namespaces()
            .create(&PostParams::default(), &k8s::namespace(name))
            .await
            .with_context(|| format!("Failed to create namespace {name}"))?;
        info!("Created namespace {}", name);
        Ok(())
    }

    /// Create a namespace, deployment, and service for one test workload.
    ///
    /// No rollback on partial failure: creates that already succeeded stay in
    /// place when a later one fails. Pods are not awaited; callers poll for
    /// readiness themselves.
    pub async fn create_service(
        &self,
        image: &str,
        name: &str,
        namespace: &str,
        port: i32,
        replicas: i32,
    ) -> Result<()> {
        self.create_namespace(namespace).await?;

        let deployment = k8s::deployment(name, image, port, replicas);
        let created = self
            .cluster
            .deployments(namespace)
            .create(&PostParams::default(), &deployment)
            .await
            .with_context(|| format!("Failed to create deployment {namespace}/{name}"))?;
        debug!("Deployment created, status={:?}", created.status);

        let service = k8s::service(name, port);
        let created = self
            .cluster
            .services(namespace)
            .create(&PostParams::default(), &service)
            .await
            .with_context(|| format!("Failed to create service {namespace}/{name}"))?;
        debug!("Service created, status={:?}", created.status);

        Ok(())
    }

    /// Delete a resource via the cluster CLI and poll until it is gone.
    ///
    /// The delete itself is best effort; a failure there is taken to mean the
    /// resource was already absent. A resource that survives every
    /// confirmation poll fails with [`CheckFailure::StillPresent`].
    pub async fn delete_and_confirm(&self, name: &str, resource_type: &str) -> Result<()> {
        if !self.kubectl.delete(resource_type, name).await? {
            debug!(
                "delete {} {} reported failure, assuming already gone",
                resource_type, name
            );
        }

        let policy = self.settings.delete_wait.policy();
        confirm_gone(&policy, resource_type, name, || {
            self.kubectl.exists(resource_type, name)
        })
        .await
    }
}

/// Poll `probe` (true = still present) until the resource is gone or the
/// budget runs out
async fn confirm_gone<F, Fut>(
    policy: &RetryPolicy,
    kind: &str,
    name: &str,
    mut probe: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let attempts = policy.attempts.max(1);

    for attempt in 1..=attempts {
        if !probe().await? {
            debug!("{kind} {name} is gone");
            return Ok(());
        }
        debug!("{kind} {name} still present (attempt {attempt}/{attempts})");
        if attempt < attempts {
            tokio::time::sleep(policy.wait).await;
        }
    }

    Err(CheckFailure::StillPresent {
        kind: kind.to_string(),
        name: name.to_string(),
        attempts,
    }
    .into())
}
