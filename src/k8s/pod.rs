//! Pod status inspection
//!
//! Phase scans over the pods of a namespace.

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use std::collections::BTreeMap;

use super::ClusterClient;
use crate::error::CheckFailure;

const RUNNING: &str = "Running";

/// A pod's lifecycle phase, `Unknown` when the API has not reported one
pub fn pod_phase(pod: &Pod) -> &str {
    pod.status
        .as_ref()
        .and_then(|status| status.phase.as_deref())
        .unwrap_or("Unknown")
}

/// Assert every pod in `namespace` is Running.
///
/// Scans in API list order, printing each pod checked, and fails on the
/// first pod found in another phase without looking at the rest.
pub async fn check_pod_status(cluster: &ClusterClient, namespace: &str) -> Result<()> {
    let pods = cluster
        .pods(namespace)
        .list(&ListParams::default())
        .await
        .with_context(|| format!("Failed to list pods in {namespace}"))?;

    scan_phases(namespace, &pods.items)
}

/// Map of pod name to phase for every pod in `namespace`
pub async fn pod_snapshot(
    cluster: &ClusterClient,
    namespace: &str,
) -> Result<BTreeMap<String, String>> {
    let pods = cluster
        .pods(namespace)
        .list(&ListParams::default())
        .await
        .with_context(|| format!("Failed to list pods in {namespace}"))?;

    Ok(pods
        .items
        .iter()
        .map(|pod| {
            let name = pod.metadata.name.as_deref().unwrap_or("unknown").to_string();
            (name, pod_phase(pod).to_string())
        })
        .collect())
}

/// List-order scan that short-circuits on the first non-Running pod
fn scan_phases(namespace: &str, pods: &[Pod]) -> Result<()> {
    for pod in pods {
        let name = pod.metadata.name.as_deref().unwrap_or("unknown");
        let pod_namespace = pod.metadata.namespace.as_deref().unwrap_or(namespace);
        let phase = pod_phase(pod);

        if phase != RUNNING {
            return Err(CheckFailure::PodNotRunning {
                name: name.to_string(),
                namespace: pod_namespace.to_string(),
                phase: phase.to_string(),
            }
            .into());
        }

        println!("{name}\t{pod_namespace}\t{phase}");
    }

    Ok(())
}
