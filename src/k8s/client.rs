//! Kubernetes client wrapper
//!
//! Provides the typed cluster handle every harness operation goes through.

#![allow(dead_code)]

use anyhow::{Context, Result};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use kube::api::Api;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::env;
use tracing::debug;

/// Handle to a cluster's control-plane API
#[derive(Clone)]
pub struct ClusterClient {
    client: Client,
}

impl ClusterClient {
    /// Connect using the credentials file named by `KUBECONFIG`, falling back
    /// to the client library's default resolution when the variable is unset.
    pub async fn connect() -> Result<Self> {
        let client = match env::var("KUBECONFIG") {
            Ok(path) if !path.is_empty() => {
                debug!("Loading cluster credentials from {}", path);
                let kubeconfig = Kubeconfig::read_from(&path)
                    .with_context(|| format!("Failed to read kubeconfig: {path}"))?;
                let config =
                    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                        .await
                        .context("Failed to build client config from kubeconfig")?;
                Client::try_from(config).context("Failed to create Kubernetes client")?
            }
            _ => Client::try_default()
                .await
                .context("Failed to create Kubernetes client")?,
        };

        Ok(Self { client })
    }

    /// Get the underlying kube client
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn namespaces(&self) -> Api<Namespace> {
        Api::all(self.client.clone())
    }

    pub fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }

    pub fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }

    pub fn services(&self, namespace: &str) -> Api<Service> {
        Api::namespaced(self.client.clone(), namespace)
    }

    pub fn daemon_sets(&self, namespace: &str) -> Api<DaemonSet> {
        Api::namespaced(self.client.clone(), namespace)
    }
}
