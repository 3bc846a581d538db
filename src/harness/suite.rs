//! Suite-wide initialization
//!
//! Runs once before any test: pins the node plugin image and waits for the
//! system namespace to converge, then hands out the clock every banner
//! measures against.

use anyhow::Result;
use chrono::Utc;
use std::time::Duration;
use tracing::info;

use crate::config::Settings;
use crate::k8s::{self, ClusterClient};
use crate::utils::SuiteClock;

/// Initialize the suite against the cluster named by the environment.
///
/// When the node daemon set is not yet running the configured image, the
/// image is rewritten and the rollout is polled until every pod in the system
/// namespace reports Running. Retry exhaustion propagates the last failure.
pub async fn initialize(settings: &Settings) -> Result<SuiteClock> {
    let clock = SuiteClock::start();
    info!("Suite started at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));

    let cluster = ClusterClient::connect().await?;
    let node = &settings.node;

    let updated =
        k8s::ensure_node_image(&cluster, &node.namespace, &node.daemonset, &node.image).await?;

    if updated {
        // Head start for the rollout before the first phase poll.
        tokio::time::sleep(Duration::from_secs(node.grace_secs)).await;

        settings
            .pod_wait
            .policy()
            .run("waiting for system pods", || {
                k8s::check_pod_status(&cluster, &node.namespace)
            })
            .await?;

        info!("All pods in {} are Running", node.namespace);
    }

    Ok(clock)
}
