//! Node plugin daemon-set management
//!
//! Pins the networking plugin's node daemon set to the image under test.

use anyhow::{Context, Result};
use k8s_openapi::api::apps::v1::DaemonSet;
use kube::api::PostParams;
use tracing::{info, warn};

use super::ClusterClient;

/// Rewrite the image of every pod-template container named `container_name`.
///
/// Returns true when any image was changed.
pub fn pin_image(ds: &mut DaemonSet, container_name: &str, image: &str) -> bool {
    let mut changed = false;

    let Some(pod_spec) = ds.spec.as_mut().and_then(|spec| spec.template.spec.as_mut()) else {
        return false;
    };

    for container in &mut pod_spec.containers {
        if container.name == container_name && container.image.as_deref() != Some(image) {
            warn!(
                "Repinning {} image: {} -> {}",
                container_name,
                container.image.as_deref().unwrap_or("<none>"),
                image
            );
            container.image = Some(image.to_string());
            changed = true;
        }
    }

    changed
}

/// Fetch the daemon set and replace it with the pinned image if it differs.
///
/// Returns true when an update was issued; callers are responsible for
/// waiting out the resulting rollout.
pub async fn ensure_node_image(
    cluster: &ClusterClient,
    namespace: &str,
    name: &str,
    image: &str,
) -> Result<bool> {
    let api = cluster.daemon_sets(namespace);
    let mut ds = api
        .get(name)
        .await
        .with_context(|| format!("Failed to fetch daemon set {namespace}/{name}"))?;

    if !pin_image(&mut ds, name, image) {
        info!("Daemon set {}/{} already runs {}", namespace, name, image);
        return Ok(false);
    }

    api.replace(name, &PostParams::default(), &ds)
        .await
        .with_context(|| format!("Failed to replace daemon set {namespace}/{name}"))?;
    info!("Updated daemon set {}/{} to {}", namespace, name, image);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::DaemonSetSpec;
    use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
    use kube::core::ObjectMeta;

    fn daemon_set(containers: Vec<(&str, &str)>) -> DaemonSet {
        DaemonSet {
            metadata: ObjectMeta {
                name: Some("calico-node".to_string()),
                ..Default::default()
            },
            spec: Some(DaemonSetSpec {
                template: PodTemplateSpec {
                    spec: Some(PodSpec {
                        containers: containers
                            .into_iter()
                            .map(|(name, image)| Container {
                                name: name.to_string(),
                                image: Some(image.to_string()),
                                ..Default::default()
                            })
                            .collect(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn image_of(ds: &DaemonSet, container: &str) -> String {
        ds.spec
            .as_ref()
            .unwrap()
            .template
            .spec
            .as_ref()
            .unwrap()
            .containers
            .iter()
            .find(|c| c.name == container)
            .unwrap()
            .image
            .clone()
            .unwrap()
    }

    #[test]
    fn test_pin_rewrites_matching_container() {
        let mut ds = daemon_set(vec![("calico-node", "calico/node:v3.20")]);

        let changed = pin_image(&mut ds, "calico-node", "calico/node:latest-amd64");

        assert!(changed);
        assert_eq!(image_of(&ds, "calico-node"), "calico/node:latest-amd64");
    }

    #[test]
    fn test_pin_skips_other_containers() {
        let mut ds = daemon_set(vec![
            ("install-cni", "calico/cni:v3.20"),
            ("calico-node", "calico/node:latest-amd64"),
        ]);

        let changed = pin_image(&mut ds, "calico-node", "calico/node:latest-amd64");

        assert!(!changed);
        assert_eq!(image_of(&ds, "install-cni"), "calico/cni:v3.20");
    }

    #[test]
    fn test_pin_is_noop_when_already_pinned() {
        let mut ds = daemon_set(vec![("calico-node", "calico/node:latest-amd64")]);
        assert!(!pin_image(&mut ds, "calico-node", "calico/node:latest-amd64"));
    }

    #[test]
    fn test_pin_handles_missing_spec() {
        let mut ds = DaemonSet::default();
        assert!(!pin_image(&mut ds, "calico-node", "calico/node:latest-amd64"));
    }
}
