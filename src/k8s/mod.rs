//! Kubernetes API access
//!
//! Typed client operations and CLI shell-outs the harness consumes.

mod client;
mod daemonset;
mod kubectl;
mod pod;
mod workload;

pub use client::ClusterClient;
pub use daemonset::ensure_node_image;
pub use kubectl::Kubectl;
pub use pod::{check_pod_status, pod_phase, pod_snapshot};
pub use workload::{deployment, namespace, service, unique_name};
