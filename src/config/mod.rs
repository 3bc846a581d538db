//! Harness configuration
//!
//! Handles loading and managing harness settings.

#![allow(dead_code)]

use anyhow::Result;
use serde::{Deserialize, Serialize};

mod env;
mod file;

pub use env::{print_env_help, EnvOverrides};

use crate::utils::RetryPolicy;

/// Harness settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Networking plugin node daemon set under test
    pub node: NodeSettings,

    /// Polling for pods to reach Running after a node plugin update
    pub pod_wait: RetrySettings,

    /// Polling for a deleted resource to disappear
    pub delete_wait: RetrySettings,
}

/// Identity and image of the node plugin daemon set
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    /// Daemon set name, which is also its container's name
    pub daemonset: String,

    /// Namespace the daemon set runs in
    pub namespace: String,

    /// Image every node container must run
    pub image: String,

    /// Head start given to a rollout before polling pod phases
    pub grace_secs: u64,
}

/// Attempt budget and fixed wait for one polling loop
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RetrySettings {
    pub retries: u32,
    pub wait_secs: u64,
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::from_secs(self.retries, self.wait_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node: NodeSettings::default(),
            pod_wait: RetrySettings {
                retries: 20,
                wait_secs: 3,
            },
            delete_wait: RetrySettings {
                retries: 10,
                wait_secs: 10,
            },
        }
    }
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            daemonset: "calico-node".to_string(),
            namespace: "kube-system".to_string(),
            image: "calico/node:latest-amd64".to_string(),
            grace_secs: 3,
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.node.daemonset.is_empty() {
            anyhow::bail!("node.daemonset must not be empty");
        }
        if self.node.image.is_empty() {
            anyhow::bail!("node.image must not be empty");
        }
        if self.pod_wait.retries == 0 || self.delete_wait.retries == 0 {
            anyhow::bail!("retry budgets must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.node.daemonset, "calico-node");
        assert_eq!(settings.node.namespace, "kube-system");
        assert_eq!(settings.node.image, "calico/node:latest-amd64");
        assert_eq!(settings.pod_wait.retries, 20);
        assert_eq!(settings.pod_wait.wait_secs, 3);
        assert_eq!(settings.delete_wait.retries, 10);
        assert_eq!(settings.delete_wait.wait_secs, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let settings: Settings =
            serde_yaml::from_str("node:\n  image: calico/node:v3.26\n").unwrap();
        assert_eq!(settings.node.image, "calico/node:v3.26");
        assert_eq!(settings.node.daemonset, "calico-node");
        assert_eq!(settings.pod_wait.retries, 20);
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let mut settings = Settings::default();
        settings.delete_wait.retries = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_image() {
        let mut settings = Settings::default();
        settings.node.image = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_retry_settings_to_policy() {
        let policy = RetrySettings {
            retries: 5,
            wait_secs: 2,
        }
        .policy();
        assert_eq!(policy.attempts, 5);
        assert_eq!(policy.wait.as_secs(), 2);
    }
}
