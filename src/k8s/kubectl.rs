//! Cluster CLI invocation
//!
//! Shells out to kubectl for the flows where the CLI, not the API client, is
//! the source of truth. Exit code 0 means the resource exists (get) or was
//! deleted (delete).

use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use tokio::process::Command;
use tracing::debug;

/// Wrapper around the kubectl binary
#[derive(Clone, Debug, Default)]
pub struct Kubectl {
    kubeconfig: Option<OsString>,
}

impl Kubectl {
    /// Pick up `KUBECONFIG` from the environment when present
    pub fn from_env() -> Self {
        Self {
            kubeconfig: env::var_os("KUBECONFIG"),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("kubectl");
        cmd.args(args);
        if let Some(path) = &self.kubeconfig {
            cmd.env("KUBECONFIG", path);
        }
        cmd
    }

    /// `kubectl get <kind> <name>`; Ok(true) when the resource exists
    pub async fn exists(&self, kind: &str, name: &str) -> Result<bool> {
        let output = self
            .command(&["get", kind, name])
            .output()
            .await
            .context("Failed to execute kubectl")?;

        debug!("kubectl get {} {}: {}", kind, name, output.status);
        Ok(output.status.success())
    }

    /// `kubectl delete <kind> <name>`; Ok(false) when kubectl reported
    /// failure, typically because the resource is already gone
    pub async fn delete(&self, kind: &str, name: &str) -> Result<bool> {
        let output = self
            .command(&["delete", kind, name])
            .output()
            .await
            .context("Failed to execute kubectl")?;

        if !output.status.success() {
            debug!(
                "kubectl delete {} {} failed: {}",
                kind,
                name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(output.status.success())
    }
}
