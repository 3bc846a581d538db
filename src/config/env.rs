//! Environment variable configuration
//!
//! Provides environment variable overrides for harness settings.

use std::env;

use super::Settings;

/// Environment variable prefix
const ENV_PREFIX: &str = "NETCHECK";

/// Overrides read from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvOverrides {
    /// Node image from NETCHECK_NODE_IMAGE
    pub node_image: Option<String>,
    /// Settings file from NETCHECK_CONFIG
    pub config_file: Option<String>,
    /// Verbose from NETCHECK_VERBOSE
    pub verbose: Option<bool>,
    /// Pod wait retries from NETCHECK_POD_RETRIES
    pub pod_retries: Option<u32>,
    /// Pod wait interval from NETCHECK_POD_WAIT
    pub pod_wait_secs: Option<u64>,
    /// Delete confirmation retries from NETCHECK_DELETE_RETRIES
    pub delete_retries: Option<u32>,
    /// Delete confirmation interval from NETCHECK_DELETE_WAIT
    pub delete_wait_secs: Option<u64>,
    /// Kubeconfig from KUBECONFIG
    pub kubeconfig: Option<String>,
}

impl EnvOverrides {
    /// Load overrides from environment variables
    pub fn load() -> Self {
        Self {
            node_image: get_env("NODE_IMAGE"),
            config_file: get_env("CONFIG"),
            verbose: get_env_bool("VERBOSE"),
            pod_retries: get_env_parse("POD_RETRIES"),
            pod_wait_secs: get_env_parse("POD_WAIT"),
            delete_retries: get_env_parse("DELETE_RETRIES"),
            delete_wait_secs: get_env_parse("DELETE_WAIT"),
            kubeconfig: env::var("KUBECONFIG").ok(),
        }
    }

    /// Fold the overrides into `settings`
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(image) = &self.node_image {
            settings.node.image = image.clone();
        }
        if let Some(retries) = self.pod_retries {
            settings.pod_wait.retries = retries;
        }
        if let Some(wait) = self.pod_wait_secs {
            settings.pod_wait.wait_secs = wait;
        }
        if let Some(retries) = self.delete_retries {
            settings.delete_wait.retries = retries;
        }
        if let Some(wait) = self.delete_wait_secs {
            settings.delete_wait.wait_secs = wait;
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Print all recognized environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_NODE_IMAGE      Node plugin image the suite pins");
    println!("  {ENV_PREFIX}_CONFIG          Path to a settings file");
    println!("  {ENV_PREFIX}_VERBOSE         Enable verbose output (true/false)");
    println!("  {ENV_PREFIX}_POD_RETRIES     Pod wait attempt budget");
    println!("  {ENV_PREFIX}_POD_WAIT        Pod wait interval in seconds");
    println!("  {ENV_PREFIX}_DELETE_RETRIES  Delete confirmation attempt budget");
    println!("  {ENV_PREFIX}_DELETE_WAIT     Delete confirmation interval in seconds");
    println!("  KUBECONFIG               Path to cluster credentials");
    println!();
    println!("Example:");
    println!("  export KUBECONFIG=~/.kube/test-cluster");
    println!("  export {ENV_PREFIX}_NODE_IMAGE=calico/node:latest-amd64");
    println!("  netcheck suite");
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn node_image(mut self, image: impl Into<String>) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_NODE_IMAGE"), image.into()));
        self
    }

    pub fn pod_retries(mut self, retries: u32) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_POD_RETRIES"), retries.to_string()));
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_VERBOSE"), verbose.to_string()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_default_to_none() {
        let overrides = EnvOverrides::default();
        assert!(overrides.node_image.is_none());
        assert!(overrides.pod_retries.is_none());
    }

    #[test]
    fn test_apply_folds_into_settings() {
        let overrides = EnvOverrides {
            node_image: Some("calico/node:v3.26".to_string()),
            pod_retries: Some(5),
            ..Default::default()
        };

        let mut settings = Settings::default();
        overrides.apply(&mut settings);

        assert_eq!(settings.node.image, "calico/node:v3.26");
        assert_eq!(settings.pod_wait.retries, 5);
        assert_eq!(settings.delete_wait.retries, 10);
    }

    #[test]
    fn test_env_builder_round_trip() {
        let _guard = EnvBuilder::new()
            .node_image("calico/node:test")
            .pod_retries(7)
            .verbose(true)
            .apply_scoped();

        let overrides = EnvOverrides::load();
        assert_eq!(overrides.node_image, Some("calico/node:test".to_string()));
        assert_eq!(overrides.pod_retries, Some(7));
        assert_eq!(overrides.verbose, Some(true));
    }
}
