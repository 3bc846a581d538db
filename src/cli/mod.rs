//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// System test harness for Kubernetes networking plugins
#[derive(Parser, Debug)]
#[command(name = "netcheck")]
#[command(version = "0.1.0")]
#[command(about = "Drive a live cluster through networking plugin system checks")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a settings file (overrides discovery)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the suite: pin the node plugin image and wait for the
    /// system namespace to converge
    Suite,

    /// Check that every pod in a namespace is Running
    Check(CheckArgs),

    /// Create a namespace, deployment, and service for a test workload
    Deploy(DeployArgs),

    /// Delete a resource and confirm it is gone
    Delete(DeleteArgs),

    /// Compare two JSON state files structurally
    Compare(CompareArgs),

    /// Manage harness settings
    Config(ConfigArgs),
}

/// Arguments for check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Namespace to scan
    #[arg(short, long, default_value = "default")]
    pub namespace: String,

    /// Write a name-to-phase snapshot to this JSON file
    #[arg(short, long)]
    pub snapshot: Option<String>,
}

/// Arguments for deploy command
#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Container image to run
    #[arg(short, long)]
    pub image: String,

    /// Workload name, also used as the app label
    #[arg(short, long)]
    pub name: String,

    /// Target namespace (generated from the name when omitted)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Port the container exposes and the service routes to
    #[arg(short, long, default_value = "80")]
    pub port: i32,

    /// Number of pod replicas
    #[arg(short, long, default_value = "2")]
    pub replicas: i32,
}

/// Arguments for delete command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Resource type (e.g. pod, deployment, ns)
    pub resource_type: String,

    /// Resource name
    pub name: String,
}

/// Arguments for compare command
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Expected state file
    pub expected: String,

    /// Observed state file
    pub observed: String,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example settings file
    Init {
        /// Output path
        #[arg(short, long, default_value = "./netcheck.yaml")]
        output: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective settings
    Show {
        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// List recognized environment variables
    Env,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deploy() {
        let args = Args::try_parse_from([
            "netcheck", "deploy", "--image", "nginx:latest", "--name", "web", "--namespace",
            "test-ns",
        ])
        .unwrap();

        match args.command {
            Command::Deploy(deploy) => {
                assert_eq!(deploy.image, "nginx:latest");
                assert_eq!(deploy.name, "web");
                assert_eq!(deploy.namespace.as_deref(), Some("test-ns"));
                assert_eq!(deploy.port, 80);
                assert_eq!(deploy.replicas, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_positional() {
        let args = Args::try_parse_from(["netcheck", "delete", "ns", "test-ns"]).unwrap();
        match args.command {
            Command::Delete(delete) => {
                assert_eq!(delete.resource_type, "ns");
                assert_eq!(delete.name, "test-ns");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_deploy_requires_image() {
        assert!(Args::try_parse_from(["netcheck", "deploy", "--name", "web"]).is_err());
    }
}
