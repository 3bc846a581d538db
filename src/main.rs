//! netcheck - System test harness for Kubernetes networking plugins
//!
//! Drives a live cluster through the checks a networking plugin's
//! integration suite relies on: node plugin image pinning, pod phase scans,
//! test workload creation, and deletion with confirmation.
//!
//! ## Usage
//!
//! ```bash
//! # Pin the node plugin image and wait for kube-system to converge
//! netcheck suite
//!
//! # Assert every pod in a namespace is Running
//! netcheck check --namespace kube-system
//!
//! # Create a test workload (namespace + deployment + service)
//! netcheck deploy --image nginx:latest --name web --namespace test-ns --port 80
//!
//! # Delete a resource and confirm it is gone
//! netcheck delete ns test-ns
//!
//! # Structurally compare two recorded states
//! netcheck compare expected.json observed.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod config;
mod diff;
mod error;
mod harness;
mod k8s;
mod output;
mod utils;

use cli::Args;
use config::{EnvOverrides, Settings};
use harness::{suite, TestContext};
use utils::{init_logger, LogLevel, SuiteClock};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let overrides = EnvOverrides::load();

    let verbose = args.verbose || overrides.verbose.unwrap_or(false);
    init_logger(if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let config_path = args.config.clone().or_else(|| overrides.config_file.clone());
    let mut settings = match &config_path {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };
    overrides.apply(&mut settings);
    settings.validate()?;

    match args.command {
        cli::Command::Suite => {
            let clock = suite::initialize(&settings).await?;
            let ctx = TestContext::new(clock, settings).await?;
            ctx.log_banner("Suite initialization complete", LogLevel::Info);
        }

        cli::Command::Check(check) => {
            let ctx = TestContext::new(SuiteClock::start(), settings).await?;
            ctx.check_pod_status(&check.namespace).await?;

            if let Some(path) = &check.snapshot {
                let phases = ctx.pod_snapshot(&check.namespace).await?;
                TestContext::write_json(path, &phases)?;
                println!("Snapshot written to {path}");
            }

            println!("✓ All pods in {} are Running", check.namespace);
        }

        cli::Command::Deploy(deploy) => {
            let namespace = deploy
                .namespace
                .clone()
                .unwrap_or_else(|| k8s::unique_name(&deploy.name));

            let ctx = TestContext::new(SuiteClock::start(), settings).await?;
            ctx.create_service(
                &deploy.image,
                &deploy.name,
                &namespace,
                deploy.port,
                deploy.replicas,
            )
            .await?;

            ctx.log_banner(
                &format!("Deployed {} to {}", deploy.name, namespace),
                LogLevel::Info,
            );
            println!(
                "✓ Created namespace, deployment, and service for {} in {}",
                deploy.name, namespace
            );
        }

        cli::Command::Delete(delete) => {
            let ctx = TestContext::new(SuiteClock::start(), settings).await?;
            ctx.delete_and_confirm(&delete.name, &delete.resource_type)
                .await?;
            println!("✓ {} {} deleted", delete.resource_type, delete.name);
        }

        cli::Command::Compare(compare) => {
            let expected = read_state(&compare.expected)?;
            let observed = read_state(&compare.observed)?;

            TestContext::assert_same(&expected, &observed)?;
            println!("✓ States are structurally identical");
        }

        cli::Command::Config(config_args) => {
            manage_config(config_args, &settings)?;
        }
    }

    Ok(())
}

fn read_state(path: &str) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON: {path}"))
}

fn manage_config(args: cli::ConfigArgs, settings: &Settings) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = std::path::Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!("Settings file already exists: {output}. Use --force to overwrite.");
            }

            Settings::example().save(path)?;
            println!("✓ Settings file created: {output}");
        }

        cli::ConfigAction::Show { format } => {
            let rendered = if format == "json" {
                serde_json::to_string_pretty(settings)?
            } else {
                serde_yaml::to_string(settings)?
            };
            println!("{rendered}");
        }

        cli::ConfigAction::Env => {
            config::print_env_help();
        }
    }

    Ok(())
}
