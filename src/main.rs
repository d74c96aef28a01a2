// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::TryStreamExt;
use kube::api::{DynamicObject, WatchEvent};
use kube::{Client, ResourceExt};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use agents_client::constants::conditions::{READY, STATUS_TRUE};
use agents_client::kubernetes::{connect, crds_installed, wait_for_crds};
use agents_client::types::{Sandbox, SandboxClaim, SandboxSet};
use agents_client::{
    ConditionWait, Config, CustomResourceClient, Deletion, ResourceCoordinate, SandboxSetClient,
    Selectors,
};

/// Manage agent sandboxes, sandbox sets and sandbox claims
#[derive(Parser, Debug)]
#[command(name = "agents-ctl", author, version, about)]
struct Cli {
    /// Namespace to operate in (defaults to AGENTS_NAMESPACE or "default")
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Output format for returned resources
    #[arg(short, long, value_enum, default_value = "yaml", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceKind {
    #[value(name = "sandbox", alias = "sandboxes")]
    Sandbox,
    #[value(name = "sandboxset", alias = "sandboxsets")]
    SandboxSet,
    #[value(name = "sandboxclaim", alias = "sandboxclaims")]
    SandboxClaim,
}

impl ResourceKind {
    fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "Sandbox" => Some(ResourceKind::Sandbox),
            "SandboxSet" => Some(ResourceKind::SandboxSet),
            "SandboxClaim" => Some(ResourceKind::SandboxClaim),
            _ => None,
        }
    }

    fn coordinate(self, namespace: &str) -> ResourceCoordinate {
        match self {
            ResourceKind::Sandbox => ResourceCoordinate::for_resource::<Sandbox>(namespace),
            ResourceKind::SandboxSet => ResourceCoordinate::for_resource::<SandboxSet>(namespace),
            ResourceKind::SandboxClaim => {
                ResourceCoordinate::for_resource::<SandboxClaim>(namespace)
            }
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List resources
    List {
        resource: ResourceKind,
        /// Label selector
        #[arg(short = 'l', long)]
        selector: Option<String>,
        #[arg(long)]
        field_selector: Option<String>,
    },
    /// Show a single resource
    Get { resource: ResourceKind, name: String },
    /// Create a resource from a YAML or JSON manifest
    Create {
        #[arg(short = 'f', long)]
        file: PathBuf,
    },
    /// Delete a resource
    Delete {
        resource: ResourceKind,
        name: String,
        #[arg(long)]
        grace_period: Option<u32>,
    },
    /// Set the replica count of a SandboxSet
    Scale { name: String, replicas: i32 },
    /// Print the desired replica count of a SandboxSet
    Replicas { name: String },
    /// Stream change events until the server closes the watch
    Watch {
        resource: ResourceKind,
        #[arg(short = 'l', long)]
        selector: Option<String>,
        /// Server-side watch timeout in seconds
        #[arg(long)]
        timeout: Option<u32>,
    },
    /// Block until a resource reports a condition
    Wait {
        resource: ResourceKind,
        name: String,
        #[arg(long, default_value = READY)]
        condition: String,
        #[arg(long, default_value = STATUS_TRUE)]
        status: String,
        /// Timeout in seconds (defaults to AGENTS_WATCH_TIMEOUT_SECS or 300)
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Check whether the agents.kruise.io CRDs are installed
    CheckCrds {
        /// Keep polling for up to this many seconds
        #[arg(long)]
        wait: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(namespace) = &cli.namespace {
        config = config.with_namespace(namespace.clone());
    }
    debug!("Configuration loaded: namespace={}", config.namespace);

    let client = connect(&config).await?;
    info!("Connected to Kubernetes cluster");

    run(cli, &config, client).await
}

async fn run(cli: Cli, config: &Config, client: Client) -> Result<()> {
    let documents = |resource: ResourceKind| {
        CustomResourceClient::new(client.clone(), resource.coordinate(&config.namespace))
    };

    match cli.command {
        Command::List {
            resource,
            selector,
            field_selector,
        } => {
            let selectors = Selectors {
                label_selector: selector,
                field_selector,
            };
            let list = documents(resource).list(None, &selectors).await?;
            print(&list.items, cli.output)?;
        }
        Command::Get { resource, name } => {
            let obj = documents(resource).get(&name, None).await?;
            print(&obj, cli.output)?;
        }
        Command::Create { file } => {
            let manifest = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let document: DynamicObject = serde_yaml::from_str(&manifest)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            let kind = document
                .types
                .as_ref()
                .map(|t| t.kind.as_str())
                .context("Manifest has no kind")?;
            let resource =
                ResourceKind::from_kind(kind).ok_or_else(|| anyhow!("Unsupported kind {}", kind))?;

            let created = documents(resource).create(&document, None).await?;
            print(&created, cli.output)?;
        }
        Command::Delete {
            resource,
            name,
            grace_period,
        } => match documents(resource).delete(&name, None, grace_period).await? {
            Deletion::InProgress(_) => println!("{} '{}' is being deleted", kind_of(resource), name),
            Deletion::Finished(_) => println!("{} '{}' deleted", kind_of(resource), name),
        },
        Command::Scale { name, replicas } => {
            let sets = SandboxSetClient::new(client.clone(), config.namespace.clone());
            let scaled = sets.scale(&name, replicas, None).await?;
            print(&scaled, cli.output)?;
        }
        Command::Replicas { name } => {
            let sets = SandboxSetClient::new(client.clone(), config.namespace.clone());
            println!("{}", sets.get_replicas(&name, None).await?);
        }
        Command::Watch {
            resource,
            selector,
            timeout,
        } => {
            let selectors = Selectors {
                label_selector: selector,
                field_selector: None,
            };
            let mut events = documents(resource).watch(None, &selectors, timeout).await?;
            while let Some(event) = events.try_next().await? {
                match event {
                    WatchEvent::Added(obj) => println!("ADDED\t{}", obj.name_any()),
                    WatchEvent::Modified(obj) => println!("MODIFIED\t{}", obj.name_any()),
                    WatchEvent::Deleted(obj) => println!("DELETED\t{}", obj.name_any()),
                    WatchEvent::Bookmark(_) => {}
                    WatchEvent::Error(err) => {
                        return Err(anyhow!("Watch failed: {} ({})", err.message, err.code))
                    }
                }
            }
        }
        Command::Wait {
            resource,
            name,
            condition,
            status,
            timeout,
        } => {
            let wait = ConditionWait::new(condition)
                .status(status)
                .timeout(timeout.map_or(config.watch_timeout, Duration::from_secs));
            let obj = documents(resource)
                .wait_for_condition(&name, &wait, None)
                .await?;
            print(&obj, cli.output)?;
        }
        Command::CheckCrds { wait } => {
            let installed = match wait {
                Some(secs) => {
                    wait_for_crds(&client, Duration::from_secs(secs)).await?;
                    true
                }
                None => crds_installed(&client).await?,
            };
            if !installed {
                return Err(anyhow!("agents.kruise.io CRDs are not installed"));
            }
            println!("installed");
        }
    }

    Ok(())
}

fn kind_of(resource: ResourceKind) -> String {
    resource.coordinate("").kind
}

fn print<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
