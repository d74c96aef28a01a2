// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster configuration resolution and client creation

use crate::config::Config;
use crate::error::{AgentsError, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use tracing::{debug, info, instrument};

/// Create a Kubernetes client: in-cluster service account first, then the local kubeconfig
#[instrument(skip(config))]
pub async fn connect(config: &Config) -> Result<Client> {
    let kube_config = resolve_kube_config().await?;
    create_client(kube_config, config)
}

/// Create a Kubernetes client from a kubeconfig string
pub async fn connect_with_kubeconfig(kubeconfig: &str, config: &Config) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| AgentsError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    let kube_config =
        KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| AgentsError::KubeconfigError(format!("Failed to create config: {}", e)))?;

    create_client(kube_config, config)
}

async fn resolve_kube_config() -> Result<KConfig> {
    match KConfig::incluster() {
        Ok(c) => {
            info!("Loaded in-cluster Kubernetes configuration");
            Ok(c)
        }
        Err(e) => {
            debug!("In-cluster configuration unavailable: {}", e);
            let c = KConfig::from_kubeconfig(&KubeConfigOptions::default())
                .await
                .map_err(|e| {
                    AgentsError::KubeconfigError(format!("Failed to load kubeconfig: {}", e))
                })?;
            info!("Loaded local Kubernetes configuration");
            Ok(c)
        }
    }
}

fn create_client(kube_config: KConfig, config: &Config) -> Result<Client> {
    let kube_config = apply_settings(kube_config, config)?;
    debug!("Connecting to {}", kube_config.cluster_url);

    Client::try_from(kube_config)
        .map_err(|e| AgentsError::KubeconfigError(format!("Failed to create client: {}", e)))
}

/// Layer the client settings onto a resolved cluster config.
///
/// The read timeout is left alone so long-running watches keep working.
pub fn apply_settings(mut kube_config: KConfig, config: &Config) -> Result<KConfig> {
    kube_config.connect_timeout = Some(config.default_timeout);
    kube_config.write_timeout = Some(config.request_timeout);

    if let Some(api_server) = &config.api_server {
        debug!(
            "Overriding cluster URL from {} to {}",
            kube_config.cluster_url, api_server
        );
        kube_config.cluster_url = api_server
            .as_str()
            .parse()
            .map_err(|e| AgentsError::KubeconfigError(format!("Invalid URL: {}", e)))?;
    }

    Ok(kube_config)
}
