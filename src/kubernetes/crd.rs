// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::constants::{kinds, API_GROUP, API_VERSION};
use crate::error::{AgentsError, Result};
use kube::{discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

/// Kinds that must be served for the clients to work
pub const REQUIRED_KINDS: [&str; 3] = [kinds::SANDBOX, kinds::SANDBOXSET, kinds::SANDBOXCLAIM];

/// Wait for the agent-sandbox CRDs to become available in the cluster.
/// This uses exponential backoff starting at POLL_INTERVAL_SECS seconds.
pub async fn wait_for_crds(client: &Client, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    let mut interval = POLL_INTERVAL_SECS;

    loop {
        match missing_kinds(client).await {
            Ok(missing) if missing.is_empty() => {
                info!("Agent CRDs ({}/{}) are available", API_GROUP, API_VERSION);
                return Ok(());
            }
            Ok(missing) => {
                info!(
                    "Agent CRDs not yet available (missing: {}), waiting {} seconds...",
                    missing.join(", "),
                    interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for agent CRDs: {}, retrying in {} seconds...",
                    e, interval
                );
            }
        }

        let wake_at = Instant::now() + Duration::from_secs(interval);
        if wake_at >= deadline {
            return Err(AgentsError::Timeout(format!(
                "Timeout waiting for {} CRDs to become available",
                API_GROUP
            )));
        }
        sleep(Duration::from_secs(interval)).await;

        // Exponential backoff with max cap
        interval = (interval * 2).min(POLL_MAX_INTERVAL_SECS);
    }
}

/// Check whether all agent-sandbox kinds are served by the API server.
pub async fn crds_installed(client: &Client) -> Result<bool> {
    Ok(missing_kinds(client).await?.is_empty())
}

/// Kinds of [`REQUIRED_KINDS`] not found through discovery
pub async fn missing_kinds(client: &Client) -> Result<Vec<&'static str>> {
    let discovery = Discovery::new(client.clone())
        .filter(&[API_GROUP])
        .run()
        .await?;

    let mut served = Vec::new();
    for group in discovery.groups() {
        if group.name() == API_GROUP {
            for (ar, _) in group.versioned_resources(API_VERSION) {
                served.push(ar.kind);
            }
        }
    }

    Ok(REQUIRED_KINDS
        .into_iter()
        .filter(|kind| !served.iter().any(|s| s == kind))
        .collect())
}
