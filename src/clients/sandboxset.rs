// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;
use crate::resource::ResourceClient;
use crate::types::SandboxSet;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

/// Client for `sandboxsets.agents.kruise.io`
pub type SandboxSetClient = ResourceClient<SandboxSet>;

impl ResourceClient<SandboxSet> {
    /// Set the desired replica count, patching only `spec.replicas`
    #[instrument(skip(self))]
    pub async fn scale(
        &self,
        name: &str,
        replicas: i32,
        namespace: Option<&str>,
    ) -> Result<SandboxSet> {
        info!("Scaling SandboxSet '{}' to {} replicas", name, replicas);
        self.update(name, &json!({ "spec": { "replicas": replicas } }), namespace)
            .await
    }

    /// Desired replica count as stored in the cluster; 0 when unset
    pub async fn get_replicas(&self, name: &str, namespace: Option<&str>) -> Result<i32> {
        let document = self.documents().get(name, namespace).await?;
        match document.data.pointer("/spec/replicas") {
            None | Some(Value::Null) => Ok(0),
            Some(replicas) => Ok(i32::deserialize(replicas)?),
        }
    }
}
