// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::condition::{conditions_match, Condition, Conditioned};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "agents.kruise.io", version = "v1alpha1", kind = "SandboxClaim", plural = "sandboxclaims")]
#[kube(namespaced)]
#[kube(status = "SandboxClaimStatus")]
#[serde(rename_all = "camelCase")]
pub struct SandboxClaimSpec {
    /// Template (SandboxSet) the sandboxes are claimed from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown_time: Option<String>,
    /// Labels applied to claimed sandboxes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SandboxClaimStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_replicas: Option<i32>,
    /// Names of the sandboxes bound to this claim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandboxes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

impl Conditioned for SandboxClaim {
    fn has_condition(&self, condition_type: &str, status: &str) -> bool {
        conditions_match(
            self.status.as_ref().and_then(|s| s.conditions.as_ref()),
            condition_type,
            status,
        )
    }
}

impl SandboxClaim {
    /// Sandboxes currently bound to the claim
    pub fn claimed_sandboxes(&self) -> &[String] {
        self.status
            .as_ref()
            .and_then(|s| s.sandboxes.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialization_uses_plain_strings_for_type_meta() {
        let claim = SandboxClaim::new(
            "claim-1",
            SandboxClaimSpec {
                template_name: Some("pool".to_string()),
                replicas: Some(1),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&claim).unwrap();
        assert_eq!(value["apiVersion"], json!("agents.kruise.io/v1alpha1"));
        assert_eq!(value["kind"], json!("SandboxClaim"));
        assert_eq!(value["spec"], json!({ "templateName": "pool", "replicas": 1 }));
    }

    #[test]
    fn test_claimed_sandboxes() {
        let claim: SandboxClaim = serde_json::from_value(json!({
            "apiVersion": "agents.kruise.io/v1alpha1",
            "kind": "SandboxClaim",
            "metadata": { "name": "claim-1" },
            "spec": { "templateName": "pool" },
            "status": {
                "phase": "Claimed",
                "sandboxes": ["pool-abc"],
                "conditions": [{ "type": "Ready", "status": "True" }]
            }
        }))
        .unwrap();

        assert_eq!(claim.claimed_sandboxes(), ["pool-abc".to_string()]);
        assert!(claim.is_ready());
    }

    #[test]
    fn test_claimed_sandboxes_empty_without_status() {
        let claim = SandboxClaim::new("claim-1", SandboxClaimSpec::default());
        assert!(claim.claimed_sandboxes().is_empty());
    }
}
