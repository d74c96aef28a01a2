// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::condition::{conditions_match, Condition, Conditioned};
use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "agents.kruise.io", version = "v1alpha1", kind = "Sandbox", plural = "sandboxes")]
#[kube(namespaced)]
#[kube(status = "SandboxStatus")]
#[serde(rename_all = "camelCase")]
pub struct SandboxSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ref: Option<TemplateRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutdown_time: Option<String>,
}

/// Reference to a named sandbox template
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
pub struct TemplateRef {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SandboxStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_info: Option<PodInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The pod backing a sandbox
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
    #[serde(rename = "podIP", skip_serializing_if = "Option::is_none")]
    pub pod_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
}

impl Conditioned for Sandbox {
    fn has_condition(&self, condition_type: &str, status: &str) -> bool {
        conditions_match(
            self.status.as_ref().and_then(|s| s.conditions.as_ref()),
            condition_type,
            status,
        )
    }
}

impl Sandbox {
    /// IP of the backing pod, once scheduled
    pub fn pod_ip(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|s| s.pod_info.as_ref())
            .and_then(|p| p.pod_ip.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;
    use serde_json::json;

    fn make_sandbox(status: Option<SandboxStatus>) -> Sandbox {
        Sandbox {
            metadata: ObjectMeta {
                name: Some("sb-1".to_string()),
                namespace: Some("agents".to_string()),
                ..Default::default()
            },
            spec: SandboxSpec {
                template_ref: Some(TemplateRef {
                    name: "python".to_string(),
                }),
                ..Default::default()
            },
            status,
        }
    }

    #[test]
    fn test_serialization_sets_api_version_and_kind() {
        let value = serde_json::to_value(make_sandbox(None)).unwrap();

        assert_eq!(value["apiVersion"], "agents.kruise.io/v1alpha1");
        assert_eq!(value["kind"], "Sandbox");
        assert_eq!(value["spec"], json!({ "templateRef": { "name": "python" } }));
    }

    #[test]
    fn test_is_ready_with_ready_condition() {
        let sandbox = make_sandbox(Some(SandboxStatus {
            phase: Some("Running".to_string()),
            conditions: Some(vec![Condition::new("Ready", "True")]),
            ..Default::default()
        }));

        assert!(sandbox.is_ready());
    }

    #[test]
    fn test_is_ready_without_status() {
        assert!(!make_sandbox(None).is_ready());
    }

    #[test]
    fn test_pod_ip_from_status() {
        let value = json!({
            "apiVersion": "agents.kruise.io/v1alpha1",
            "kind": "Sandbox",
            "metadata": { "name": "sb-1" },
            "spec": {},
            "status": { "podInfo": { "podIP": "10.0.0.7", "nodeName": "node-a" } }
        });
        let sandbox: Sandbox = serde_json::from_value(value).unwrap();

        assert_eq!(sandbox.pod_ip(), Some("10.0.0.7"));
        assert_eq!(make_sandbox(None).pod_ip(), None);
    }
}
