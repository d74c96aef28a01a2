// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status conditions shared by all agent-sandbox resources.

use crate::constants::conditions::{READY, STATUS_TRUE};
use kube::api::DynamicObject;
use kube_runtime::wait::Condition as WaitCondition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

impl Condition {
    pub fn new(condition_type: impl Into<String>, status: impl Into<String>) -> Self {
        Condition {
            condition_type: condition_type.into(),
            status: status.into(),
            reason: None,
            message: None,
            last_transition_time: None,
        }
    }
}

/// Anything carrying `status.conditions`
pub trait Conditioned {
    /// Whether a condition with the given type and status is present
    fn has_condition(&self, condition_type: &str, status: &str) -> bool;

    fn is_ready(&self) -> bool {
        self.has_condition(READY, STATUS_TRUE)
    }
}

pub(crate) fn conditions_match(
    conditions: Option<&Vec<Condition>>,
    condition_type: &str,
    status: &str,
) -> bool {
    conditions.is_some_and(|conditions| {
        conditions
            .iter()
            .any(|c| c.condition_type == condition_type && c.status == status)
    })
}

/// Inspect `status.conditions` of an untyped resource document
pub fn document_has_condition(document: &Value, condition_type: &str, status: &str) -> bool {
    document
        .pointer("/status/conditions")
        .and_then(Value::as_array)
        .is_some_and(|conditions| {
            conditions.iter().any(|c| {
                c.get("type").and_then(Value::as_str) == Some(condition_type)
                    && c.get("status").and_then(Value::as_str) == Some(status)
            })
        })
}

impl Conditioned for DynamicObject {
    fn has_condition(&self, condition_type: &str, status: &str) -> bool {
        document_has_condition(&self.data, condition_type, status)
    }
}

/// Build a `kube_runtime` wait condition, usable with `await_condition`
pub fn condition_met<K: Conditioned>(
    condition_type: impl Into<String>,
    status: impl Into<String>,
) -> impl WaitCondition<K> {
    let condition_type = condition_type.into();
    let status = status.into();
    move |obj: Option<&K>| obj.is_some_and(|o| o.has_condition(&condition_type, &status))
}
