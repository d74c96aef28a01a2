// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentsError {
    #[error("{kind} '{name}' not found in namespace '{namespace}'")]
    NotFound {
        kind: String,
        name: String,
        namespace: String,
    },

    #[error("{0}")]
    Timeout(String),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to convert resource document: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AgentsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AgentsError::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AgentsError::Timeout(_))
    }
}

/// Check whether a transport error is an API 404
pub fn is_api_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

pub type Result<T> = std::result::Result<T, AgentsError>;
