// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{
    DEFAULT_NAMESPACE, DEFAULT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, RETRY_COUNT,
    WATCH_TIMEOUT_SECS,
};
use crate::error::{AgentsError, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Client configuration, layered on top of the resolved Kubernetes config
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Namespace used when a call does not override it
    pub namespace: String,
    /// Applied as the connect timeout of the HTTP client
    pub default_timeout: Duration,
    /// Applied as the write timeout of the HTTP client
    pub request_timeout: Duration,
    /// Carried for the transport; this crate never retries on its own
    pub retry_count: u32,
    /// Default budget for waiting on a condition
    pub watch_timeout: Duration,
    /// Overrides the API server URL of the resolved cluster config
    pub api_server: Option<Url>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            retry_count: RETRY_COUNT,
            watch_timeout: Duration::from_secs(WATCH_TIMEOUT_SECS),
            api_server: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(namespace) = lookup("AGENTS_NAMESPACE").filter(|ns| !ns.is_empty()) {
            config.namespace = namespace;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "AGENTS_DEFAULT_TIMEOUT_SECS")? {
            config.default_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "AGENTS_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(count) = parse_var::<u32>(&lookup, "AGENTS_RETRY_COUNT")? {
            config.retry_count = count;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "AGENTS_WATCH_TIMEOUT_SECS")? {
            config.watch_timeout = Duration::from_secs(secs);
        }
        config.api_server = parse_var::<Url>(&lookup, "AGENTS_API_SERVER")?;

        Ok(config)
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AgentsError::ConfigError(format!("{}={:?}: {}", key, raw, e))),
    }
}
