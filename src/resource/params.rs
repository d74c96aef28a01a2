// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-call options of the resource clients.

use crate::constants::{conditions::STATUS_TRUE, FIELD_MANAGER, WATCH_TIMEOUT_SECS};
use crate::error::Result;
use kube::api::{ListParams, Patch, PatchParams, WatchParams};
use kube::core::Status;
use serde::Serialize;
use std::time::Duration;

/// How a patch body is interpreted by the API server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatchStrategy {
    /// `application/merge-patch+json`
    #[default]
    Merge,
    /// `application/strategic-merge-patch+json`
    Strategic,
    /// Server-side apply with the crate's field manager
    Apply { force: bool },
}

impl PatchStrategy {
    pub fn content_type(&self) -> &'static str {
        match self {
            PatchStrategy::Merge => "application/merge-patch+json",
            PatchStrategy::Strategic => "application/strategic-merge-patch+json",
            PatchStrategy::Apply { .. } => "application/apply-patch+yaml",
        }
    }

    pub(crate) fn params(&self) -> PatchParams {
        match self {
            PatchStrategy::Apply { force: true } => PatchParams::apply(FIELD_MANAGER).force(),
            PatchStrategy::Apply { force: false } => PatchParams::apply(FIELD_MANAGER),
            _ => PatchParams::default(),
        }
    }

    pub(crate) fn patch<P: Serialize>(&self, body: P) -> Patch<P> {
        match self {
            PatchStrategy::Merge => Patch::Merge(body),
            PatchStrategy::Strategic => Patch::Strategic(body),
            PatchStrategy::Apply { .. } => Patch::Apply(body),
        }
    }
}

/// Label and field selectors applied to list, watch and collection deletes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    pub label_selector: Option<String>,
    pub field_selector: Option<String>,
}

impl Selectors {
    pub fn labels(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = Some(selector.into());
        self
    }

    pub fn fields(mut self, selector: impl Into<String>) -> Self {
        self.field_selector = Some(selector.into());
        self
    }

    /// Selects a single object by name
    pub fn name(name: &str) -> Self {
        Self::default().fields(format!("metadata.name={}", name))
    }

    pub(crate) fn list_params(&self) -> ListParams {
        let mut lp = ListParams::default();
        if let Some(labels) = &self.label_selector {
            lp = lp.labels(labels);
        }
        if let Some(fields) = &self.field_selector {
            lp = lp.fields(fields);
        }
        lp
    }

    pub(crate) fn watch_params(&self, timeout_seconds: Option<u32>) -> WatchParams {
        let mut wp = WatchParams::default();
        if let Some(labels) = &self.label_selector {
            wp = wp.labels(labels);
        }
        if let Some(fields) = &self.field_selector {
            wp = wp.fields(fields);
        }
        if let Some(timeout) = timeout_seconds {
            wp = wp.timeout(timeout);
        }
        wp
    }
}

/// What `wait_for_condition` waits for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionWait {
    pub condition_type: String,
    pub status: String,
    pub timeout: Duration,
}

impl ConditionWait {
    /// Wait for `condition_type=True` with the default 300s budget
    pub fn new(condition_type: impl Into<String>) -> Self {
        Self {
            condition_type: condition_type.into(),
            status: STATUS_TRUE.to_string(),
            timeout: Duration::from_secs(WATCH_TIMEOUT_SECS),
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Result of a delete call
#[derive(Debug, Clone)]
pub enum Deletion<T> {
    /// The object (or list) is still being finalized
    InProgress(T),
    /// The API server reported the deletion as done
    Finished(Status),
}

impl<T> Deletion<T> {
    pub fn is_finished(&self) -> bool {
        matches!(self, Deletion::Finished(_))
    }

    pub(crate) fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Deletion<U>> {
        Ok(match self {
            Deletion::InProgress(value) => Deletion::InProgress(f(value)?),
            Deletion::Finished(status) => Deletion::Finished(status),
        })
    }
}
