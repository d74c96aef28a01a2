// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group shared by all agent-sandbox resources
pub const API_GROUP: &str = "agents.kruise.io";
/// API version shared by all agent-sandbox resources
pub const API_VERSION: &str = "v1alpha1";

/// Plural names used in the REST paths, as declared on the models
pub mod plurals {
    pub const SANDBOX: &str = "sandboxes";
    pub const SANDBOXSET: &str = "sandboxsets";
    pub const SANDBOXCLAIM: &str = "sandboxclaims";
}

/// Resource kinds
pub mod kinds {
    pub const SANDBOX: &str = "Sandbox";
    pub const SANDBOXSET: &str = "SandboxSet";
    pub const SANDBOXCLAIM: &str = "SandboxClaim";
}

/// Well-known condition types reported in `status.conditions`
pub mod conditions {
    pub const READY: &str = "Ready";
    pub const STATUS_TRUE: &str = "True";
}

/// Field manager used for server-side apply patches
pub const FIELD_MANAGER: &str = "agents-client";

pub const DEFAULT_NAMESPACE: &str = "default";
/// Connect timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Per-request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const RETRY_COUNT: u32 = 3;
/// Default budget for `wait_for_condition`
pub const WATCH_TIMEOUT_SECS: u64 = 300;

/// Server-side watch timeouts must stay below the client read timeout
pub const MAX_WATCH_SECS: u32 = 290;
/// Pause before re-opening a watch the server closed
pub const WATCH_REOPEN_DELAY_MS: u64 = 500;

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRDs
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
