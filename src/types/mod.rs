// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed models of the agent-sandbox custom resources.

pub mod condition;
pub mod sandbox;
pub mod sandboxclaim;
pub mod sandboxset;

pub use condition::{condition_met, document_has_condition, Condition, Conditioned};
pub use sandbox::{PodInfo, Sandbox, SandboxSpec, SandboxStatus, TemplateRef};
pub use sandboxclaim::{SandboxClaim, SandboxClaimSpec, SandboxClaimStatus};
pub use sandboxset::{SandboxSet, SandboxSetSpec, SandboxSetStatus};
