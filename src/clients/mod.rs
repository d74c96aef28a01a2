// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Clients for the Sandbox, SandboxSet and SandboxClaim collections.

pub mod sandbox;
pub mod sandboxclaim;
pub mod sandboxset;

pub use sandbox::SandboxClient;
pub use sandboxclaim::SandboxClaimClient;
pub use sandboxset::SandboxSetClient;
