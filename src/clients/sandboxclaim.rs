// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::resource::ResourceClient;
use crate::types::SandboxClaim;

/// Client for `sandboxclaims.agents.kruise.io`
pub type SandboxClaimClient = ResourceClient<SandboxClaim>;
