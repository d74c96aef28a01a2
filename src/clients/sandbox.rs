// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::resource::ResourceClient;
use crate::types::Sandbox;

/// Client for `sandboxes.agents.kruise.io`
pub type SandboxClient = ResourceClient<Sandbox>;
