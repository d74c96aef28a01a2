// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod clients;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod resource;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use clients::{SandboxClaimClient, SandboxClient, SandboxSetClient};
pub use config::Config;
pub use error::{AgentsError, Result};
pub use resource::{
    ConditionWait, CustomResourceClient, Deletion, PatchStrategy, ResourceClient,
    ResourceCoordinate, Selectors, WatchStream,
};
