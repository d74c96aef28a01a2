// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic custom resource clients.

pub mod client;
pub mod coordinate;
pub mod params;
pub mod typed;
pub mod watch;

pub use client::CustomResourceClient;
pub use coordinate::ResourceCoordinate;
pub use params::{ConditionWait, Deletion, PatchStrategy, Selectors};
pub use typed::ResourceClient;
pub use watch::WatchStream;
