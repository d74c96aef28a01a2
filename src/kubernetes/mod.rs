// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and CRD discovery.

pub mod client;
pub mod crd;

pub use client::{apply_settings, connect, connect_with_kubeconfig};
pub use crd::{crds_installed, wait_for_crds};
