// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Untyped CRUD, list, watch and wait operations on a custom resource collection.

use crate::constants::{MAX_WATCH_SECS, WATCH_REOPEN_DELAY_MS};
use crate::error::{is_api_not_found, AgentsError, Result};
use crate::resource::coordinate::ResourceCoordinate;
use crate::resource::params::{ConditionWait, Deletion, PatchStrategy, Selectors};
use crate::resource::watch::WatchStream;
use crate::types::condition_met;
use futures::{StreamExt, TryStreamExt};
use kube::api::{
    Api, ApiResource, DeleteParams, DynamicObject, ObjectList, Patch, PatchParams, PostParams,
    WatchEvent,
};
use kube::Client;
use kube_runtime::wait::Condition as _;
use serde::Serialize;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

/// Generic client for one custom resource collection.
///
/// Every call is a single pass-through request; documents are returned as
/// the API server sent them.
#[derive(Clone)]
pub struct CustomResourceClient {
    client: Client,
    coordinate: ResourceCoordinate,
    api_resource: ApiResource,
}

impl CustomResourceClient {
    pub fn new(client: Client, coordinate: ResourceCoordinate) -> Self {
        info!(
            "Initializing {} client with namespace: {}",
            coordinate.kind, coordinate.namespace
        );
        let api_resource = coordinate.api_resource();
        Self {
            client,
            coordinate,
            api_resource,
        }
    }

    pub fn coordinate(&self) -> &ResourceCoordinate {
        &self.coordinate
    }

    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.api_resource)
    }

    /// Create a resource from the given document, sent as-is
    #[instrument(skip(self, body), fields(kind = %self.coordinate.kind))]
    pub async fn create(
        &self,
        body: &DynamicObject,
        namespace: Option<&str>,
    ) -> Result<DynamicObject> {
        let ns = self.coordinate.resolve_namespace(namespace);
        debug!(
            "Creating {} '{}' in namespace {}",
            self.coordinate.kind,
            body.metadata.name.as_deref().unwrap_or_default(),
            ns
        );
        Ok(self.api(ns).create(&PostParams::default(), body).await?)
    }

    /// Get a resource by name, translating 404 into `NotFound`
    #[instrument(skip(self), fields(kind = %self.coordinate.kind))]
    pub async fn get(&self, name: &str, namespace: Option<&str>) -> Result<DynamicObject> {
        let ns = self.coordinate.resolve_namespace(namespace);
        match self.api(ns).get(name).await {
            Ok(obj) => Ok(obj),
            Err(e) if is_api_not_found(&e) => Err(AgentsError::NotFound {
                kind: self.coordinate.kind.clone(),
                name: name.to_string(),
                namespace: ns.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Update a resource with merge-patch semantics
    pub async fn update<P>(
        &self,
        name: &str,
        body: &P,
        namespace: Option<&str>,
    ) -> Result<DynamicObject>
    where
        P: Serialize + Debug,
    {
        self.patch(name, body, namespace, PatchStrategy::Merge).await
    }

    /// Merge-patch only the status subresource
    #[instrument(skip(self, body), fields(kind = %self.coordinate.kind))]
    pub async fn update_status<P>(
        &self,
        name: &str,
        body: &P,
        namespace: Option<&str>,
    ) -> Result<DynamicObject>
    where
        P: Serialize + Debug,
    {
        let ns = self.coordinate.resolve_namespace(namespace);
        debug!("Patching status of {} '{}' in namespace {}", self.coordinate.kind, name, ns);
        Ok(self
            .api(ns)
            .patch_status(name, &PatchParams::default(), &Patch::Merge(body))
            .await?)
    }

    #[instrument(skip(self, body), fields(kind = %self.coordinate.kind))]
    pub async fn patch<P>(
        &self,
        name: &str,
        body: &P,
        namespace: Option<&str>,
        strategy: PatchStrategy,
    ) -> Result<DynamicObject>
    where
        P: Serialize + Debug,
    {
        let ns = self.coordinate.resolve_namespace(namespace);
        debug!(
            "Patching {} '{}' in namespace {} ({})",
            self.coordinate.kind,
            name,
            ns,
            strategy.content_type()
        );
        Ok(self
            .api(ns)
            .patch(name, &strategy.params(), &strategy.patch(body))
            .await?)
    }

    #[instrument(skip(self), fields(kind = %self.coordinate.kind))]
    pub async fn delete(
        &self,
        name: &str,
        namespace: Option<&str>,
        grace_period_seconds: Option<u32>,
    ) -> Result<Deletion<DynamicObject>> {
        let ns = self.coordinate.resolve_namespace(namespace);
        let mut dp = DeleteParams::default();
        dp.grace_period_seconds = grace_period_seconds;

        info!("Deleting {} '{}' in namespace {}", self.coordinate.kind, name, ns);
        let outcome = self.api(ns).delete(name, &dp).await?;
        Ok(outcome.either(Deletion::InProgress, Deletion::Finished))
    }

    #[instrument(skip(self), fields(kind = %self.coordinate.kind))]
    pub async fn list(
        &self,
        namespace: Option<&str>,
        selectors: &Selectors,
    ) -> Result<ObjectList<DynamicObject>> {
        let ns = self.coordinate.resolve_namespace(namespace);
        Ok(self.api(ns).list(&selectors.list_params()).await?)
    }

    /// Open a watch on the collection.
    ///
    /// Server-side timeouts are capped just below the client read timeout.
    #[instrument(skip(self), fields(kind = %self.coordinate.kind))]
    pub async fn watch(
        &self,
        namespace: Option<&str>,
        selectors: &Selectors,
        timeout_seconds: Option<u32>,
    ) -> Result<WatchStream<DynamicObject>> {
        let ns = self.coordinate.resolve_namespace(namespace);
        let timeout_seconds = timeout_seconds.map(|secs| {
            if secs > MAX_WATCH_SECS {
                warn!(
                    "Watch timeout of {}s exceeds the {}s limit, capping",
                    secs, MAX_WATCH_SECS
                );
            }
            secs.min(MAX_WATCH_SECS)
        });

        debug!("Watching {} in namespace {}", self.coordinate.plural, ns);
        let events = self
            .api(ns)
            .watch(&selectors.watch_params(timeout_seconds), "0")
            .await?;

        Ok(WatchStream::new(events.map_err(AgentsError::from).boxed()))
    }

    #[instrument(skip(self), fields(kind = %self.coordinate.kind))]
    pub async fn delete_collection(
        &self,
        namespace: Option<&str>,
        selectors: &Selectors,
    ) -> Result<Deletion<ObjectList<DynamicObject>>> {
        let ns = self.coordinate.resolve_namespace(namespace);
        info!("Deleting {} in namespace {}", self.coordinate.plural, ns);
        let outcome = self
            .api(ns)
            .delete_collection(&DeleteParams::default(), &selectors.list_params())
            .await?;
        Ok(outcome.either(Deletion::InProgress, Deletion::Finished))
    }

    /// Wait until the named resource reports the wanted condition.
    ///
    /// The watch is re-opened until the deadline whenever the server closes
    /// it or reports an `Error` event.
    #[instrument(skip(self, wait), fields(kind = %self.coordinate.kind, condition = %wait.condition_type))]
    pub async fn wait_for_condition(
        &self,
        name: &str,
        wait: &ConditionWait,
        namespace: Option<&str>,
    ) -> Result<DynamicObject> {
        let ns = self.coordinate.resolve_namespace(namespace);
        let matcher = condition_met::<DynamicObject>(&wait.condition_type, &wait.status);
        let selectors = Selectors::name(name);
        let deadline = Instant::now() + wait.timeout;
        let timed_out = |seen: bool| {
            if seen {
                AgentsError::Timeout(format!(
                    "Timeout waiting for condition {}={} for resource {} in namespace {}",
                    wait.condition_type, wait.status, name, ns
                ))
            } else {
                AgentsError::Timeout(format!(
                    "Unable to find resource {} in namespace {}",
                    name, ns
                ))
            }
        };
        let mut seen = false;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(timed_out(seen));
            }
            let watch_secs = remaining.as_secs().clamp(1, u64::from(MAX_WATCH_SECS)) as u32;
            let mut events =
                timeout_at(deadline, self.watch(Some(ns), &selectors, Some(watch_secs)))
                    .await
                    .map_err(|_| timed_out(seen))??;

            loop {
                let next = timeout_at(deadline, events.next())
                    .await
                    .map_err(|_| timed_out(seen))?;

                match next {
                    Some(Ok(
                        WatchEvent::Added(obj) | WatchEvent::Modified(obj) | WatchEvent::Deleted(obj),
                    )) => {
                        seen = true;
                        if matcher.matches_object(Some(&obj)) {
                            info!(
                                "{} '{}' reached {}={}",
                                self.coordinate.kind, name, wait.condition_type, wait.status
                            );
                            return Ok(obj);
                        }
                        debug!("{} '{}' does not match yet", self.coordinate.kind, name);
                    }
                    Some(Ok(WatchEvent::Bookmark(_))) => {}
                    Some(Ok(WatchEvent::Error(err))) => {
                        warn!("Watch reported an error ({}): {}", err.code, err.message);
                        break;
                    }
                    Some(Err(e)) => return Err(e),
                    None => break,
                }

                if Instant::now() >= deadline {
                    return Err(timed_out(seen));
                }
            }

            debug!("Watch ended, re-opening");
            let retry_at = Instant::now() + Duration::from_millis(WATCH_REOPEN_DELAY_MS);
            sleep_until(retry_at.min(deadline)).await;
        }
    }
}
