// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed facade over [`CustomResourceClient`].

use crate::config::Config;
use crate::error::Result;
use crate::kubernetes::connect;
use crate::resource::client::CustomResourceClient;
use crate::resource::coordinate::ResourceCoordinate;
use crate::resource::params::{ConditionWait, Deletion, PatchStrategy, Selectors};
use crate::resource::watch::WatchStream;
use kube::api::{DynamicObject, ObjectList};
use kube::core::TypeMeta;
use kube::{Client, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Client for one statically typed custom resource.
///
/// The coordinate is fixed by `K`'s `Resource` impl; only the namespace is
/// chosen at construction.
pub struct ResourceClient<K> {
    inner: CustomResourceClient,
    _resource: PhantomData<fn() -> K>,
}

impl<K> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _resource: PhantomData,
        }
    }
}

impl<K> ResourceClient<K>
where
    K: Resource<DynamicType = ()> + Serialize + DeserializeOwned + Clone + Debug + Send + 'static,
{
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        let coordinate = ResourceCoordinate::for_resource::<K>(namespace);
        Self {
            inner: CustomResourceClient::new(client, coordinate),
            _resource: PhantomData,
        }
    }

    /// Resolve the cluster configuration and build a client for `config.namespace`
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = connect(config).await?;
        Ok(Self::new(client, config.namespace.clone()))
    }

    /// Untyped access to the same collection
    pub fn documents(&self) -> &CustomResourceClient {
        &self.inner
    }

    pub fn namespace(&self) -> &str {
        &self.inner.coordinate().namespace
    }

    /// Create a resource; `apiVersion` and `kind` are always set from `K`
    pub async fn create(&self, resource: &K, namespace: Option<&str>) -> Result<K> {
        let document = to_document(resource)?;
        from_document(&self.inner.create(&document, namespace).await?)
    }

    pub async fn get(&self, name: &str, namespace: Option<&str>) -> Result<K> {
        from_document(&self.inner.get(name, namespace).await?)
    }

    /// Merge-patch the resource with `body`, which may be a full `K` or a partial document
    pub async fn update<P>(&self, name: &str, body: &P, namespace: Option<&str>) -> Result<K>
    where
        P: Serialize + Debug,
    {
        from_document(&self.inner.update(name, body, namespace).await?)
    }

    pub async fn update_status<P>(&self, name: &str, body: &P, namespace: Option<&str>) -> Result<K>
    where
        P: Serialize + Debug,
    {
        from_document(&self.inner.update_status(name, body, namespace).await?)
    }

    pub async fn patch<P>(
        &self,
        name: &str,
        body: &P,
        namespace: Option<&str>,
        strategy: PatchStrategy,
    ) -> Result<K>
    where
        P: Serialize + Debug,
    {
        from_document(&self.inner.patch(name, body, namespace, strategy).await?)
    }

    pub async fn delete(
        &self,
        name: &str,
        namespace: Option<&str>,
        grace_period_seconds: Option<u32>,
    ) -> Result<Deletion<K>> {
        self.inner
            .delete(name, namespace, grace_period_seconds)
            .await?
            .try_map(|obj| from_document(&obj))
    }

    pub async fn list(&self, namespace: Option<&str>, selectors: &Selectors) -> Result<ObjectList<K>> {
        from_document(&self.inner.list(namespace, selectors).await?)
    }

    pub async fn watch(
        &self,
        namespace: Option<&str>,
        selectors: &Selectors,
        timeout_seconds: Option<u32>,
    ) -> Result<WatchStream<K>> {
        Ok(self
            .inner
            .watch(namespace, selectors, timeout_seconds)
            .await?
            .into_typed())
    }

    pub async fn delete_collection(
        &self,
        namespace: Option<&str>,
        selectors: &Selectors,
    ) -> Result<Deletion<ObjectList<K>>> {
        self.inner
            .delete_collection(namespace, selectors)
            .await?
            .try_map(|list| from_document(&list))
    }

    pub async fn wait_for_condition(
        &self,
        name: &str,
        wait: &ConditionWait,
        namespace: Option<&str>,
    ) -> Result<K> {
        from_document(&self.inner.wait_for_condition(name, wait, namespace).await?)
    }
}

fn to_document<K>(resource: &K) -> Result<DynamicObject>
where
    K: Resource<DynamicType = ()> + Serialize,
{
    let mut document: DynamicObject = serde_json::from_value(serde_json::to_value(resource)?)?;
    document.types = Some(TypeMeta {
        api_version: K::api_version(&()).into_owned(),
        kind: K::kind(&()).into_owned(),
    });
    Ok(document)
}

fn from_document<T: Serialize, K: DeserializeOwned>(document: &T) -> Result<K> {
    Ok(serde_json::from_value(serde_json::to_value(document)?)?)
}
