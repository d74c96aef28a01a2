// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::api::ApiResource;
use kube::Resource;

/// Identifies a namespaced custom resource collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCoordinate {
    pub group: String,
    pub version: String,
    pub plural: String,
    pub kind: String,
    /// Default namespace, overridable per call
    pub namespace: String,
}

impl ResourceCoordinate {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        plural: impl Into<String>,
        kind: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            plural: plural.into(),
            kind: kind.into(),
            namespace: namespace.into(),
        }
    }

    /// Coordinate of a statically typed resource
    pub fn for_resource<K: Resource<DynamicType = ()>>(namespace: impl Into<String>) -> Self {
        Self::new(
            K::group(&()),
            K::version(&()),
            K::plural(&()),
            K::kind(&()),
            namespace,
        )
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        }
    }

    /// A per-call namespace wins over the default one
    pub fn resolve_namespace<'a>(&'a self, namespace: Option<&'a str>) -> &'a str {
        namespace.unwrap_or(&self.namespace)
    }
}
