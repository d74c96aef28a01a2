// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;
use tower_test::mock;

type ResponseFuture =
    Pin<Box<dyn Future<Output = Result<Response<Body>, tower::BoxError>> + Send>>;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for requests with the given method, matching the path or a path prefix
    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        // Try exact match first
        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Longest prefix wins for paths like .../sandboxes/foo
        responses
            .iter()
            .filter(|((m, p), _)| m == method && path.starts_with(p.as_str()))
            .max_by_key(|((_, p), _)| p.len())
            .map(|(_, resp)| resp.clone())
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = ResponseFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(json_response(status, body)),
                // Default 404 for unmatched requests
                None => Ok(json_response(404, not_found_json("resource", &path))),
            }
        })
    }
}

/// An in-memory API server for the agents.kruise.io collections.
///
/// Supports create, get, list, merge-patch (including `/status`) and delete
/// on `/apis/{group}/{version}/namespaces/{ns}/{plural}[/{name}[/status]]`.
#[derive(Clone, Default)]
pub struct FakeApiServer {
    objects: Arc<Mutex<BTreeMap<String, Value>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Stored object at `{collection}/{name}`
    pub fn object(&self, path: &str) -> Option<Value> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    /// `(method, path)` of every request served so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    fn handle(&self, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 6 || segments[0] != "apis" || segments[3] != "namespaces" {
            return (404, not_found_value("path", path));
        }

        let namespace = segments[4];
        let collection = segments[..6].join("/");
        let collection = format!("/{}", collection);
        let mut objects = self.objects.lock().unwrap();

        match (method, &segments[6..]) {
            ("POST", []) => {
                let mut obj = body.unwrap_or_else(|| json!({}));
                let Some(name) = obj
                    .pointer("/metadata/name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                else {
                    return (422, invalid_value("metadata.name is required"));
                };
                let key = format!("{}/{}", collection, name);
                if objects.contains_key(&key) {
                    return (409, conflict_value(&name));
                }
                obj["metadata"]["namespace"] = json!(namespace);
                obj["metadata"]["resourceVersion"] = json!("1");
                obj["metadata"]["uid"] = json!(format!("uid-{}", name));
                objects.insert(key, obj.clone());
                (201, obj)
            }
            ("GET", []) => {
                let items: Vec<Value> = objects
                    .iter()
                    .filter(|(key, _)| {
                        key.rsplit_once('/').map(|(c, _)| c) == Some(collection.as_str())
                    })
                    .map(|(_, obj)| obj.clone())
                    .collect();
                (
                    200,
                    json!({
                        "apiVersion": format!("{}/{}", segments[1], segments[2]),
                        "kind": "List",
                        "metadata": { "resourceVersion": "1" },
                        "items": items
                    }),
                )
            }
            ("GET", [name]) => match objects.get(&format!("{}/{}", collection, name)) {
                Some(obj) => (200, obj.clone()),
                None => (404, not_found_value(segments[5], name)),
            },
            ("PATCH", [name]) | ("PATCH", [name, "status"]) => {
                match objects.get_mut(&format!("{}/{}", collection, name)) {
                    Some(obj) => {
                        merge_patch(obj, &body.unwrap_or(Value::Null));
                        bump_resource_version(obj);
                        (200, obj.clone())
                    }
                    None => (404, not_found_value(segments[5], name)),
                }
            }
            ("DELETE", [name]) => match objects.remove(&format!("{}/{}", collection, name)) {
                Some(obj) => (200, obj),
                None => (404, not_found_value(segments[5], name)),
            },
            _ => (405, status_value(405, "MethodNotAllowed", "method not allowed")),
        }
    }
}

impl Service<Request<Body>> for FakeApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = ResponseFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let server = self.clone();
        Box::pin(async move {
            let method = req.method().to_string();
            let path = req.uri().path().to_string();
            server
                .requests
                .lock()
                .unwrap()
                .push((method.clone(), path.clone()));

            let bytes = req.into_body().collect().await?.to_bytes();
            let body = if bytes.is_empty() {
                None
            } else {
                Some(serde_json::from_slice(&bytes)?)
            };

            let (status, value) = server.handle(&method, &path, body);
            Ok(json_response(status, value.to_string()))
        })
    }
}

/// JSON merge patch (RFC 7386)
fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        for (key, value) in patch {
            if value.is_null() {
                map.remove(key);
            } else {
                merge_patch(map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

fn bump_resource_version(obj: &mut Value) {
    let version = obj
        .pointer("/metadata/resourceVersion")
        .and_then(Value::as_str)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    obj["metadata"]["resourceVersion"] = json!((version + 1).to_string());
}

fn json_response(status: u16, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.into_bytes()))
        .unwrap()
}

/// A `tower-test` backed client plus the handle to answer its requests
pub fn mock_pair() -> (Client, mock::Handle<Request<Body>, Response<Body>>) {
    let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
    (Client::new(service, "default"), handle)
}

/// Read a captured request body as JSON
pub async fn body_json(req: Request<Body>) -> Value {
    let bytes = req.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A successful JSON response for a `tower-test` handle
pub fn ok_json(body: &Value) -> Response<Body> {
    json_response(200, body.to_string())
}

/// A watch response carrying the given events as JSON lines
pub fn watch_response(events: &[Value]) -> Response<Body> {
    let lines: String = events.iter().map(|e| format!("{}\n", e)).collect();
    Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(Body::from(lines.into_bytes()))
        .unwrap()
}

/// A single watch event line
pub fn watch_event(event_type: &str, object: Value) -> Value {
    json!({ "type": event_type, "object": object })
}

/// A watch ERROR event as the API server sends it
pub fn watch_error(code: u16, message: &str) -> Value {
    json!({
        "type": "ERROR",
        "object": {
            "kind": "Status",
            "apiVersion": "v1",
            "status": "Failure",
            "message": message,
            "reason": "Expired",
            "code": code
        }
    })
}

/// A Sandbox document, optionally carrying a `Ready` condition
pub fn sandbox_json(name: &str, namespace: &str, ready: Option<&str>) -> Value {
    let mut obj = json!({
        "apiVersion": "agents.kruise.io/v1alpha1",
        "kind": "Sandbox",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "spec": { "templateRef": { "name": "python" } }
    });
    if let Some(status) = ready {
        obj["status"] = json!({
            "phase": "Running",
            "conditions": [{ "type": "Ready", "status": status }]
        });
    }
    obj
}

/// A SandboxSet document
pub fn sandboxset_json(name: &str, namespace: &str, replicas: Option<i32>) -> Value {
    let mut obj = json!({
        "apiVersion": "agents.kruise.io/v1alpha1",
        "kind": "SandboxSet",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "spec": { "templateRef": { "name": "python" } }
    });
    if let Some(replicas) = replicas {
        obj["spec"]["replicas"] = json!(replicas);
    }
    obj
}

/// A final `Status` as returned for completed deletions
pub fn success_status_json() -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Success",
        "message": "",
        "reason": "",
        "code": 200
    })
}

/// A failure `Status` body as the API server returns it
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    status_value(code, reason, message).to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    not_found_value(resource, name).to_string()
}

fn status_value(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
}

fn not_found_value(resource: &str, name: &str) -> Value {
    status_value(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

fn conflict_value(name: &str) -> Value {
    status_value(409, "AlreadyExists", &format!("\"{}\" already exists", name))
}

fn invalid_value(message: &str) -> Value {
    status_value(422, "Invalid", message)
}
