//! In-memory `FilesApi` used by the provider tests

use std::sync::Mutex;

use async_trait::async_trait;
use filescom_client::api::route_segments;
use filescom_client::{Error, FilesApi, Page, Params, Result};
use serde_json::{Value as Json, json};

#[derive(Default)]
struct Store {
    /// Objects per collection in insertion order, keyed by id or path
    collections: Vec<(String, Vec<(String, Json)>)>,
    next_id: i64,
    bodies: Vec<(String, Json)>,
    deleted: Vec<(String, Params)>,
    failure: Option<(u16, String, String)>,
}

impl Store {
    fn collection(&mut self, name: &str) -> &mut Vec<(String, Json)> {
        let idx = match self.collections.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.collections.push((name.to_string(), Vec::new()));
                self.collections.len() - 1
            }
        };
        &mut self.collections[idx].1
    }

    fn failure(&self) -> Result<()> {
        match &self.failure {
            Some((status, kind, message)) => Err(Error::Api {
                status: *status,
                kind: kind.clone(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub struct MockApi {
    store: Mutex<Store>,
    page_size: usize,
}

/// Collection a route template addresses. Folder creation, file metadata and
/// file deletion all address the same path-keyed objects.
fn collection_of(route: &str) -> &str {
    let base = route.strip_suffix("/{id}").unwrap_or(route);
    match base {
        "folders" | "file_actions/metadata" => "files",
        other => other,
    }
}

fn resolved(route: &str, id: Option<&str>) -> String {
    route_segments(route, id).join("/")
}

fn not_found() -> Error {
    Error::Api {
        status: 404,
        kind: "not-found".to_string(),
        message: "Not Found".to_string(),
    }
}

fn object_key(object: &Json) -> String {
    match (object.get("id"), object.get("path")) {
        (Some(Json::Number(n)), _) => n.to_string(),
        (Some(Json::String(s)), _) => s.clone(),
        (_, Some(Json::String(p))) => p.clone(),
        _ => String::new(),
    }
}

fn merge(target: &mut Json, patch: &Json) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::with_page_size(100)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            store: Mutex::new(Store {
                next_id: 1,
                ..Store::default()
            }),
            page_size,
        }
    }

    /// Seed an object into a collection (e.g. "users")
    pub fn insert(&self, collection: &str, object: Json) {
        let key = object_key(&object);
        let mut store = self.store.lock().unwrap();
        store.collection(collection).push((key, object));
    }

    /// Seed the object served by a singleton route such as "site"
    pub fn set_singleton(&self, route: &str, object: Json) {
        let mut store = self.store.lock().unwrap();
        store.collection(route).push((String::new(), object));
    }

    /// Fail every subsequent call with this API error
    pub fn fail_with(&self, status: u16, kind: &str, message: &str) {
        let mut store = self.store.lock().unwrap();
        store.failure = Some((status, kind.to_string(), message.to_string()));
    }

    /// Last request body sent to a resolved route (e.g. "users/5")
    pub fn last_body(&self, path: &str) -> Option<Json> {
        let store = self.store.lock().unwrap();
        store
            .bodies
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
    }

    /// Resolved delete routes with their query parameters
    pub fn deleted(&self) -> Vec<(String, Params)> {
        self.store.lock().unwrap().deleted.clone()
    }
}

#[async_trait]
impl FilesApi for MockApi {
    async fn find(&self, route: &str, id: Option<&str>) -> Result<Json> {
        let mut store = self.store.lock().unwrap();
        store.failure()?;
        let key = id.unwrap_or_default();
        store
            .collection(collection_of(route))
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, object)| object.clone())
            .ok_or_else(not_found)
    }

    async fn create(&self, route: &str, id: Option<&str>, body: &Json) -> Result<Json> {
        let mut store = self.store.lock().unwrap();
        store.failure()?;
        store.bodies.push((resolved(route, id), body.clone()));

        let mut object = match id {
            Some(path) => json!({"path": path, "type": "directory"}),
            None => {
                let next = store.next_id;
                store.next_id += 1;
                json!({"id": next})
            }
        };
        merge(&mut object, body);
        let key = object_key(&object);
        store
            .collection(collection_of(route))
            .push((key, object.clone()));
        Ok(object)
    }

    async fn update(&self, route: &str, id: &str, body: &Json) -> Result<Json> {
        let mut store = self.store.lock().unwrap();
        store.failure()?;
        store.bodies.push((resolved(route, Some(id)), body.clone()));
        let (_, object) = store
            .collection(collection_of(route))
            .iter_mut()
            .find(|(k, _)| k == id)
            .ok_or_else(not_found)?;
        merge(object, body);
        Ok(object.clone())
    }

    async fn delete(&self, route: &str, id: &str, params: &Params) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.failure()?;
        let objects = store.collection(collection_of(route));
        let idx = objects
            .iter()
            .position(|(k, _)| k == id)
            .ok_or_else(not_found)?;
        objects.remove(idx);
        store
            .deleted
            .push((resolved(route, Some(id)), params.clone()));
        Ok(())
    }

    async fn list_page(&self, route: &str, _params: &Params, cursor: Option<&str>) -> Result<Page> {
        let mut store = self.store.lock().unwrap();
        store.failure()?;
        let offset: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let objects = store.collection(collection_of(route));
        let items: Vec<Json> = objects
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|(_, object)| object.clone())
            .collect();
        let next = offset + items.len();
        let next_cursor = (next < objects.len()).then(|| next.to_string());
        Ok(Page { items, next_cursor })
    }
}
