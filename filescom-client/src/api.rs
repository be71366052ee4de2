//! FilesApi - Trait abstracting the REST operations the provider needs
//!
//! Routes are templates relative to the API base such as `users/{id}` or
//! `file_actions/metadata/{id}`. The `{id}` placeholder is replaced by the
//! object id; path-like ids keep their slashes and every segment is
//! percent-encoded on the wire.

use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Query parameters as ordered key/value pairs
pub type Params = Vec<(String, String)>;

/// One page of a list response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    /// Cursor for the next page, `None` on the last page
    pub next_cursor: Option<String>,
}

#[async_trait]
pub trait FilesApi: Send + Sync {
    /// GET a single object. `id` is `None` for singleton routes such as `site`.
    async fn find(&self, route: &str, id: Option<&str>) -> Result<Value>;

    /// POST a new object. Path-addressed objects (folders) pass their path as `id`.
    async fn create(&self, route: &str, id: Option<&str>, body: &Value) -> Result<Value>;

    /// PATCH an existing object
    async fn update(&self, route: &str, id: &str, body: &Value) -> Result<Value>;

    async fn delete(&self, route: &str, id: &str, params: &Params) -> Result<()>;

    /// Fetch one page of a list route
    async fn list_page(&self, route: &str, params: &Params, cursor: Option<&str>) -> Result<Page>;
}

/// Split a route template into raw path segments, substituting `id`
pub fn route_segments(route: &str, id: Option<&str>) -> Vec<String> {
    let mut segments = Vec::new();
    for part in route.split('/').filter(|p| !p.is_empty()) {
        if part == "{id}" {
            if let Some(id) = id {
                segments.extend(
                    id.split('/')
                        .filter(|s| !s.is_empty())
                        .map(|s| s.to_string()),
                );
            }
        } else {
            segments.push(part.to_string());
        }
    }
    segments
}

/// Cursor-driven iterator over every item of a list route
pub struct ListIter<'a> {
    api: &'a dyn FilesApi,
    route: String,
    params: Params,
    cursor: Option<String>,
    buffer: VecDeque<Value>,
    done: bool,
    pages: usize,
}

impl<'a> ListIter<'a> {
    pub fn new(api: &'a dyn FilesApi, route: impl Into<String>, params: Params) -> Self {
        Self {
            api,
            route: route.into(),
            params,
            cursor: None,
            buffer: VecDeque::new(),
            done: false,
            pages: 0,
        }
    }

    /// Next item, fetching the following page when the current one is drained
    pub async fn next(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.done {
                return Ok(None);
            }

            let page = self
                .api
                .list_page(&self.route, &self.params, self.cursor.as_deref())
                .await?;
            self.pages += 1;
            log::debug!(
                "listed page {} of {} ({} items)",
                self.pages,
                self.route,
                page.items.len()
            );

            self.cursor = page.next_cursor.filter(|c| !c.is_empty());
            if self.cursor.is_none() || page.items.is_empty() {
                self.done = true;
            }
            self.buffer.extend(page.items);
        }
    }

    /// First item matching `predicate`, stopping the pagination early
    pub async fn find<F>(mut self, predicate: F) -> Result<Option<Value>>
    where
        F: Fn(&Value) -> bool,
    {
        while let Some(item) = self.next().await? {
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    pub async fn collect_all(mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Pages fetched so far
    pub fn pages(&self) -> usize {
        self.pages
    }
}
