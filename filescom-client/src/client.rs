//! HTTP implementation of `FilesApi`
//!
//! Handles:
//! - API key authentication (`X-FilesAPI-Key`)
//! - Route rendering with per-segment percent-encoding
//! - Cursor pagination headers
//! - Retry with backoff for rate-limited requests

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::api::{FilesApi, Page, Params, route_segments};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

pub const API_KEY_HEADER: &str = "X-FilesAPI-Key";
pub const CURSOR_NEXT_HEADER: &str = "X-Files-Cursor-Next";
pub const CURSOR_HEADER: &str = "X-Files-Cursor";

pub struct FilesClient {
    http: Client,
    config: ClientConfig,
    api_key: String,
}

impl FilesClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingApiKey)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a route
    pub fn url(&self, route: &str, id: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base())?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(route_segments(route, id));
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        query: &Params,
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let mut req = self
                .http
                .request(method.clone(), url.clone())
                .header(API_KEY_HEADER, &self.api_key)
                .header("Accept", "application/json");
            if !query.is_empty() {
                req = req.query(query);
            }
            if let Some(body) = body {
                req = req.json(body);
            }

            debug!("{} {}", method, url);
            let response = req.send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after(&response);
                if attempt < self.config.max_retries {
                    let delay = self.config.retry_delay(attempt, retry_after);
                    warn!(
                        "Rate limited (429), attempt {}/{}, waiting {:?}",
                        attempt + 1,
                        self.config.max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                return Err(Error::RateLimited {
                    retry_after_seconds: retry_after.unwrap_or(0),
                });
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                debug!("{} {} failed with {}", method, url, status.as_u16());
                return Err(Error::from_response(status.as_u16(), &text));
            }

            return Ok(response);
        }
    }

    async fn send_json(
        &self,
        method: Method,
        url: Url,
        query: &Params,
        body: Option<&Value>,
    ) -> Result<Value> {
        let response = self.send(method, url, query, body).await?;
        decode_body(response).await
    }
}

#[async_trait]
impl FilesApi for FilesClient {
    async fn find(&self, route: &str, id: Option<&str>) -> Result<Value> {
        let url = self.url(route, id)?;
        self.send_json(Method::GET, url, &Vec::new(), None).await
    }

    async fn create(&self, route: &str, id: Option<&str>, body: &Value) -> Result<Value> {
        let url = self.url(route, id)?;
        self.send_json(Method::POST, url, &Vec::new(), Some(body))
            .await
    }

    async fn update(&self, route: &str, id: &str, body: &Value) -> Result<Value> {
        let url = self.url(route, Some(id))?;
        self.send_json(Method::PATCH, url, &Vec::new(), Some(body))
            .await
    }

    async fn delete(&self, route: &str, id: &str, params: &Params) -> Result<()> {
        let url = self.url(route, Some(id))?;
        self.send(Method::DELETE, url, params, None).await?;
        Ok(())
    }

    async fn list_page(&self, route: &str, params: &Params, cursor: Option<&str>) -> Result<Page> {
        let url = self.url(route, None)?;
        let mut query = params.clone();
        if !query.iter().any(|(k, _)| k == "per_page") {
            query.push(("per_page".to_string(), self.config.per_page.to_string()));
        }
        if let Some(cursor) = cursor {
            query.push(("cursor".to_string(), cursor.to_string()));
        }

        let response = self.send(Method::GET, url, &query, None).await?;
        let next_cursor = header_value(&response, CURSOR_NEXT_HEADER)
            .or_else(|| header_value(&response, CURSOR_HEADER))
            .filter(|c| !c.is_empty());

        let items = match decode_body(response).await? {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        Ok(Page { items, next_cursor })
    }
}

impl std::fmt::Debug for FilesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilesClient")
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

async fn decode_body(response: Response) -> Result<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
}

fn retry_after(response: &Response) -> Option<u64> {
    header_value(response, "retry-after").and_then(|s| s.parse().ok())
}
