//! Error types for the Files.com client

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No Files.com API key configured")]
    MissingApiKey,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Error response from the API
    #[error("{message} (HTTP {status}, {kind})")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Whether the requested object does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Api { status, kind, .. } => *status == 404 || kind.starts_with("not-found"),
            _ => false,
        }
    }

    /// Build an API error from a status code and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Error::Api {
                status: parsed.http_code.unwrap_or(status),
                kind: parsed.kind.unwrap_or_else(|| status_kind(status).to_string()),
                message: parsed
                    .error
                    .or(parsed.title)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            },
            Err(_) => Error::Api {
                status,
                kind: status_kind(status).to_string(),
                message: if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                },
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Error document returned by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    #[serde(rename = "http-code")]
    http_code: Option<u16>,
    title: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

fn status_kind(status: u16) -> &'static str {
    match status {
        400 => "bad-request",
        401 => "not-authenticated",
        403 => "not-authorized",
        404 => "not-found",
        409 => "processing-failure",
        422 => "unprocessable-entity",
        429 => "rate-limited",
        500..=599 => "service-unavailable",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_error_document() {
        let err = Error::from_response(
            404,
            r#"{"error":"User Not Found","http-code":404,"instance":"abc","title":"User Not Found","type":"not-found/user-not-found"}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "User Not Found (HTTP 404, not-found/user-not-found)"
        );
    }

    #[test]
    fn not_found_type_without_404_status() {
        let err = Error::from_response(
            400,
            r#"{"error":"Folder missing","type":"not-found/folder-not-found"}"#,
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn plain_text_body_is_kept() {
        let err = Error::from_response(502, "Bad Gateway");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Bad Gateway (HTTP 502, service-unavailable)");
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let err = Error::from_response(401, "");
        assert_eq!(err.to_string(), "HTTP 401 (HTTP 401, not-authenticated)");
    }
}
