//! Files.com REST client
//!
//! A thin client over `https://app.files.com/api/rest/v1` exposing the
//! operations the provider needs: find, list (cursor paginated), create,
//! update and delete, all over JSON documents.

pub mod api;
pub mod client;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use api::{FilesApi, ListIter, Page, Params};
pub use client::FilesClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
