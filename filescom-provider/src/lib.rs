//! Files.com Provider
//!
//! Data sources and resources for the Files.com REST API. Each entity is
//! described by a schema config; a single generic implementation maps it
//! onto the client's find / list / create / update / delete operations.

pub mod config;
pub mod populate;
pub mod provider;
pub mod resources;
pub mod schemas;

#[cfg(test)]
mod testing;

pub use config::ProviderConfig;
pub use provider::FilesProvider;
pub use resources::{FilesDataSource, FilesResource};
pub use schemas::FilesSchemaConfig;
