//! Files.com provider core
//!
//! Framework layer shared by the provider and its host: attribute values,
//! schemas, diagnostics, plan modifiers and the data source / resource traits.

pub mod diagnostics;
pub mod plan;
pub mod provider;
pub mod schema;
pub mod value;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use provider::{DataSource, Provider, ProviderError, ProviderResult, Resource};
pub use schema::{AttributeSchema, AttributeType, Schema};
pub use value::{Attributes, Value};
