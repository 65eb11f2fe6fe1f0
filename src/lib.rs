//! dazzle - terminal browser for OpenAPI descriptions
//!
//! dazzle loads an OpenAPI document from a file or URL, turns it into a small
//! owned model, and presents the operations as a filterable list with a
//! synchronized detail pane.
//!
//! # Overview
//!
//! - [`document`] parses JSON or YAML into a typed graph with lazy `$ref` resolution
//! - [`adapter`] converts that graph into a [`types::Spec`] with depth-bounded schemas
//! - [`catalog`] lists, filters and sorts operations
//! - [`ui`] holds the screens; [`runtime`] owns the terminal and the message loop
//!
//! # Basic Usage
//!
//! Adapting a document and sorting its operations:
//!
//! ```
//! use dazzle::prelude::*;
//!
//! let doc = parse_str(r#"{
//!     "openapi": "3.0.3",
//!     "info": {"title": "Pets", "version": "1.0"},
//!     "paths": {"/pets": {"post": {}, "get": {"summary": "List pets"}}}
//! }"#).unwrap();
//!
//! let spec = adapt_spec(&doc, SCHEMA_MAX_DEPTH);
//! let sorted = OperationCatalog::new().sort(&spec.operations);
//! assert_eq!(sorted[0].id, "GET /pets");
//! assert_eq!(sorted[1].id, "POST /pets");
//! ```

pub mod adapter;
pub mod catalog;
pub mod config;
pub mod document;
pub mod errors;
pub mod logging;
pub mod repository;
pub mod runtime;
pub mod types;
pub mod ui;

pub use errors::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapter::{adapt_spec, SpecAdapter, SCHEMA_MAX_DEPTH};
    pub use crate::catalog::{method_rank, OperationCatalog};
    pub use crate::config::BrowserConfig;
    pub use crate::document::{parse_document, parse_str, Document, DocumentLoader};
    pub use crate::errors::{Error, Result};
    pub use crate::repository::{OpenApiRepository, SpecRepository, SpecService};
    pub use crate::types::*;
}
