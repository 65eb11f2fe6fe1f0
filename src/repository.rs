//! Spec loading seam and the service built on it.

use crate::adapter::{SpecAdapter, SCHEMA_MAX_DEPTH};
use crate::document::DocumentLoader;
use crate::errors::{Error, Result};
use crate::types::{Spec, SpecInfo};
use async_trait::async_trait;
use std::sync::Arc;

/// Loads a [`Spec`] from a source string
#[async_trait]
pub trait SpecRepository: Send + Sync {
    /// Loads and adapts the description at `source`
    async fn load(&self, source: &str) -> Result<Spec>;
}

/// Repository backed by [`DocumentLoader`] and [`SpecAdapter`]
///
/// Documents are not validated; anything that parses as an object is
/// adapted and whatever can be shown is shown.
#[derive(Debug, Clone)]
pub struct OpenApiRepository {
    loader: DocumentLoader,
    schema_depth: usize,
}

impl OpenApiRepository {
    /// Creates a repository with a default loader
    pub fn new() -> Result<Self> {
        Ok(Self::with_loader(DocumentLoader::new()?))
    }

    /// Creates a repository around an existing loader
    pub fn with_loader(loader: DocumentLoader) -> Self {
        Self {
            loader,
            schema_depth: SCHEMA_MAX_DEPTH,
        }
    }

    /// Sets how many nested schema levels are expanded
    pub fn with_schema_depth(mut self, depth: usize) -> Self {
        self.schema_depth = depth;
        self
    }
}

#[async_trait]
impl SpecRepository for OpenApiRepository {
    async fn load(&self, source: &str) -> Result<Spec> {
        let doc = self
            .loader
            .load(source)
            .await
            .map_err(|e| Error::load(source, e))?;

        let spec = SpecAdapter::new(&doc)
            .with_schema_depth(self.schema_depth)
            .adapt();
        tracing::info!(
            source,
            title = %spec.info.title,
            operations = spec.operations.len(),
            "spec loaded"
        );
        Ok(spec)
    }
}

/// Entry point used by the UI to obtain a spec
#[derive(Clone)]
pub struct SpecService {
    repo: Arc<dyn SpecRepository>,
}

impl SpecService {
    /// Creates a service over a repository
    pub fn new(repo: Arc<dyn SpecRepository>) -> Self {
        Self { repo }
    }

    /// Loads a spec through the repository
    pub async fn load_spec(&self, source: &str) -> Result<Spec> {
        self.repo.load(source).await
    }

    /// Returns the spec's metadata
    pub fn info<'a>(&self, spec: &'a Spec) -> &'a SpecInfo {
        &spec.info
    }
}

impl std::fmt::Debug for SpecService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecService").finish_non_exhaustive()
    }
}
