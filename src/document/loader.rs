//! Fetching description documents from files and URLs

use super::{parse_str, Document};
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default timeout for remote fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a source string points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// `http://` or `https://` URL
    Remote(Url),
    /// Local file, either a plain path or a `file://` URL
    File(PathBuf),
}

impl SourceKind {
    /// Classifies a source string
    ///
    /// Anything that is not an http(s) or file URL is treated as a path, so
    /// `C:\specs\api.yaml` and `./api.json` both end up as files.
    pub fn classify(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SourceKind::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => SourceKind::File(path),
                Err(()) => SourceKind::File(PathBuf::from(source)),
            },
            _ => SourceKind::File(PathBuf::from(source)),
        }
    }
}

/// Reads and parses description documents
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    client: reqwest::Client,
}

impl DocumentLoader {
    /// Creates a loader with the default fetch timeout
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_FETCH_TIMEOUT)
            .user_agent(concat!("dazzle/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Creates a loader around an existing HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Loads and parses the document at `source`
    pub async fn load(&self, source: &str) -> Result<Document> {
        let content = self.read_source(source).await?;
        let doc = parse_str(&content)?;
        tracing::debug!(
            source,
            paths = doc.paths.len(),
            operations = doc.operation_count(),
            "parsed description document"
        );
        Ok(doc)
    }

    /// Reads the raw text of a source
    pub async fn read_source(&self, source: &str) -> Result<String> {
        match SourceKind::classify(source) {
            SourceKind::Remote(url) => self.fetch(url).await,
            SourceKind::File(path) => read_file(&path).await,
        }
    }

    async fn fetch(&self, url: Url) -> Result<String> {
        tracing::debug!(%url, "fetching remote document");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch_failed(format!("{url} returned {status}")));
        }

        Ok(response.text().await?)
    }
}

async fn read_file(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading document file");
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })
}
