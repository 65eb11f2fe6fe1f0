//! Error types for loading and browsing API descriptions.

use thiserror::Error;

/// Result type alias for dazzle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dazzle operations
#[derive(Debug, Error)]
pub enum Error {
    /// Description document not found at the given source
    #[error("document not found: {0}")]
    NotFound(String),

    /// Remote document could not be fetched
    #[error("failed to fetch document: {0}")]
    FetchFailed(String),

    /// Document text is not valid JSON or YAML
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Document parsed but has an unusable shape
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Error while loading a specific source
    #[error("loading spec from {source_name}: {source}")]
    Load {
        source_name: String,
        #[source]
        source: Box<Error>,
    },

    /// Document text is not valid JSON
    #[error("invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Document text is not valid YAML
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP transport error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The load task ended without reporting back
    #[error("load task failed: {0}")]
    TaskFailed(String),

    /// Debug logging could not be set up
    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl Error {
    /// Wraps an error with the source it was loaded from
    pub fn load(source_name: impl Into<String>, source: Error) -> Self {
        Error::Load {
            source_name: source_name.into(),
            source: Box::new(source),
        }
    }

    /// Creates a new not found error
    pub fn not_found(source: impl Into<String>) -> Self {
        Error::NotFound(source.into())
    }

    /// Creates a new fetch failed error
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Error::FetchFailed(message.into())
    }

    /// Creates a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a new invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Error::InvalidDocument(message.into())
    }

    /// Creates a new task failure error
    pub fn task_failed(message: impl Into<String>) -> Self {
        Error::TaskFailed(message.into())
    }

    /// Creates a new logging setup error
    pub fn logging(message: impl Into<String>) -> Self {
        Error::Logging(message.into())
    }
}
