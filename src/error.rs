use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hubload operations.
#[derive(Debug, Error)]
pub enum HubloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid repository ID '{input}': {message}")]
    InvalidIdentifier { input: String, message: String },

    #[error("Dataset root directory does not exist: {path}")]
    MissingLocalPath { path: PathBuf },

    #[error("No dataset found for '{repo_id}' at {root}: {message}")]
    DatasetNotFound {
        repo_id: String,
        root: PathBuf,
        message: String,
    },

    #[error("Failed to parse dataset metadata from {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render dataset card: {message}")]
    CardRender { message: String },

    #[error("Hub API error for '{repo_id}': {message}")]
    HubApi { repo_id: String, message: String },
}
