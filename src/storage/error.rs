use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
