use thiserror::Error;

/// Errors returned by store writes. Reads are deliberately infallible: a
/// missing or corrupt file degrades to empty state, logged at warn.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error for {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
