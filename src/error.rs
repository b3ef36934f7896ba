use thiserror::Error;

/// Failures of the durable key-value storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of a remote word or definition lookup. These never reach the
/// player; providers turn them into fallback text.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response contained no usable entry")]
    Empty,
}
