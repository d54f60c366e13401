use thiserror::Error;

/// Failure while reading or writing one of the JSON files under the data dir.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of an outbound content, image or translation call.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{service} answered with status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{0} returned no content")]
    Empty(&'static str),
    #[error("UNSPLASH_ACCESS_KEY not set")]
    MissingImageKey,
    #[error("translation failed with status {0}")]
    Translation(i64),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
