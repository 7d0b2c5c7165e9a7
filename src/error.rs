//! Error kinds surfaced by the ranking pipeline and its collaborators.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The search request failed or the service answered with an error status.
    #[error("search service unavailable: {0}")]
    SearchUnavailable(String),

    /// The search service answered but returned zero items.
    #[error("search returned no results")]
    NoResults,

    /// The search response could not be decoded or lacks expected fields.
    #[error("malformed search response: {0}")]
    MalformedResponse(String),

    /// No question/answer structure could be read from the screenshot.
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
