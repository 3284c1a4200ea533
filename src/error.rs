//! Error taxonomy for a quiz round.
//!
//! Everything here collapses into one fixed user-facing message at the
//! controller; the variants exist so the log can say what actually went wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// Transport-level failure talking to the image API.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure while streaming the image body.
    #[error("i/o error while reading response: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered, but not with what we expected.
    #[error("malformed API response: {0}")]
    Response(String),

    /// The image URL does not follow the `/breeds/<identifier>/` convention.
    #[error("unrecognized breed path in {url:?}: {reason}")]
    Parse { url: String, reason: String },

    /// Caller asked for something the catalog cannot satisfy.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl QuizError {
    pub fn parse(url: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
