use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the coin data core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse payload: {0}")]
    Parse(String),

    #[error("Local storage operation failed: {0}")]
    LocalStorage(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

/// Result shape crossing the repository boundary.
///
/// Causal detail stops here: repositories log the underlying [`Error`] and
/// surface a fixed, human-readable message. The presentation collaborator
/// only ever displays the message and offers retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataResult<T> {
    Success(T),
    Error(String),
}

impl<T> DataResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, DataResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DataResult::Error(_))
    }
}
