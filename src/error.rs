use thiserror::Error;

/// Everything a dashboard operation can fail with.
///
/// `Service` and `Validation` carry a user-ready message and surface as a
/// single toast at the operation that triggered them; `Cancelled` is a
/// declined delete prompt and surfaces as nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashError {
    /// Non-2xx response or transport failure.
    #[error("{0}")]
    Service(String),
    /// Malformed form input; blocks before any network call.
    #[error("{0}")]
    Validation(String),
    /// Delete prompt declined. Not an error, simply a no-op.
    #[error("cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for DashError {
    fn from(value: reqwest::Error) -> Self {
        Self::Service(value.to_string())
    }
}

pub type DashResult<T> = Result<T, DashError>;
