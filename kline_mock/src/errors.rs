use thiserror::Error;

/// The unified error type for the `kline_mock` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument violates a documented constraint
    /// (non-positive duration, unknown interval, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}
