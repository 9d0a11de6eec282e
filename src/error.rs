use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed selector \"{selector}\" at offset {offset}: {message}")]
    MalformedSelector {
        selector: String,
        offset: usize,
        message: String,
    },

    #[error("unable to retrieve metrics from {url} after {attempts} attempts")]
    Unavailable { url: String, attempts: u32 },

    #[error("no metrics matched the selector: {selector}")]
    NoMatch { selector: String },

    #[error("{selector}: expected value {expected}, but got {actual}")]
    ValueMismatch {
        selector: String,
        expected: f64,
        actual: f64,
    },

    #[error("expected value \"{value}\" is not a number")]
    InvalidExpectedValue { value: String },

    #[error("couldn't decode metrics text")]
    Decode(#[source] io::Error),

    #[error("JSON serialization failed")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(String),
}

impl Error {
    /// True for the failures an assertion reports, as opposed to setup problems
    /// such as a bad selector or an unreachable endpoint.
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, Error::NoMatch { .. } | Error::ValueMismatch { .. })
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::InvalidArgument(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
