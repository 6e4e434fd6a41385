//! Error types for the `sse-client` crate.
//!
//! Follows the layered error pattern: a root `Error` struct holding an error
//! kind plus an optional source for error chaining.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for stream subscriptions.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// The kinds of failures a single subscription can terminate with. Every
/// failure is local to its own stream handle.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// The transport to the endpoint could not be established or maintained
    /// (connection refused, drop mid-stream, non-success status).
    Connect,
    /// A pushed frame did not match the expected flavor's framing.
    Decode(String),
}

impl Error {
    pub(crate) fn connect(source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            error_kind: ErrorKind::Connect,
        }
    }

    pub(crate) fn decode(detail: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: ErrorKind::Decode(detail.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Connect => match &self.source {
                Some(source) => write!(f, "stream transport failed: {source}"),
                None => write!(f, "stream transport failed"),
            },
            ErrorKind::Decode(detail) => write!(f, "stream frame decode failed: {detail}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<eventsource_client::Error> for Error {
    fn from(err: eventsource_client::Error) -> Self {
        Error::connect(err)
    }
}
