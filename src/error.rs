//! Unified error type.

use std::fmt;

/// The error type returned by [`Server::serve`](crate::Server::serve).
///
/// Request-level failures (400, 404) are expressed as
/// [`Response`](crate::Response) values and never surface here. This type
/// covers the infrastructure path only: binding the listening socket and
/// accepting connections.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "io: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}
