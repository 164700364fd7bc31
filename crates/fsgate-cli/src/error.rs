//! Error types for fsgate-cli

use thiserror::Error;

/// Result type alias for fsgate-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fsgate-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from fsgate-core
    #[error(transparent)]
    Core(#[from] fsgate_core::Error),

    /// Error from fsgate-acl, including access denials
    #[error(transparent)]
    Acl(#[from] fsgate_acl::Error),

    /// Error from fsgate-namespace
    #[error(transparent)]
    Namespace(#[from] fsgate_namespace::NamespaceError),

    /// A tree fixture could not be read
    #[error("Invalid tree fixture: {0}")]
    Fixture(String),
}

impl Error {
    /// Creates a new fixture error.
    pub fn fixture<S: Into<String>>(message: S) -> Self {
        Error::Fixture(message.into())
    }

    /// Whether a permission check refused the request.
    pub fn is_access_denied(&self) -> bool {
        match self {
            Error::Acl(e) => e.is_access_denied(),
            Error::Namespace(e) => e.is_access_denied(),
            _ => false,
        }
    }
}
