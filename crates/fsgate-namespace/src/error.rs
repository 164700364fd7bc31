//! Error types for fsgate-namespace

use thiserror::Error;

/// Result type alias for namespace operations
pub type Result<T> = std::result::Result<T, NamespaceError>;

/// Errors that can occur in fsgate-namespace
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NamespaceError {
    /// The path is not an absolute, normalized path.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// Offending path
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// Nothing exists at the path.
    #[error("No such file or directory: {0}")]
    NotFound(String),

    /// Something already exists at the path.
    #[error("File exists: {0}")]
    AlreadyExists(String),

    /// A directory was required.
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// A directory that still has children cannot be removed.
    #[error("Directory not empty: {0}")]
    NotEmpty(String),

    /// Permission model error, including access denials.
    #[error(transparent)]
    Acl(#[from] fsgate_acl::Error),
}

impl NamespaceError {
    /// Creates a new invalid-path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        NamespaceError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the operation was refused by the permission checker.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, NamespaceError::Acl(e) if e.is_access_denied())
    }
}
