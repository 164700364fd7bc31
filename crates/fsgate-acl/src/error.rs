//! Error types for fsgate-acl

use thiserror::Error;

use crate::mode::Mode;
use crate::permission::AclPermission;

/// Result type alias for fsgate-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fsgate-acl
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A node on the path does not grant the requested access.
    #[error(
        "Permission denied: user={user}, access={access}, inode=\"{path}\":{owner}:{group}:{kind}:{mode}"
    )]
    AccessDenied {
        /// Acting user
        user: String,
        /// Access that was requested
        access: AclPermission,
        /// Full path being checked
        path: String,
        /// Owner of the failing node
        owner: String,
        /// Group of the failing node
        group: String,
        /// `'d'` for directories, `'-'` otherwise
        kind: char,
        /// Permission of the failing node
        mode: Mode,
    },

    /// The acting user must own the node but does not.
    #[error("Permission denied. user={user} is not the owner of inode={inode}")]
    NotOwner {
        /// Acting user
        user: String,
        /// Description of the node
        inode: String,
    },

    /// The operation is reserved to the file system owner and supergroup.
    #[error("Permission denied. user={user} is not a superuser, required to {operation}")]
    SuperuserRequired {
        /// Acting user
        user: String,
        /// What was attempted
        operation: String,
    },

    /// A position in a node chain does not exist.
    #[error("No such inode: {message}")]
    NotFound {
        /// What was looked up
        message: String,
    },

    /// A node chain and its path segments disagree in length.
    #[error("Malformed inode chain: {nodes} nodes for {segments} path segments")]
    MalformedChain {
        /// Number of node slots
        nodes: usize,
        /// Number of path segments
        segments: usize,
    },

    /// Required environment (such as a login identity) is unavailable.
    #[error("Misconfiguration: {message}")]
    Misconfiguration {
        /// What is missing
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A mode value or mode string is malformed.
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// A permission code outside `0..=7`.
    #[error("Invalid permission code: {0} (expected 0..=7)")]
    InvalidPermissionCode(u16),

    /// Error from fsgate-core
    #[error("Core error: {0}")]
    Core(#[from] fsgate_core::Error),
}

impl Error {
    /// Whether this is an enforcement failure (as opposed to a caller bug or
    /// bad configuration).
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Error::AccessDenied { .. } | Error::NotOwner { .. } | Error::SuperuserRequired { .. }
        )
    }

    /// Creates a new not-found error.
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new misconfiguration error with a source error.
    pub fn misconfiguration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Misconfiguration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
