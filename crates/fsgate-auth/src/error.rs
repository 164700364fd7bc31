//! Auth-specific error types.

/// Errors that can occur while resolving identities.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No login identity could be discovered for this process.
    #[error("cannot find login user: {0}")]
    NoLoginUser(String),

    /// A group lookup failed for the given user.
    #[error("unable to obtain groups for '{user}': {message}")]
    GroupLookup {
        /// User whose groups were requested.
        user: String,
        /// What went wrong.
        message: String,
    },

    /// A group file line could not be parsed.
    #[error("invalid group file entry at line {line}: {content}")]
    InvalidGroupFile {
        /// 1-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },

    /// A group file could not be read.
    #[error("failed to read group file: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Whether the error means "nobody is logged in" (vs. a lookup failure).
    pub fn is_missing_login(&self) -> bool {
        matches!(self, AuthError::NoLoginUser(_))
    }
}
