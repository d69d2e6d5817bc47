//! Error types for quay-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Quay operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A call to the hosting provider failed.
    #[error("{operation} failed: {message}")]
    Remote {
        /// Provider operation that failed (e.g. `GetPullRequest`).
        operation: &'static str,
        /// Error reported by the provider or its transport.
        message: String,
    },

    /// The provider answered successfully but a field we rely on was absent.
    #[error("malformed {operation} response: {detail}")]
    MalformedResponse {
        /// Provider operation whose response was incomplete.
        operation: &'static str,
        /// What was missing.
        detail: String,
    },

    /// Deleting the content of a previously posted comment failed.
    #[error("minimize comment {comment_id}: {source}")]
    CommentDeletion {
        /// Provider identifier of the comment.
        comment_id: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// Comment size limit leaves no room for content.
    #[error(
        "comment limit {limit} is too small for {separators} bytes of continuation separators"
    )]
    InvalidCommentLimit { limit: usize, separators: usize },

    /// Unknown commit status name.
    #[error("invalid commit status '{0}' - expected pending, success or failed")]
    InvalidCommitStatus(String),

    /// The operation needs the tool's own identity but none was configured.
    #[error("no CodeCommit user ARN configured - set codecommit.user_arn or pass --user-arn")]
    MissingUserArn,

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Build a [`Error::Remote`] from any displayable provider failure.
    pub fn remote(operation: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Remote {
            operation,
            message: message.to_string(),
        }
    }

    /// Build a [`Error::MalformedResponse`].
    pub fn malformed(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation,
            detail: detail.into(),
        }
    }
}
