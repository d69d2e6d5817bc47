//! # quay-core
//!
//! Provider-independent pieces of Quay: the pull request model, the
//! [`VcsClient`] trait implemented by each hosting provider, comment
//! splitting for size-limited comment APIs, and configuration.

pub mod comment;
pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use comment::CommentSplitter;
pub use config::{CodeCommitConfig, Config};
pub use error::{Error, Result};
pub use models::{
    AUTOMERGE_COMMIT_MESSAGE, ApprovalState, CommitStatus, CommitStatusUpdate, PLAN_COMMAND,
    PullRequest, Repo,
};
pub use traits::VcsClient;
