//! # quay-codecommit
//!
//! AWS CodeCommit integration for Quay. [`CodeCommitClient`] implements the
//! provider-independent [`quay_core::VcsClient`] on top of any
//! [`CodeCommitApi`]; the AWS SDK client is the production implementation.
//!
//! # Credentials
//!
//! Requests are signed by the AWS SDK using its default credential chain
//! (environment, profile, instance role). Quay never handles secrets itself.

mod client;
mod pagination;
mod sdk;
mod traits;
mod types;

#[cfg(test)]
mod fake;

pub use client::{
    CONTINUED_FOOTER, CONTINUED_HEADER, COMMENT_SIZE_LIMIT, CodeCommitClient, pull_link,
};
pub use pagination::{Page, Paginator};
pub use sdk::{AwsCodeCommitClient, connect};
pub use traits::CodeCommitApi;
pub use types::{
    Comment, CommitPair, CreateMergeCommit, Difference, MergeConflictQuery,
    PostComment, PullRequestRecord, PullRequestTarget, ThreeWayMerge,
};
