//! Trait abstraction for the CodeCommit API.
//!
//! This module defines the `CodeCommitApi` trait which covers exactly the
//! CodeCommit calls Quay makes, enabling dependency injection and testability.

use std::future::Future;

use quay_core::{ApprovalState, Result};

use crate::pagination::Page;
use crate::types::{
    Comment, CreateMergeCommit, Difference, MergeConflictQuery, PostComment, PullRequestRecord,
    ThreeWayMerge,
};

/// Trait for CodeCommit API operations.
///
/// This trait abstracts CodeCommit calls, allowing for:
/// - The AWS SDK client in production
/// - Scripted fakes in tests
///
/// Implementations report every failure as [`quay_core::Error::Remote`]
/// naming the API operation.
#[allow(clippy::missing_errors_doc)]
pub trait CodeCommitApi: Send + Sync {
    // === Commits ===

    /// Create a merge commit without updating any branch.
    ///
    /// Returns the commit id, if the provider reported one.
    fn create_unreferenced_merge_commit(
        &self,
        request: CreateMergeCommit,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    /// One page of the diff between `after_commit_specifier` and its parent.
    fn get_differences(
        &self,
        repository_name: &str,
        after_commit_specifier: &str,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<Page<Difference>>> + Send;

    // === Pull Requests ===

    /// Fetch pull request metadata.
    fn get_pull_request(
        &self,
        pull_request_id: &str,
    ) -> impl Future<Output = Result<PullRequestRecord>> + Send;

    /// Evaluate the approval rules against a revision.
    fn evaluate_pull_request_approval_rules(
        &self,
        pull_request_id: &str,
        revision_id: &str,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Set this identity's approval on a revision.
    fn update_pull_request_approval_state(
        &self,
        pull_request_id: &str,
        revision_id: &str,
        state: ApprovalState,
    ) -> impl Future<Output = Result<()>> + Send;

    // === Merges ===

    /// Whether the source merges into the destination without conflicts.
    fn get_merge_conflicts(
        &self,
        query: MergeConflictQuery,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Merge a pull request with a merge commit.
    fn merge_pull_request_by_three_way(
        &self,
        merge: ThreeWayMerge,
    ) -> impl Future<Output = Result<()>> + Send;

    // === Comments ===

    /// Post a comment on a pull request.
    fn post_comment_for_pull_request(
        &self,
        comment: PostComment,
    ) -> impl Future<Output = Result<()>> + Send;

    /// One page of the comments on a pull request.
    fn get_comments_for_pull_request(
        &self,
        pull_request_id: &str,
        next_token: Option<String>,
    ) -> impl Future<Output = Result<Page<Comment>>> + Send;

    /// Delete the content of a comment, leaving a placeholder.
    fn delete_comment_content(&self, comment_id: &str) -> impl Future<Output = Result<()>> + Send;
}
