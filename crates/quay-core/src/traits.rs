//! Trait abstraction for hosting-provider clients.
//!
//! This module defines the `VcsClient` trait through which the automation
//! tool talks to a pull request provider, enabling dependency injection and
//! testability.

use std::future::Future;

use crate::Result;
use crate::models::{CommitStatusUpdate, PullRequest, Repo};

/// Operations the automation tool needs from a pull request provider.
///
/// Implementations hold no per-call state, so a single client may serve
/// many pull requests concurrently.
pub trait VcsClient: Send + Sync {
    /// Paths touched by the pull request. Renamed files report both paths.
    fn modified_files(
        &self,
        repo: &Repo,
        pull: &PullRequest,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Post a comment, split into several comments when oversized.
    fn create_comment(
        &self,
        repo: &Repo,
        pull_num: u64,
        comment: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Hide plan comments previously posted by this tool.
    fn hide_prev_plan_comments(
        &self,
        repo: &Repo,
        pull_num: u64,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Whether the pull request satisfies its approval rules.
    fn pull_is_approved(
        &self,
        repo: &Repo,
        pull: &PullRequest,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Whether the pull request merges without conflicts.
    fn pull_is_mergeable(
        &self,
        repo: &Repo,
        pull: &PullRequest,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Publish the tool's verdict on the pull request.
    fn update_status(
        &self,
        repo: &Repo,
        pull: &PullRequest,
        update: &CommitStatusUpdate,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Merge the pull request.
    fn merge_pull(&self, pull: &PullRequest) -> impl Future<Output = Result<()>> + Send;

    /// Link to the pull request suitable for Markdown.
    ///
    /// # Errors
    /// Providers that must look the link up may fail.
    fn markdown_pull_link(&self, pull: &PullRequest) -> Result<String>;
}
