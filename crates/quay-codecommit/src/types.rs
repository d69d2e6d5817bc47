//! CodeCommit request and response types.
//!
//! These mirror the subset of the CodeCommit API Quay uses. Identifiers are
//! opaque and passed back to the provider verbatim.

use quay_core::{Error, Result};

/// Request to create a three-way merge commit that no branch points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMergeCommit {
    /// Repository name.
    pub repository_name: String,

    /// Branch, tag or commit being merged.
    pub source_commit_specifier: String,

    /// Branch, tag or commit merged into.
    pub destination_commit_specifier: String,
}

/// One changed file of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Difference {
    /// Path before the change, absent for added files.
    pub before_path: Option<String>,

    /// Path after the change, absent for deleted files.
    pub after_path: Option<String>,
}

/// A pull request as returned by `GetPullRequest`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestRecord {
    /// Token identifying the current state; required for state changes.
    pub revision_id: Option<String>,

    /// Source/destination pairs; CodeCommit returns one per repository.
    pub targets: Vec<PullRequestTarget>,
}

/// Commits of a pull request target that comments are anchored to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestTarget {
    /// Tip of the source branch.
    pub source_commit: Option<String>,

    /// Common ancestor of source and destination.
    pub merge_base: Option<String>,
}

/// Commits a pull request comment is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitPair<'a> {
    /// Merge base of the pull request.
    pub before_commit_id: &'a str,

    /// Tip of the source branch.
    pub after_commit_id: &'a str,
}

impl PullRequestRecord {
    /// The revision id.
    ///
    /// # Errors
    /// Returns [`Error::MalformedResponse`] if the provider omitted it.
    pub fn revision_id(&self) -> Result<&str> {
        self.revision_id
            .as_deref()
            .ok_or_else(|| Error::malformed("GetPullRequest", "pull request has no revision id"))
    }

    /// Merge base and source commit of the first target.
    ///
    /// # Errors
    /// Returns [`Error::MalformedResponse`] if there is no target or either
    /// commit is missing.
    pub fn commit_pair(&self) -> Result<CommitPair<'_>> {
        let target = self
            .targets
            .first()
            .ok_or_else(|| Error::malformed("GetPullRequest", "no pull request targets"))?;

        let before_commit_id = target
            .merge_base
            .as_deref()
            .ok_or_else(|| Error::malformed("GetPullRequest", "target has no merge base"))?;
        let after_commit_id = target
            .source_commit
            .as_deref()
            .ok_or_else(|| Error::malformed("GetPullRequest", "target has no source commit"))?;

        Ok(CommitPair {
            before_commit_id,
            after_commit_id,
        })
    }
}

/// A pull request comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// Provider identifier of the comment.
    pub comment_id: Option<String>,

    /// ARN of the author.
    pub author_arn: Option<String>,

    /// Comment body. Absent once the content was deleted.
    pub content: Option<String>,
}

/// Request to post a pull request comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostComment {
    /// Repository name.
    pub repository_name: String,

    /// Pull request identifier.
    pub pull_request_id: String,

    /// Commit on the destination side of the comparison.
    pub before_commit_id: String,

    /// Commit on the source side of the comparison.
    pub after_commit_id: String,

    /// Comment body.
    pub content: String,
}

/// Request to check two commit specifiers for three-way merge conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflictQuery {
    /// Repository name.
    pub repository_name: String,

    /// Branch, tag or commit merged into.
    pub destination_commit_specifier: String,

    /// Branch, tag or commit being merged.
    pub source_commit_specifier: String,
}

/// Request to merge a pull request with a merge commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreeWayMerge {
    /// Repository name.
    pub repository_name: String,

    /// Pull request identifier.
    pub pull_request_id: String,

    /// Message of the merge commit.
    pub commit_message: String,
}
