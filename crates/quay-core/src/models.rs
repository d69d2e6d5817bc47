//! Pull request model shared by every VCS provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Keyword that marks a comment as the output of a plan run.
pub const PLAN_COMMAND: &str = "plan";

/// Commit message used when Quay merges a pull request itself.
pub const AUTOMERGE_COMMIT_MESSAGE: &str = "[Quay] Automatically merging after successful apply";

/// A source repository on the hosting provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    /// Repository name, unique within the provider account.
    pub name: String,
}

impl Repo {
    /// Create a repository identity from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A pull request as seen by the automation tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub num: u64,

    /// Branch the pull request merges into.
    pub base_branch: String,

    /// Branch carrying the proposed changes.
    pub head_branch: String,

    /// Repository that owns the pull request.
    pub base_repo: Repo,
}

/// The tool's verdict on a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStatus {
    /// Work is still running.
    Pending,
    /// The run succeeded.
    Success,
    /// The run failed.
    Failed,
}

impl CommitStatus {
    /// Provider approval state for this status.
    ///
    /// `Pending` has no counterpart: the approval state is left untouched.
    #[must_use]
    pub const fn approval_state(self) -> Option<ApprovalState> {
        match self {
            Self::Pending => None,
            Self::Success => Some(ApprovalState::Approve),
            Self::Failed => Some(ApprovalState::Revoke),
        }
    }

    /// Lowercase name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CommitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "failed" | "failure" => Ok(Self::Failed),
            _ => Err(Error::InvalidCommitStatus(s.to_string())),
        }
    }
}

/// Approval vocabulary of pull request providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalState {
    /// Approve the current revision.
    Approve,
    /// Withdraw a previous approval.
    Revoke,
}

impl ApprovalState {
    /// Provider wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "APPROVE",
            Self::Revoke => "REVOKE",
        }
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of a status update.
///
/// Providers without a commit status API may only use part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStatusUpdate {
    /// The verdict to publish.
    pub status: CommitStatus,

    /// Name of the check producing the status (e.g. `quay/plan`).
    pub source: String,

    /// Human-readable summary.
    pub description: String,

    /// Link to details, may be empty.
    pub url: String,
}

impl CommitStatusUpdate {
    /// Create an update with only a status set.
    #[must_use]
    pub fn new(status: CommitStatus) -> Self {
        Self {
            status,
            source: String::new(),
            description: String::new(),
            url: String::new(),
        }
    }
}
