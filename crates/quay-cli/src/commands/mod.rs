//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use quay_core::{CommitStatus, PullRequest, Repo};

pub mod comment;
pub mod completions;
pub mod pull;
pub mod status;
pub mod utils;

/// Quay - pull request automation for AWS CodeCommit.
#[derive(Parser)]
#[command(name = "quay", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "quay.toml")]
    pub config: PathBuf,

    /// AWS region, overriding the config file.
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// ARN Quay posts comments as, overriding the config file.
    #[arg(long, global = true)]
    pub user_arn: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log every remote call.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Identifies a pull request.
#[derive(Args, Debug, Clone)]
pub struct PullArgs {
    /// Repository name.
    #[arg(long)]
    pub repo: String,

    /// Pull request number.
    #[arg(long)]
    pub pull: u64,
}

/// Source and destination branches of a pull request.
#[derive(Args, Debug, Clone)]
pub struct BranchArgs {
    /// Branch merged into.
    #[arg(long)]
    pub base: String,

    /// Branch being merged.
    #[arg(long)]
    pub head: String,
}

impl PullArgs {
    /// The pull request these arguments name.
    pub fn pull_request(&self, branches: Option<&BranchArgs>) -> PullRequest {
        let (base_branch, head_branch) = branches
            .map(|b| (b.base.clone(), b.head.clone()))
            .unwrap_or_default();

        PullRequest {
            num: self.pull,
            base_branch,
            head_branch,
            base_repo: self.repo(),
        }
    }

    pub fn repo(&self) -> Repo {
        Repo::new(&self.repo)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the files a pull request modifies.
    Files {
        #[command(flatten)]
        pull: PullArgs,

        #[command(flatten)]
        branches: BranchArgs,
    },

    /// Post a comment, split into several if it is too long.
    ///
    /// The body is read from --body, --file, or stdin.
    Comment {
        #[command(flatten)]
        pull: PullArgs,

        /// Comment text.
        #[arg(long, conflicts_with = "file")]
        body: Option<String>,

        /// Read the comment text from a file.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Hide earlier plan comments Quay posted.
    #[command(name = "hide-plans")]
    HidePlans {
        #[command(flatten)]
        pull: PullArgs,
    },

    /// Check whether the approval rules are satisfied.
    Approved {
        #[command(flatten)]
        pull: PullArgs,
    },

    /// Check whether the pull request merges without conflicts.
    Mergeable {
        #[command(flatten)]
        pull: PullArgs,

        #[command(flatten)]
        branches: BranchArgs,
    },

    /// Report a status by approving or revoking the pull request.
    Status {
        #[command(flatten)]
        pull: PullArgs,

        /// pending, success or failed.
        status: CommitStatus,

        /// Name of the reporting check.
        #[arg(long, default_value = "")]
        source: String,

        /// Human readable description.
        #[arg(long, default_value = "")]
        description: String,

        /// Link to details.
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Merge the pull request with a merge commit.
    Merge {
        #[command(flatten)]
        pull: PullArgs,
    },

    /// Print the console link of a pull request.
    Link {
        #[command(flatten)]
        pull: PullArgs,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}
