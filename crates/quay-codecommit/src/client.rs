//! CodeCommit implementation of [`VcsClient`].

use quay_core::{
    AUTOMERGE_COMMIT_MESSAGE, ApprovalState, CommentSplitter, CommitStatusUpdate, Error,
    PLAN_COMMAND, PullRequest, Repo, Result, VcsClient,
};
use tracing::{debug, info, warn};

use crate::pagination::Paginator;
use crate::traits::CodeCommitApi;
use crate::types::{
    Comment, CommitPair, CreateMergeCommit, Difference, MergeConflictQuery,
    PostComment, PullRequestRecord, ThreeWayMerge,
};

/// Largest comment CodeCommit accepts from Quay, in bytes.
pub const COMMENT_SIZE_LIMIT: usize = 1000;

/// Prepended to every comment fragment after the first.
pub const CONTINUED_HEADER: &str =
    "Continued from previous comment.\n<details><summary>Show Output</summary>\n\n```diff\n";

/// Appended to every comment fragment before the last.
pub const CONTINUED_FOOTER: &str = "\n```\n</details>\n<br>\n\n**Warning**: Output length greater than max comment size. Continued in next comment.";

/// Console path of a pull request, relative to the regional console host.
#[must_use]
pub fn pull_link(pull: &PullRequest) -> String {
    format!(
        "/codesuite/codecommit/repositories/{}/pull-requests/{}",
        pull.base_repo.name, pull.num
    )
}

/// CodeCommit client.
///
/// Holds no mutable state; every operation reads fresh data from the API.
pub struct CodeCommitClient<A> {
    api: A,
    /// ARN Quay's own comments are authored by.
    user_arn: Option<String>,
}

impl<A: CodeCommitApi> CodeCommitClient<A> {
    /// Create a client on top of a CodeCommit API implementation.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self {
            api,
            user_arn: None,
        }
    }

    /// Set the identity used to recognise Quay's own comments.
    #[must_use]
    pub fn with_user_arn(mut self, user_arn: impl Into<String>) -> Self {
        self.user_arn = Some(user_arn.into());
        self
    }

    /// The underlying API implementation.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    async fn read_pull_request(&self, pull_request_id: &str) -> Result<PullRequestRecord> {
        debug!(pull_request_id, "fetching pull request");
        self.api.get_pull_request(pull_request_id).await
    }

    /// Post `fragments` in order, stopping at the first failure.
    async fn post_fragments(
        &self,
        repo: &Repo,
        pull_request_id: &str,
        commits: CommitPair<'_>,
        fragments: Vec<String>,
    ) -> Result<()> {
        let total = fragments.len();
        for (i, content) in fragments.into_iter().enumerate() {
            debug!(
                pull_request_id,
                fragment = i + 1,
                total,
                "posting comment"
            );
            self.api
                .post_comment_for_pull_request(PostComment {
                    repository_name: repo.name.clone(),
                    pull_request_id: pull_request_id.to_string(),
                    before_commit_id: commits.before_commit_id.to_string(),
                    after_commit_id: commits.after_commit_id.to_string(),
                    content,
                })
                .await?;
        }
        Ok(())
    }
}

impl<A: CodeCommitApi> VcsClient for CodeCommitClient<A> {
    async fn modified_files(&self, repo: &Repo, pull: &PullRequest) -> Result<Vec<String>> {
        let commit_id = self
            .api
            .create_unreferenced_merge_commit(CreateMergeCommit {
                repository_name: repo.name.clone(),
                source_commit_specifier: pull.head_branch.clone(),
                destination_commit_specifier: pull.base_branch.clone(),
            })
            .await?
            .ok_or_else(|| {
                Error::malformed("CreateUnreferencedMergeCommit", "merge commit has no id")
            })?;
        debug!(commit_id, "created unreferenced merge commit");

        let differences = Paginator::new(|token| {
            self.api
                .get_differences(&repo.name, &commit_id, token)
        })
        .collect_all()
        .await?;

        let mut files = Vec::with_capacity(differences.len());
        for difference in differences {
            push_changed_paths(&mut files, difference);
        }
        Ok(files)
    }

    async fn create_comment(&self, repo: &Repo, pull_num: u64, comment: &str) -> Result<()> {
        let pull_request_id = pull_num.to_string();
        let record = self.read_pull_request(&pull_request_id).await?;
        let commits = record.commit_pair()?;

        let splitter = CommentSplitter::new(COMMENT_SIZE_LIMIT, CONTINUED_HEADER, CONTINUED_FOOTER)?;
        let fragments = splitter.split(comment);
        if fragments.len() > 1 {
            info!(
                pull_request_id,
                fragments = fragments.len(),
                "comment exceeds size limit, splitting"
            );
        }

        self.post_fragments(repo, &pull_request_id, commits, fragments)
            .await
    }

    async fn hide_prev_plan_comments(&self, _repo: &Repo, pull_num: u64) -> Result<()> {
        let user_arn = self.user_arn.as_deref().ok_or(Error::MissingUserArn)?;
        let pull_request_id = pull_num.to_string();

        let comments = Paginator::new(|token| {
            self.api
                .get_comments_for_pull_request(&pull_request_id, token)
        })
        .collect_all()
        .await?;
        debug!(pull_request_id, count = comments.len(), "listed comments");

        for comment in &comments {
            let Some(comment_id) = own_plan_comment(comment, user_arn) else {
                continue;
            };

            info!(pull_request_id, comment_id, "hiding previous plan comment");
            self.api
                .delete_comment_content(comment_id)
                .await
                .map_err(|e| Error::CommentDeletion {
                    comment_id: comment_id.to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(())
    }

    async fn pull_is_approved(&self, _repo: &Repo, pull: &PullRequest) -> Result<bool> {
        let pull_request_id = pull.num.to_string();
        let record = self.read_pull_request(&pull_request_id).await?;
        let revision_id = record.revision_id()?;

        self.api
            .evaluate_pull_request_approval_rules(&pull_request_id, revision_id)
            .await
    }

    async fn pull_is_mergeable(&self, _repo: &Repo, pull: &PullRequest) -> Result<bool> {
        self.api
            .get_merge_conflicts(MergeConflictQuery {
                repository_name: pull.base_repo.name.clone(),
                destination_commit_specifier: pull.base_branch.clone(),
                source_commit_specifier: pull.head_branch.clone(),
            })
            .await
    }

    async fn update_status(
        &self,
        repo: &Repo,
        pull: &PullRequest,
        update: &CommitStatusUpdate,
    ) -> Result<()> {
        let Some(state) = update.status.approval_state() else {
            debug!(
                pull = pull.num,
                status = %update.status,
                "status has no approval state, leaving pull request untouched"
            );
            return Ok(());
        };

        let pull_request_id = pull.num.to_string();
        let record = self.read_pull_request(&pull_request_id).await?;
        let revision_id = record.revision_id()?;
        let commits = record.commit_pair()?;

        self.api
            .update_pull_request_approval_state(&pull_request_id, revision_id, state)
            .await?;
        info!(pull_request_id, %state, "updated approval state");

        let announcement = approval_announcement(state, update);
        self.post_fragments(repo, &pull_request_id, commits, vec![announcement])
            .await
    }

    async fn merge_pull(&self, pull: &PullRequest) -> Result<()> {
        info!(pull = pull.num, repository = %pull.base_repo.name, "merging pull request");
        self.api
            .merge_pull_request_by_three_way(ThreeWayMerge {
                repository_name: pull.base_repo.name.clone(),
                pull_request_id: pull.num.to_string(),
                commit_message: AUTOMERGE_COMMIT_MESSAGE.to_string(),
            })
            .await
    }

    fn markdown_pull_link(&self, pull: &PullRequest) -> Result<String> {
        Ok(pull_link(pull))
    }
}

/// Record the paths a difference touches. Renames contribute both paths.
fn push_changed_paths(files: &mut Vec<String>, difference: Difference) {
    let Difference {
        before_path,
        after_path,
    } = difference;

    match (after_path, before_path) {
        (Some(after), Some(before)) => {
            let renamed = after != before;
            files.push(after);
            if renamed {
                files.push(before);
            }
        }
        (Some(path), None) | (None, Some(path)) => files.push(path),
        (None, None) => warn!("difference without blob paths, skipping"),
    }
}

/// The comment's id if it is a plan comment authored by `user_arn`.
fn own_plan_comment<'a>(comment: &'a Comment, user_arn: &str) -> Option<&'a str> {
    let author = comment.author_arn.as_deref()?;
    if !author.eq_ignore_ascii_case(user_arn) {
        return None;
    }

    let first_line = comment.content.as_deref()?.lines().next()?;
    if !first_line.to_lowercase().contains(PLAN_COMMAND) {
        return None;
    }

    comment.comment_id.as_deref()
}

/// Comment announcing an approval change.
fn approval_announcement(state: ApprovalState, update: &CommitStatusUpdate) -> String {
    let mut body = format!("Quay set pull request approval state to: {state}");

    if !update.description.is_empty() {
        body.push_str("\n\n");
        if !update.source.is_empty() {
            body.push_str(&format!("**{}**: ", update.source));
        }
        body.push_str(&update.description);
    }
    if !update.url.is_empty() {
        body.push_str(&format!("\n\n[Details]({})", update.url));
    }

    body
}
