//! Production [`CodeCommitApi`] backed by the AWS SDK.

use aws_config::BehaviorVersion;
use aws_sdk_codecommit::Client;
use aws_sdk_codecommit::config::Region;
use aws_sdk_codecommit::error::DisplayErrorContext;
use aws_sdk_codecommit::types as sdk;
use quay_core::{ApprovalState, CodeCommitConfig, Error, Result};
use tracing::debug;

use crate::client::CodeCommitClient;
use crate::pagination::Page;
use crate::traits::CodeCommitApi;
use crate::types::{
    Comment, CreateMergeCommit, Difference, MergeConflictQuery, PostComment,
    PullRequestRecord, PullRequestTarget, ThreeWayMerge,
};

/// [`CodeCommitClient`] talking to AWS.
pub type AwsCodeCommitClient = CodeCommitClient<Client>;

/// Build an SDK client from the shared AWS configuration chain.
///
/// `region` and `endpoint_url` from the config override what the chain
/// resolves; blank values are ignored.
pub async fn connect(config: &CodeCommitConfig) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = non_blank(config.region.as_deref()) {
        debug!(region, "using configured region");
        loader = loader.region(Region::new(region.to_string()));
    }
    if let Some(endpoint) = non_blank(config.endpoint_url.as_deref()) {
        debug!(endpoint, "using custom endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

const fn approval_state(state: ApprovalState) -> sdk::ApprovalState {
    match state {
        ApprovalState::Approve => sdk::ApprovalState::Approve,
        ApprovalState::Revoke => sdk::ApprovalState::Revoke,
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

impl From<&sdk::Difference> for Difference {
    fn from(difference: &sdk::Difference) -> Self {
        Self {
            before_path: owned(difference.before_blob().and_then(|b| b.path())),
            after_path: owned(difference.after_blob().and_then(|b| b.path())),
        }
    }
}

impl From<&sdk::PullRequestTarget> for PullRequestTarget {
    fn from(target: &sdk::PullRequestTarget) -> Self {
        Self {
            source_commit: owned(target.source_commit()),
            merge_base: owned(target.merge_base()),
        }
    }
}

impl From<&sdk::PullRequest> for PullRequestRecord {
    fn from(pull: &sdk::PullRequest) -> Self {
        Self {
            revision_id: owned(pull.revision_id()),
            targets: pull
                .pull_request_targets()
                .iter()
                .map(PullRequestTarget::from)
                .collect(),
        }
    }
}

impl From<&sdk::Comment> for Comment {
    fn from(comment: &sdk::Comment) -> Self {
        Self {
            comment_id: owned(comment.comment_id()),
            author_arn: owned(comment.author_arn()),
            content: owned(comment.content()),
        }
    }
}

impl CodeCommitApi for Client {
    async fn create_unreferenced_merge_commit(
        &self,
        request: CreateMergeCommit,
    ) -> Result<Option<String>> {
        let output = self
            .create_unreferenced_merge_commit()
            .repository_name(request.repository_name)
            .source_commit_specifier(request.source_commit_specifier)
            .destination_commit_specifier(request.destination_commit_specifier)
            .merge_option(sdk::MergeOptionTypeEnum::ThreeWayMerge)
            .send()
            .await
            .map_err(|e| Error::remote("CreateUnreferencedMergeCommit", DisplayErrorContext(e)))?;

        Ok(owned(output.commit_id()))
    }

    async fn get_differences(
        &self,
        repository_name: &str,
        after_commit_specifier: &str,
        next_token: Option<String>,
    ) -> Result<Page<Difference>> {
        let output = self
            .get_differences()
            .repository_name(repository_name)
            .after_commit_specifier(after_commit_specifier)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| Error::remote("GetDifferences", DisplayErrorContext(e)))?;

        Ok(Page {
            items: output.differences().iter().map(Difference::from).collect(),
            next_token: owned(output.next_token()),
        })
    }

    async fn get_pull_request(&self, pull_request_id: &str) -> Result<PullRequestRecord> {
        let output = self
            .get_pull_request()
            .pull_request_id(pull_request_id)
            .send()
            .await
            .map_err(|e| Error::remote("GetPullRequest", DisplayErrorContext(e)))?;

        output
            .pull_request()
            .map(PullRequestRecord::from)
            .ok_or_else(|| Error::malformed("GetPullRequest", "response has no pull request"))
    }

    async fn evaluate_pull_request_approval_rules(
        &self,
        pull_request_id: &str,
        revision_id: &str,
    ) -> Result<bool> {
        let output = self
            .evaluate_pull_request_approval_rules()
            .pull_request_id(pull_request_id)
            .revision_id(revision_id)
            .send()
            .await
            .map_err(|e| Error::remote("EvaluatePullRequestApprovalRules", DisplayErrorContext(e)))?;

        output
            .evaluation()
            .map(sdk::Evaluation::approved)
            .ok_or_else(|| {
                Error::malformed("EvaluatePullRequestApprovalRules", "response has no evaluation")
            })
    }

    async fn update_pull_request_approval_state(
        &self,
        pull_request_id: &str,
        revision_id: &str,
        state: ApprovalState,
    ) -> Result<()> {
        self.update_pull_request_approval_state()
            .pull_request_id(pull_request_id)
            .revision_id(revision_id)
            .approval_state(approval_state(state))
            .send()
            .await
            .map_err(|e| Error::remote("UpdatePullRequestApprovalState", DisplayErrorContext(e)))?;
        Ok(())
    }

    async fn get_merge_conflicts(&self, query: MergeConflictQuery) -> Result<bool> {
        let output = self
            .get_merge_conflicts()
            .repository_name(query.repository_name)
            .destination_commit_specifier(query.destination_commit_specifier)
            .source_commit_specifier(query.source_commit_specifier)
            .merge_option(sdk::MergeOptionTypeEnum::ThreeWayMerge)
            .conflict_detail_level(sdk::ConflictDetailLevelTypeEnum::LineLevel)
            .send()
            .await
            .map_err(|e| Error::remote("GetMergeConflicts", DisplayErrorContext(e)))?;

        Ok(output.mergeable())
    }

    async fn merge_pull_request_by_three_way(&self, merge: ThreeWayMerge) -> Result<()> {
        self.merge_pull_request_by_three_way()
            .repository_name(merge.repository_name)
            .pull_request_id(merge.pull_request_id)
            .commit_message(merge.commit_message)
            .conflict_detail_level(sdk::ConflictDetailLevelTypeEnum::LineLevel)
            .send()
            .await
            .map_err(|e| Error::remote("MergePullRequestByThreeWay", DisplayErrorContext(e)))?;
        Ok(())
    }

    async fn post_comment_for_pull_request(&self, comment: PostComment) -> Result<()> {
        self.post_comment_for_pull_request()
            .repository_name(comment.repository_name)
            .pull_request_id(comment.pull_request_id)
            .before_commit_id(comment.before_commit_id)
            .after_commit_id(comment.after_commit_id)
            .content(comment.content)
            .send()
            .await
            .map_err(|e| Error::remote("PostCommentForPullRequest", DisplayErrorContext(e)))?;
        Ok(())
    }

    async fn get_comments_for_pull_request(
        &self,
        pull_request_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Comment>> {
        let output = self
            .get_comments_for_pull_request()
            .pull_request_id(pull_request_id)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| Error::remote("GetCommentsForPullRequest", DisplayErrorContext(e)))?;

        Ok(Page {
            items: output
                .comments_for_pull_request_data()
                .iter()
                .flat_map(sdk::CommentsForPullRequest::comments)
                .map(Comment::from)
                .collect(),
            next_token: owned(output.next_token()),
        })
    }

    async fn delete_comment_content(&self, comment_id: &str) -> Result<()> {
        self.delete_comment_content()
            .comment_id(comment_id)
            .send()
            .await
            .map_err(|e| Error::remote("DeleteCommentContent", DisplayErrorContext(e)))?;
        Ok(())
    }
}
