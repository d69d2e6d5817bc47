//! Scripted CodeCommit implementation for testing.
//!
//! `FakeCodeCommit` answers from canned data and records every call so
//! tests can assert on what the client sent.

use std::collections::HashMap;
use std::sync::Mutex;

use quay_core::{ApprovalState, Error, Result};

use crate::pagination::Page;
use crate::traits::CodeCommitApi;
use crate::types::{
    Comment, CreateMergeCommit, Difference, MergeConflictQuery, PostComment, PullRequestRecord,
    PullRequestTarget, ThreeWayMerge,
};

/// Scripted implementation of `CodeCommitApi`.
#[derive(Default)]
pub struct FakeCodeCommit {
    pub pull_request: Option<PullRequestRecord>,
    pub approved: bool,
    pub mergeable: HashMap<String, bool>,
    pub merge_commit_id: Option<String>,
    pub difference_pages: Vec<Vec<Difference>>,
    pub comment_pages: Vec<Vec<Comment>>,
    pub fail_post_number: Option<usize>,
    pub fail_delete_id: Option<String>,
    pub fail_merge: bool,

    pub calls: Mutex<Vec<&'static str>>,
    pub merge_commit_requests: Mutex<Vec<CreateMergeCommit>>,
    pub difference_tokens: Mutex<Vec<Option<String>>>,
    pub comment_tokens: Mutex<Vec<Option<String>>>,
    pub posted: Mutex<Vec<PostComment>>,
    pub deleted: Mutex<Vec<String>>,
    pub approval_updates: Mutex<Vec<(String, String, ApprovalState)>>,
    pub evaluations: Mutex<Vec<(String, String)>>,
    pub conflict_queries: Mutex<Vec<MergeConflictQuery>>,
    pub merges: Mutex<Vec<ThreeWayMerge>>,
}

#[allow(clippy::unwrap_used)]
impl FakeCodeCommit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull request with a revision id and a single target.
    pub fn with_pull_request(mut self, revision_id: &str, merge_base: &str, source: &str) -> Self {
        self.pull_request = Some(PullRequestRecord {
            revision_id: Some(revision_id.into()),
            targets: vec![PullRequestTarget {
                merge_base: Some(merge_base.into()),
                source_commit: Some(source.into()),
            }],
        });
        self
    }

    pub fn with_record(mut self, record: PullRequestRecord) -> Self {
        self.pull_request = Some(record);
        self
    }

    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    pub fn with_mergeable(mut self, source: &str, mergeable: bool) -> Self {
        self.mergeable.insert(source.to_string(), mergeable);
        self
    }

    pub fn with_merge_commit(mut self, commit_id: &str) -> Self {
        self.merge_commit_id = Some(commit_id.to_string());
        self
    }

    pub fn with_difference_page(mut self, page: Vec<Difference>) -> Self {
        self.difference_pages.push(page);
        self
    }

    pub fn with_comment_page(mut self, page: Vec<Comment>) -> Self {
        self.comment_pages.push(page);
        self
    }

    /// Fail the `n`th comment post (1-based).
    pub fn with_post_failure(mut self, n: usize) -> Self {
        self.fail_post_number = Some(n);
        self
    }

    pub fn with_delete_failure(mut self, comment_id: &str) -> Self {
        self.fail_delete_id = Some(comment_id.to_string());
        self
    }

    pub fn with_merge_failure(mut self) -> Self {
        self.fail_merge = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<PostComment> {
        self.posted.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn page<T: Clone>(
        operation: &'static str,
        pages: &[Vec<T>],
        next_token: Option<&str>,
    ) -> Result<Page<T>> {
        let index = match next_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| Error::remote(operation, format!("invalid token {token}")))?,
        };

        let items = pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));
        Ok(Page { items, next_token })
    }
}

#[allow(clippy::unwrap_used)]
impl CodeCommitApi for FakeCodeCommit {
    async fn create_unreferenced_merge_commit(
        &self,
        request: CreateMergeCommit,
    ) -> Result<Option<String>> {
        self.record("CreateUnreferencedMergeCommit");
        self.merge_commit_requests.lock().unwrap().push(request);
        Ok(self.merge_commit_id.clone())
    }

    async fn get_differences(
        &self,
        _repository_name: &str,
        _after_commit_specifier: &str,
        next_token: Option<String>,
    ) -> Result<Page<Difference>> {
        self.record("GetDifferences");
        self.difference_tokens
            .lock()
            .unwrap()
            .push(next_token.clone());
        Self::page(
            "GetDifferences",
            &self.difference_pages,
            next_token.as_deref(),
        )
    }

    async fn get_pull_request(&self, pull_request_id: &str) -> Result<PullRequestRecord> {
        self.record("GetPullRequest");
        self.pull_request.clone().ok_or_else(|| {
            Error::remote(
                "GetPullRequest",
                format!("pull request {pull_request_id} does not exist"),
            )
        })
    }

    async fn evaluate_pull_request_approval_rules(
        &self,
        pull_request_id: &str,
        revision_id: &str,
    ) -> Result<bool> {
        self.record("EvaluatePullRequestApprovalRules");
        self.evaluations
            .lock()
            .unwrap()
            .push((pull_request_id.to_string(), revision_id.to_string()));
        Ok(self.approved)
    }

    async fn update_pull_request_approval_state(
        &self,
        pull_request_id: &str,
        revision_id: &str,
        state: ApprovalState,
    ) -> Result<()> {
        self.record("UpdatePullRequestApprovalState");
        self.approval_updates.lock().unwrap().push((
            pull_request_id.to_string(),
            revision_id.to_string(),
            state,
        ));
        Ok(())
    }

    async fn get_merge_conflicts(&self, query: MergeConflictQuery) -> Result<bool> {
        self.record("GetMergeConflicts");
        let verdict = self.mergeable.get(&query.source_commit_specifier).copied();
        self.conflict_queries.lock().unwrap().push(query);
        verdict.ok_or_else(|| Error::remote("GetMergeConflicts", "Unknown branch"))
    }

    async fn merge_pull_request_by_three_way(&self, merge: ThreeWayMerge) -> Result<()> {
        self.record("MergePullRequestByThreeWay");
        self.merges.lock().unwrap().push(merge);
        if self.fail_merge {
            return Err(Error::remote(
                "MergePullRequestByThreeWay",
                "ManualMergeRequiredException",
            ));
        }
        Ok(())
    }

    async fn post_comment_for_pull_request(&self, comment: PostComment) -> Result<()> {
        self.record("PostCommentForPullRequest");
        let mut posted = self.posted.lock().unwrap();
        if self.fail_post_number == Some(posted.len() + 1) {
            return Err(Error::remote(
                "PostCommentForPullRequest",
                "CommentContentSizeLimitExceededException",
            ));
        }
        posted.push(comment);
        Ok(())
    }

    async fn get_comments_for_pull_request(
        &self,
        _pull_request_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<Comment>> {
        self.record("GetCommentsForPullRequest");
        self.comment_tokens.lock().unwrap().push(next_token.clone());
        Self::page(
            "GetCommentsForPullRequest",
            &self.comment_pages,
            next_token.as_deref(),
        )
    }

    async fn delete_comment_content(&self, comment_id: &str) -> Result<()> {
        self.record("DeleteCommentContent");
        if self.fail_delete_id.as_deref() == Some(comment_id) {
            return Err(Error::remote(
                "DeleteCommentContent",
                "CommentDoesNotExistException",
            ));
        }
        self.deleted.lock().unwrap().push(comment_id.to_string());
        Ok(())
    }
}
