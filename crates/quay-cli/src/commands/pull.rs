//! Read-only pull request queries and merging.

use anyhow::{Context, Result};
use quay_codecommit::pull_link;
use quay_core::VcsClient;
use serde::Serialize;

use super::utils;
use super::{BranchArgs, GlobalArgs, PullArgs};
use crate::output;

#[derive(Serialize)]
struct FilesOutput<'a> {
    files: &'a [String],
}

#[derive(Serialize)]
struct ApprovedOutput {
    approved: bool,
}

#[derive(Serialize)]
struct MergeableOutput {
    mergeable: bool,
}

#[derive(Serialize)]
struct LinkOutput {
    link: String,
}

/// `quay files` - list the files the pull request modifies.
pub fn files(global: &GlobalArgs, args: &PullArgs, branches: &BranchArgs) -> Result<()> {
    let (rt, client) = utils::open(global)?;
    let pull = args.pull_request(Some(branches));

    let files = rt
        .block_on(client.modified_files(&args.repo(), &pull))
        .with_context(|| format!("Failed to list files of pull request #{}", args.pull))?;

    if global.json {
        return output::json(&FilesOutput { files: &files });
    }

    if files.is_empty() {
        output::info("No files modified");
    }
    for file in &files {
        output::essential(file);
    }
    Ok(())
}

/// `quay approved` - check the approval rules.
pub fn approved(global: &GlobalArgs, args: &PullArgs) -> Result<()> {
    let (rt, client) = utils::open(global)?;
    let pull = args.pull_request(None);

    let approved = rt
        .block_on(client.pull_is_approved(&args.repo(), &pull))
        .with_context(|| format!("Failed to check approval of pull request #{}", args.pull))?;

    if global.json {
        return output::json(&ApprovedOutput { approved });
    }

    let pull_ref = output::pull_ref(&args.repo, args.pull);
    if approved {
        output::success(&format!("{pull_ref} is approved"));
    } else {
        output::warn(&format!("{pull_ref} is not approved"));
    }
    Ok(())
}

/// `quay mergeable` - check for merge conflicts.
pub fn mergeable(global: &GlobalArgs, args: &PullArgs, branches: &BranchArgs) -> Result<()> {
    let (rt, client) = utils::open(global)?;
    let pull = args.pull_request(Some(branches));

    let mergeable = rt
        .block_on(client.pull_is_mergeable(&args.repo(), &pull))
        .with_context(|| format!("Failed to check mergeability of pull request #{}", args.pull))?;

    if global.json {
        return output::json(&MergeableOutput { mergeable });
    }

    let pull_ref = output::pull_ref(&args.repo, args.pull);
    if mergeable {
        output::success(&format!("{pull_ref} merges cleanly"));
    } else {
        output::warn(&format!("{pull_ref} has merge conflicts"));
    }
    Ok(())
}

/// `quay merge` - merge with a merge commit.
pub fn merge(global: &GlobalArgs, args: &PullArgs) -> Result<()> {
    let (rt, client) = utils::open(global)?;
    let pull = args.pull_request(None);

    output::info(&format!(
        "Merging {}...",
        output::pull_ref(&args.repo, args.pull)
    ));
    rt.block_on(client.merge_pull(&pull))
        .with_context(|| format!("Failed to merge pull request #{}", args.pull))?;

    output::success("Merged");
    Ok(())
}

/// `quay link` - print the console link. Needs no credentials.
#[allow(clippy::unnecessary_wraps)]
pub fn link(global: &GlobalArgs, args: &PullArgs) -> Result<()> {
    let link = pull_link(&args.pull_request(None));

    if global.json {
        return output::json(&LinkOutput { link });
    }

    output::essential(&link);
    Ok(())
}
