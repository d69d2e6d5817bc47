//! `quay status` command - Report a commit status on a pull request.

use anyhow::{Context, Result};
use quay_core::{CommitStatus, CommitStatusUpdate, VcsClient};

use super::utils;
use super::{GlobalArgs, PullArgs};
use crate::output;

/// Run the status command.
pub fn run(
    global: &GlobalArgs,
    args: &PullArgs,
    status: CommitStatus,
    source: String,
    description: String,
    url: String,
) -> Result<()> {
    let pull_ref = output::pull_ref(&args.repo, args.pull);

    let Some(state) = status.approval_state() else {
        output::info(&format!("Status {status} leaves {pull_ref} unchanged"));
        return Ok(());
    };

    let update = CommitStatusUpdate {
        status,
        source,
        description,
        url,
    };

    let (rt, client) = utils::open(global)?;
    rt.block_on(client.update_status(&args.repo(), &args.pull_request(None), &update))
        .with_context(|| format!("Failed to update status of pull request #{}", args.pull))?;

    output::success(&format!("Set approval of {pull_ref} to {state}"));
    Ok(())
}
