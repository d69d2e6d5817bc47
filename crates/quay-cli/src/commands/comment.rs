//! `quay comment` and `quay hide-plans` commands.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use quay_core::VcsClient;

use super::utils;
use super::{GlobalArgs, PullArgs};
use crate::output;

/// Post a comment on the pull request.
pub fn post(
    global: &GlobalArgs,
    args: &PullArgs,
    body: Option<String>,
    file: Option<&Path>,
) -> Result<()> {
    let body = read_body(body, file)?;
    if body.trim().is_empty() {
        bail!("Comment body is empty");
    }

    let (rt, client) = utils::open(global)?;
    rt.block_on(client.create_comment(&args.repo(), args.pull, &body))
        .with_context(|| format!("Failed to comment on pull request #{}", args.pull))?;

    output::success(&format!(
        "Commented on {}",
        output::pull_ref(&args.repo, args.pull)
    ));
    Ok(())
}

/// Hide plan comments Quay posted earlier.
pub fn hide_plans(global: &GlobalArgs, args: &PullArgs) -> Result<()> {
    let config = utils::load_config(global)?;
    config.codecommit.require_user_arn()?;

    let (rt, client) = utils::connect(&config)?;
    rt.block_on(client.hide_prev_plan_comments(&args.repo(), args.pull))
        .with_context(|| format!("Failed to hide plan comments on pull request #{}", args.pull))?;

    output::success(&format!(
        "Hid previous plans on {}",
        output::pull_ref(&args.repo, args.pull)
    ));
    Ok(())
}

fn read_body(body: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(body) = body {
        return Ok(body);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut body = String::new();
    io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read comment from stdin")?;
    Ok(body)
}
