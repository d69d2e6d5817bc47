//! Quay CLI - pull request automation for AWS CodeCommit.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    output::set_quiet(cli.global.quiet);
    init_tracing(cli.global.verbose);

    let global = &cli.global;
    let result = match cli.command {
        Commands::Files { pull, branches } => commands::pull::files(global, &pull, &branches),
        Commands::Comment { pull, body, file } => {
            commands::comment::post(global, &pull, body, file.as_deref())
        }
        Commands::HidePlans { pull } => commands::comment::hide_plans(global, &pull),
        Commands::Approved { pull } => commands::pull::approved(global, &pull),
        Commands::Mergeable { pull, branches } => {
            commands::pull::mergeable(global, &pull, &branches)
        }
        Commands::Status {
            pull,
            status,
            source,
            description,
            url,
        } => commands::status::run(global, &pull, status, source, description, url),
        Commands::Merge { pull } => commands::pull::merge(global, &pull),
        Commands::Link { pull } => commands::pull::link(global, &pull),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Log to stderr, honouring `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
