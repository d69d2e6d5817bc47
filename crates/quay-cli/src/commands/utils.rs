use anyhow::{Context, Result};
use quay_codecommit::{AwsCodeCommitClient, CodeCommitClient};
use quay_core::Config;
use tokio::runtime::Runtime;
use tracing::debug;

use super::GlobalArgs;

/// Load the config file and apply command-line overrides.
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = Config::load(&global.config)
        .with_context(|| format!("Failed to load config from {}", global.config.display()))?;

    if let Some(region) = &global.region {
        config.codecommit.region = Some(region.clone());
    }
    if let Some(user_arn) = &global.user_arn {
        config.codecommit.user_arn = Some(user_arn.clone());
    }

    debug!(
        path = %global.config.display(),
        region = ?config.codecommit.region,
        endpoint_url = ?config.codecommit.endpoint_url,
        user_arn = ?config.codecommit.user_arn,
        "loaded configuration"
    );
    Ok(config)
}

/// Helper to create the runtime and a CodeCommit client.
pub fn connect(config: &Config) -> Result<(Runtime, AwsCodeCommitClient)> {
    let rt = Runtime::new().context("Failed to start async runtime")?;
    let api = rt.block_on(quay_codecommit::connect(&config.codecommit));

    debug!(
        region = ?api.config().region(),
        "connected to CodeCommit"
    );

    let mut client = CodeCommitClient::new(api);
    if let Ok(user_arn) = config.codecommit.require_user_arn() {
        client = client.with_user_arn(user_arn);
    }

    Ok((rt, client))
}

/// Load the config and connect in one step.
pub fn open(global: &GlobalArgs) -> Result<(Runtime, AwsCodeCommitClient)> {
    connect(&load_config(global)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn global(config: PathBuf) -> GlobalArgs {
        GlobalArgs {
            config,
            region: None,
            user_arn: None,
            json: false,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("quay.toml");
        std::fs::write(
            &path,
            "[codecommit]\nuser_arn = \"arn:aws:iam::1:user/file\"\nregion = \"eu-west-1\"\n",
        )
        .unwrap();

        let mut args = global(path);
        args.region = Some("us-east-2".into());

        let config = load_config(&args).unwrap();
        assert_eq!(config.codecommit.region.as_deref(), Some("us-east-2"));
        assert_eq!(
            config.codecommit.user_arn.as_deref(),
            Some("arn:aws:iam::1:user/file")
        );
    }

    #[test]
    fn test_missing_config_file_uses_flags() {
        let temp = tempfile::TempDir::new().unwrap();

        let mut args = global(temp.path().join("absent.toml"));
        args.user_arn = Some("arn:aws:iam::1:user/flag".into());

        let config = load_config(&args).unwrap();
        assert_eq!(config.codecommit.require_user_arn().unwrap(), "arn:aws:iam::1:user/flag");
        assert!(config.codecommit.region.is_none());
    }

    #[test]
    fn test_invalid_config_names_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("quay.toml");
        std::fs::write(&path, "[codecommit\n").unwrap();

        let err = load_config(&global(path)).unwrap_err();
        assert!(err.to_string().contains("quay.toml"));
    }
}
