//! Configuration management for Quay.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Quay configuration loaded from `quay.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// CodeCommit-specific settings.
    #[serde(default)]
    pub codecommit: CodeCommitConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| std::io::Error::other(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// CodeCommit-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCommitConfig {
    /// ARN of the IAM identity Quay posts comments as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_arn: Option<String>,

    /// AWS region of the repositories. Falls back to the SDK's region chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom service endpoint (VPC endpoints, local emulators).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl CodeCommitConfig {
    /// The configured user ARN.
    ///
    /// # Errors
    /// Returns [`Error::MissingUserArn`] if none is set.
    pub fn require_user_arn(&self) -> Result<&str> {
        self.user_arn
            .as_deref()
            .filter(|arn| !arn.trim().is_empty())
            .ok_or(Error::MissingUserArn)
    }
}
