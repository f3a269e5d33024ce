//! Configuration for connecting to a repository's content API.
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ContentsError, Result};

/// Default API host for the public service.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Branch used when none is configured.
pub const DEFAULT_BRANCH: &str = "main";
/// Content-negotiation value identifying the API version we speak.
pub const ACCEPT_HEADER_VALUE: &str = "application/vnd.github+json";
/// User agent sent with every request.
pub const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a single repository.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.github.com").
    pub api_url: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Initial default branch. The client can change it after construction.
    pub branch: String,
}

impl ClientConfig {
    /// Settings for the public API host on the default branch.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: SecretString::from(token.into()),
            owner: owner.into(),
            repo: repo.into(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Reject settings that could never produce a valid request.
    pub fn validate(&self) -> Result<()> {
        if self.token.expose_secret().is_empty() {
            return Err(ContentsError::invalid_config(
                "access token must not be empty",
            ));
        }

        if self.owner.is_empty() {
            return Err(ContentsError::invalid_config(
                "owner must not be empty",
            ));
        }

        if self.repo.is_empty() {
            return Err(ContentsError::invalid_config(
                "repository must not be empty",
            ));
        }

        if self.branch.is_empty() {
            return Err(ContentsError::invalid_config(
                "branch must not be empty",
            ));
        }

        Url::parse(&self.api_url)?;

        Ok(())
    }
}
