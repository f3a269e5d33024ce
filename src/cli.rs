//! CLI argument parsing and client configuration.
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use repo_contents::ClientConfig;
use std::{env, path::PathBuf};

use crate::{
    config::{Config, DEFAULT_CONFIG_FILE},
    result::Result,
};

/// Environment variable consulted when no token flag is given.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Global CLI arguments for repository selection and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Repository owner. Overrides the config file.
    pub owner: Option<String>,

    #[arg(long, global = true)]
    /// Repository name. Overrides the config file.
    pub repo: Option<String>,

    #[arg(long, global = true)]
    /// Branch to operate on. Defaults to "main".
    pub branch: Option<String>,

    #[arg(long, default_value = "", global = true)]
    /// Access token. Falls back to GITHUB_TOKEN env var.
    pub token: String,

    #[arg(long, global = true)]
    /// API base URL, for enterprise or self-hosted instances.
    pub api_url: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    /// Path to an optional TOML config file.
    pub config: PathBuf,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Where new file content comes from.
#[derive(clap::Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ContentSource {
    #[arg(long)]
    /// Literal text content.
    pub content: Option<String>,

    #[arg(long)]
    /// Local file whose text becomes the content.
    pub file: Option<PathBuf>,
}

impl ContentSource {
    /// Resolve the source to text.
    pub async fn read(&self) -> Result<String> {
        if let Some(content) = &self.content {
            return Ok(content.clone());
        }

        if let Some(file) = &self.file {
            return tokio::fs::read_to_string(file)
                .await
                .wrap_err_with(|| format!("failed to read {}", file.display()));
        }

        Err(eyre!("must provide --content or --file"))
    }
}

/// File operation subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the decoded text of a file.
    Get { path: String },

    /// Print the current version token (sha) of a file.
    Sha { path: String },

    /// Create a new text file.
    Create {
        path: String,
        #[command(flatten)]
        source: ContentSource,
        #[arg(short, long)]
        /// Commit message.
        message: String,
        #[arg(long, default_value_t = false)]
        /// Print the write receipt instead of re-reading the file.
        no_read_back: bool,
    },

    /// Replace the content of an existing text file.
    Update {
        path: String,
        #[command(flatten)]
        source: ContentSource,
        #[arg(long)]
        /// Version token to update from. Fetched first when omitted.
        sha: Option<String>,
        #[arg(short, long)]
        /// Commit message.
        message: String,
        #[arg(long, default_value_t = false)]
        /// Print the write receipt instead of re-reading the file.
        no_read_back: bool,
    },

    /// Delete a file.
    Delete {
        path: String,
        #[arg(long)]
        /// Version token to delete. Fetched first when omitted.
        sha: Option<String>,
        #[arg(short, long)]
        /// Commit message.
        message: String,
    },

    /// Upload a local file of any type and print its download URL.
    Upload {
        path: String,
        #[arg(long)]
        /// Local file to upload.
        file: PathBuf,
        #[arg(short, long)]
        /// Commit message.
        message: String,
    },
}

impl Args {
    /// Merge flags over file config and resolve the access token.
    pub fn client_config(&self, file: Config) -> Result<ClientConfig> {
        let mut token = self.token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var(TOKEN_ENV_VAR)
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(eyre!(
                "must set token with --token or {TOKEN_ENV_VAR}"
            ));
        }

        let owner = self
            .owner
            .clone()
            .or(file.owner)
            .ok_or(eyre!("must configure repository owner"))?;

        let repo = self
            .repo
            .clone()
            .or(file.repo)
            .ok_or(eyre!("must configure repository name"))?;

        let mut config = ClientConfig::new(token, owner, repo);

        if let Some(branch) = self.branch.clone().or(file.branch) {
            config = config.with_branch(branch);
        }

        if let Some(api_url) = self.api_url.clone().or(file.api_url) {
            config = config.with_api_url(api_url);
        }

        Ok(config)
    }
}
