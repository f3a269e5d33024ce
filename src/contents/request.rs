//! Maps file operations onto HTTP requests against the contents endpoint.
use base64::{Engine, prelude::BASE64_STANDARD};
use reqwest::Method;
use url::Url;

use crate::{
    contents::{
        config::ClientConfig,
        types::{DeleteContentsBody, PutContentsBody},
    },
    error::{ContentsError, Result},
};

/// A single-file operation and the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Fetch a file. Also used to look up its version token.
    Read { path: String },
    /// Create a new text file.
    Create {
        path: String,
        content: String,
        message: String,
    },
    /// Replace an existing text file. `sha` must be the current token.
    Update {
        path: String,
        content: String,
        sha: String,
        message: String,
    },
    /// Create a file from arbitrary bytes.
    Upload {
        path: String,
        bytes: Vec<u8>,
        message: String,
    },
    /// Remove a file. `sha` must be the current token.
    Delete {
        path: String,
        sha: String,
        message: String,
    },
}

impl FileOperation {
    pub fn path(&self) -> &str {
        match self {
            Self::Read { path }
            | Self::Create { path, .. }
            | Self::Update { path, .. }
            | Self::Upload { path, .. }
            | Self::Delete { path, .. } => path,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Upload { .. } => "upload",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Request half of an HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// UTF-8 JSON text. Never present on reads.
    pub body: Option<String>,
}

/// Builds requests for one repository.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    repo_base: String,
}

impl RequestBuilder {
    pub fn new(config: &ClientConfig) -> Self {
        let repo_base = format!(
            "{}/repos/{}/{}",
            config.api_url.trim_end_matches('/'),
            config.owner,
            config.repo
        );

        Self { repo_base }
    }

    /// Build the request for `op`, targeting `branch`.
    pub fn build(&self, op: &FileOperation, branch: &str) -> Result<HttpRequest> {
        let url = self.contents_url(op.path())?;

        let request = match op {
            FileOperation::Read { .. } => {
                let mut url = url;
                url.query_pairs_mut().append_pair("ref", branch);
                HttpRequest {
                    method: Method::GET,
                    url,
                    body: None,
                }
            }
            FileOperation::Create {
                content, message, ..
            } => HttpRequest {
                method: Method::PUT,
                url,
                body: Some(serde_json::to_string(&PutContentsBody {
                    message,
                    content: BASE64_STANDARD.encode(content.as_bytes()),
                    branch,
                    sha: None,
                })?),
            },
            FileOperation::Update {
                content,
                sha,
                message,
                ..
            } => HttpRequest {
                method: Method::PUT,
                url,
                body: Some(serde_json::to_string(&PutContentsBody {
                    message,
                    content: BASE64_STANDARD.encode(content.as_bytes()),
                    branch,
                    sha: Some(sha.as_str()),
                })?),
            },
            FileOperation::Upload { bytes, message, .. } => HttpRequest {
                method: Method::PUT,
                url,
                body: Some(serde_json::to_string(&PutContentsBody {
                    message,
                    content: BASE64_STANDARD.encode(bytes),
                    branch,
                    sha: None,
                })?),
            },
            FileOperation::Delete { sha, message, .. } => HttpRequest {
                method: Method::DELETE,
                url,
                body: Some(serde_json::to_string(&DeleteContentsBody {
                    message,
                    sha,
                    branch,
                })?),
            },
        };

        Ok(request)
    }

    // Path is embedded as given; callers pre-encode anything that needs it.
    fn contents_url(&self, path: &str) -> Result<Url> {
        let path = path.strip_prefix("./").unwrap_or(path);
        let path = path.trim_start_matches('/');

        if path.is_empty() {
            return Err(ContentsError::invalid_request(
                "file path must not be empty",
            ));
        }

        // url parsing would collapse these and target another file
        if path.split('/').any(is_dot_segment) {
            return Err(ContentsError::invalid_request(format!(
                "file path must not contain . or .. segments: {path}"
            )));
        }

        Ok(Url::parse(&format!("{}/contents/{path}", self.repo_base))?)
    }
}

fn is_dot_segment(segment: &str) -> bool {
    let segment = segment.to_ascii_lowercase().replace("%2e", ".");
    segment == "." || segment == ".."
}
