use serde::{Deserialize, Serialize};

/// The remote service's view of a single file.
///
/// Only the field an operation consumes is checked, so `path` and `sha`
/// default to empty when the service leaves them out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteFile {
    #[serde(default)]
    pub path: String,
    /// Version token: the blob hash of the file's current content.
    #[serde(default)]
    pub sha: String,
    pub download_url: Option<String>,
    /// Base64 content. Only present on reads.
    pub content: Option<String>,
    pub encoding: Option<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// Body returned by a successful create, update or upload.
#[derive(Debug, Deserialize)]
pub struct WriteResponse {
    pub content: RemoteFile,
    pub commit: Option<CommitRef>,
}

/// What a write left behind on the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub path: String,
    /// New version token for the written file.
    pub sha: String,
    pub download_url: String,
    pub commit_sha: Option<String>,
    /// Branch the write landed on.
    pub branch: String,
}

#[derive(Debug, Serialize)]
pub struct PutContentsBody<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct DeleteContentsBody<'a> {
    pub message: &'a str,
    pub sha: &'a str,
    pub branch: &'a str,
}
