//! Entry points for reading and writing files on a repository branch.
use log::*;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    sync::RwLock,
};

use crate::{
    contents::{
        config::ClientConfig,
        request::{FileOperation, RequestBuilder},
        response,
        transport::{HttpExchange, ReqwestTransport, Transport},
        types::{RemoteFile, WriteReceipt},
    },
    error::{ContentsError, Result},
};

/// Client for the file-content API of one repository.
///
/// The default branch can be changed at any time with
/// [`ContentsClient::set_branch`]. Each call reads the branch once when it
/// starts, so a change never affects a call already in flight. Use
/// [`ContentsClient::on_branch`] to target another branch for a single call
/// without touching the default.
pub struct ContentsClient {
    builder: RequestBuilder,
    branch: RwLock<String>,
    transport: Box<dyn Transport>,
}

impl ContentsClient {
    /// Create a client that talks HTTP through reqwest.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.token)?;
        Self::with_transport(config, Box::new(transport))
    }

    /// Create a client over any [`Transport`].
    pub fn with_transport(
        config: ClientConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            builder: RequestBuilder::new(&config),
            branch: RwLock::new(config.branch),
            transport,
        })
    }

    /// Current default branch.
    pub async fn branch(&self) -> String {
        self.branch.read().await.clone()
    }

    /// Replace the default branch for all subsequent calls.
    pub async fn set_branch(&self, branch: impl Into<String>) -> Result<()> {
        let branch = branch.into();

        if branch.is_empty() {
            return Err(ContentsError::invalid_config(
                "branch must not be empty",
            ));
        }

        debug!("switching default branch to {branch}");
        *self.branch.write().await = branch;

        Ok(())
    }

    /// Handle bound to an explicit branch.
    pub fn on_branch(&self, branch: impl Into<String>) -> BranchHandle<'_> {
        BranchHandle {
            client: self,
            branch: branch.into(),
        }
    }

    /// Handle bound to the default branch as it is right now.
    pub async fn current(&self) -> BranchHandle<'_> {
        let branch = self.branch().await;
        self.on_branch(branch)
    }

    pub async fn get_file(&self, path: &str) -> Result<RemoteFile> {
        self.current().await.get_file(path).await
    }

    pub async fn get_file_content(&self, path: &str) -> Result<String> {
        self.current().await.get_file_content(path).await
    }

    pub async fn get_file_sha(&self, path: &str) -> Result<String> {
        self.current().await.get_file_sha(path).await
    }

    pub async fn create_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<String> {
        self.current()
            .await
            .create_file(path, content, message)
            .await
    }

    pub async fn update_file(
        &self,
        path: &str,
        content: &str,
        sha: &str,
        message: &str,
    ) -> Result<String> {
        self.current()
            .await
            .update_file(path, content, sha, message)
            .await
    }

    pub async fn upload_file(
        &self,
        path: &str,
        bytes: Vec<u8>,
        message: &str,
    ) -> Result<String> {
        self.current()
            .await
            .upload_file(path, bytes, message)
            .await
    }

    pub async fn upload_reader<R>(
        &self,
        path: &str,
        reader: R,
        message: &str,
    ) -> Result<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.current()
            .await
            .upload_reader(path, reader, message)
            .await
    }

    pub async fn delete_file(
        &self,
        path: &str,
        sha: &str,
        message: &str,
    ) -> Result<String> {
        self.current().await.delete_file(path, sha, message).await
    }

    pub async fn write(&self, op: FileOperation) -> Result<WriteReceipt> {
        self.current().await.write(op).await
    }

    pub async fn read_back(&self, receipt: &WriteReceipt) -> Result<String> {
        self.on_branch(receipt.branch.clone())
            .get_file_content(&receipt.path)
            .await
    }

    async fn send(
        &self,
        op: &FileOperation,
        branch: &str,
    ) -> Result<HttpExchange> {
        let request = self.builder.build(op, branch)?;
        let response = self.transport.execute(request.clone()).await?;
        Ok(HttpExchange { request, response })
    }
}

/// Operations pinned to one branch.
pub struct BranchHandle<'a> {
    client: &'a ContentsClient,
    branch: String,
}

impl BranchHandle<'_> {
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Full remote reference for a file, including its encoded content.
    pub async fn get_file(&self, path: &str) -> Result<RemoteFile> {
        let exchange = self.read(path).await?;
        response::remote_file(&exchange)
    }

    /// Decoded text of a file.
    pub async fn get_file_content(&self, path: &str) -> Result<String> {
        let exchange = self.read(path).await?;
        response::file_content(&exchange)
    }

    /// Current version token of a file, for use in update or delete.
    pub async fn get_file_sha(&self, path: &str) -> Result<String> {
        let exchange = self.read(path).await?;
        response::version_token(&exchange)
    }

    /// Create a text file, then return its content as re-read from the
    /// branch.
    pub async fn create_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<String> {
        let receipt = self
            .write(FileOperation::Create {
                path: path.to_string(),
                content: content.to_string(),
                message: message.to_string(),
            })
            .await?;

        self.read_back(&receipt).await
    }

    /// Replace a text file, then return its content as re-read from the
    /// branch. Fails with a remote error if `sha` is stale.
    pub async fn update_file(
        &self,
        path: &str,
        content: &str,
        sha: &str,
        message: &str,
    ) -> Result<String> {
        let receipt = self
            .write(FileOperation::Update {
                path: path.to_string(),
                content: content.to_string(),
                sha: sha.to_string(),
                message: message.to_string(),
            })
            .await?;

        self.read_back(&receipt).await
    }

    /// Upload arbitrary bytes and return the direct download URL.
    pub async fn upload_file(
        &self,
        path: &str,
        bytes: Vec<u8>,
        message: &str,
    ) -> Result<String> {
        let receipt = self
            .write(FileOperation::Upload {
                path: path.to_string(),
                bytes,
                message: message.to_string(),
            })
            .await?;

        Ok(receipt.download_url)
    }

    /// Drain `reader` and upload what it produced.
    pub async fn upload_reader<R>(
        &self,
        path: &str,
        mut reader: R,
        message: &str,
    ) -> Result<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).await?;
        debug!("read {} bytes for upload to {path}", bytes.len());
        self.upload_file(path, bytes, message).await
    }

    /// Delete a file and return the service's confirmation as raw text.
    pub async fn delete_file(
        &self,
        path: &str,
        sha: &str,
        message: &str,
    ) -> Result<String> {
        let op = FileOperation::Delete {
            path: path.to_string(),
            sha: sha.to_string(),
            message: message.to_string(),
        };

        info!("deleting {path} on branch {}", self.branch);

        let exchange = self.client.send(&op, &self.branch).await?;
        response::delete_confirmation(&exchange)
            .inspect_err(|err| self.warn_on_conflict(path, err))
    }

    /// Perform a create, update or upload without reading the result back.
    pub async fn write(&self, op: FileOperation) -> Result<WriteReceipt> {
        if matches!(op, FileOperation::Read { .. } | FileOperation::Delete { .. })
        {
            return Err(ContentsError::invalid_request(format!(
                "{} is not a write operation",
                op.name()
            )));
        }

        info!("{} {} on branch {}", op.name(), op.path(), self.branch);

        let exchange = self.client.send(&op, &self.branch).await?;
        let receipt =
            response::write_receipt(&exchange, op.path(), &self.branch)
                .inspect_err(|err| self.warn_on_conflict(op.path(), err))?;

        debug!("{} now at version {}", receipt.path, receipt.sha);

        Ok(receipt)
    }

    /// Re-read the text written by [`BranchHandle::write`].
    pub async fn read_back(&self, receipt: &WriteReceipt) -> Result<String> {
        self.client.read_back(receipt).await
    }

    async fn read(&self, path: &str) -> Result<HttpExchange> {
        let op = FileOperation::Read {
            path: path.to_string(),
        };

        info!("reading {path} on branch {}", self.branch);

        self.client.send(&op, &self.branch).await
    }

    fn warn_on_conflict(&self, path: &str, err: &ContentsError) {
        if err.is_version_conflict() {
            warn!(
                "version token for {path} on branch {} is stale: re-read and retry",
                self.branch
            );
        }
    }
}
