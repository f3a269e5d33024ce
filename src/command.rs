//! Executes CLI subcommands against the configured repository.
use color_eyre::eyre::WrapErr;
use log::*;
use repo_contents::{BranchHandle, ContentsClient, FileOperation, WriteReceipt};

use crate::{
    cli::{Args, Command},
    config::load_config,
    result::Result,
};

/// Run the subcommand in `args`.
pub async fn execute(args: Args) -> Result<()> {
    let file_config = load_config(&args.config)?;
    let config = args.client_config(file_config)?;

    info!(
        "using repository {}/{} on branch {}",
        config.owner, config.repo, config.branch
    );

    let client = ContentsClient::new(config)?;
    // pin the branch so fetched tokens and writes hit the same branch
    let handle = client.current().await;

    let output = run(&handle, args.command).await?;
    println!("{output}");

    Ok(())
}

async fn run(handle: &BranchHandle<'_>, command: Command) -> Result<String> {
    match command {
        Command::Get { path } => handle
            .get_file_content(&path)
            .await
            .wrap_err_with(|| format!("failed to read {path}")),

        Command::Sha { path } => handle
            .get_file_sha(&path)
            .await
            .wrap_err_with(|| format!("failed to get version of {path}")),

        Command::Create {
            path,
            source,
            message,
            no_read_back,
        } => {
            let content = source.read().await?;

            if no_read_back {
                let receipt = handle
                    .write(FileOperation::Create {
                        path: path.clone(),
                        content,
                        message,
                    })
                    .await
                    .wrap_err_with(|| format!("failed to create {path}"))?;
                return Ok(format_receipt(&receipt));
            }

            handle
                .create_file(&path, &content, &message)
                .await
                .wrap_err_with(|| format!("failed to create {path}"))
        }

        Command::Update {
            path,
            source,
            sha,
            message,
            no_read_back,
        } => {
            let content = source.read().await?;
            let sha = resolve_sha(handle, &path, sha).await?;

            if no_read_back {
                let receipt = handle
                    .write(FileOperation::Update {
                        path: path.clone(),
                        content,
                        sha,
                        message,
                    })
                    .await
                    .wrap_err_with(|| format!("failed to update {path}"))?;
                return Ok(format_receipt(&receipt));
            }

            handle
                .update_file(&path, &content, &sha, &message)
                .await
                .wrap_err_with(|| format!("failed to update {path}"))
        }

        Command::Delete { path, sha, message } => {
            let sha = resolve_sha(handle, &path, sha).await?;

            handle
                .delete_file(&path, &sha, &message)
                .await
                .wrap_err_with(|| format!("failed to delete {path}"))
        }

        Command::Upload {
            path,
            file,
            message,
        } => {
            let reader = tokio::fs::File::open(&file)
                .await
                .wrap_err_with(|| format!("failed to open {}", file.display()))?;

            handle
                .upload_reader(&path, reader, &message)
                .await
                .wrap_err_with(|| format!("failed to upload {path}"))
        }
    }
}

async fn resolve_sha(
    handle: &BranchHandle<'_>,
    path: &str,
    sha: Option<String>,
) -> Result<String> {
    if let Some(sha) = sha {
        return Ok(sha);
    }

    info!("no version token supplied: fetching current token for {path}");

    handle
        .get_file_sha(path)
        .await
        .wrap_err_with(|| format!("failed to get version of {path}"))
}

fn format_receipt(receipt: &WriteReceipt) -> String {
    let mut lines = vec![
        format!("path: {}", receipt.path),
        format!("branch: {}", receipt.branch),
        format!("sha: {}", receipt.sha),
        format!("download_url: {}", receipt.download_url),
    ];

    if let Some(commit_sha) = &receipt.commit_sha {
        lines.push(format!("commit: {commit_sha}"));
    }

    lines.join("\n")
}
