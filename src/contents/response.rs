//! Classifies raw responses and unpacks the value each operation returns.
//!
//! Any status of 400 or above becomes [`ContentsError::RemoteApi`] with the
//! body kept verbatim. A success whose body is missing an expected field is
//! reported as [`ContentsError::MalformedResponse`], never as an empty value.
use base64::{Engine, prelude::BASE64_STANDARD};
use serde::de::DeserializeOwned;

use crate::{
    contents::{
        transport::{HttpExchange, HttpResponse},
        types::{RemoteFile, WriteReceipt, WriteResponse},
    },
    error::{ContentsError, Result},
};

const BASE64_ENCODING: &str = "base64";

/// Fail on error statuses, otherwise hand back the body text.
pub fn check_status(response: &HttpResponse) -> Result<&str> {
    if response.status >= 400 {
        return Err(ContentsError::remote_api(
            response.status,
            response.body.clone(),
        ));
    }

    Ok(&response.body)
}

fn parse<T: DeserializeOwned>(exchange: &HttpExchange) -> Result<T> {
    let body = check_status(&exchange.response)?;

    serde_json::from_str(body).map_err(|err| {
        ContentsError::malformed(format!(
            "unexpected response body from {} {}: {err}",
            exchange.request.method, exchange.request.url
        ))
    })
}

/// The remote file reference returned by a read.
pub fn remote_file(exchange: &HttpExchange) -> Result<RemoteFile> {
    parse(exchange)
}

/// Decoded UTF-8 text of a read.
pub fn file_content(exchange: &HttpExchange) -> Result<String> {
    let file = remote_file(exchange)?;
    decode_content(&file)
}

/// Version token of a read.
pub fn version_token(exchange: &HttpExchange) -> Result<String> {
    let file = remote_file(exchange)?;

    if file.sha.is_empty() {
        return Err(ContentsError::malformed(format!(
            "empty sha for path: {}",
            file.path
        )));
    }

    Ok(file.sha)
}

/// New token and direct URL left by a create, update or upload.
///
/// The receipt keeps `path` as the caller sent it. The service echoes the
/// decoded path, which no longer addresses the same file once re-embedded.
pub fn write_receipt(
    exchange: &HttpExchange,
    path: &str,
    branch: &str,
) -> Result<WriteReceipt> {
    let written: WriteResponse = parse(exchange)?;

    let download_url = written.content.download_url.ok_or_else(|| {
        ContentsError::malformed(format!(
            "no download_url in write response for path: {path}"
        ))
    })?;

    Ok(WriteReceipt {
        path: path.to_string(),
        sha: written.content.sha,
        download_url,
        commit_sha: written.commit.map(|c| c.sha),
        branch: branch.to_string(),
    })
}

/// Raw confirmation text of a delete.
pub fn delete_confirmation(exchange: &HttpExchange) -> Result<String> {
    check_status(&exchange.response).map(str::to_string)
}

/// Decode a file's inline base64 content as UTF-8 text.
pub fn decode_content(file: &RemoteFile) -> Result<String> {
    let bytes = decode_bytes(file)?;
    Ok(String::from_utf8(bytes)?)
}

/// Decode a file's inline base64 content.
pub fn decode_bytes(file: &RemoteFile) -> Result<Vec<u8>> {
    if let Some(encoding) = file.encoding.as_deref()
        && encoding != BASE64_ENCODING
    {
        return Err(ContentsError::malformed(format!(
            "content for path {} is not inlined (encoding: {encoding})",
            file.path
        )));
    }

    let content = file.content.as_deref().ok_or_else(|| {
        ContentsError::malformed(format!(
            "no content in response for path: {}",
            file.path
        ))
    })?;

    // inline content arrives wrapped at 60 columns
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    BASE64_STANDARD.decode(compact).map_err(|err| {
        ContentsError::malformed(format!(
            "invalid base64 content for path {}: {err}",
            file.path
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contents::request::HttpRequest;
    use reqwest::Method;
    use url::Url;

    fn exchange(status: u16, body: &str) -> HttpExchange {
        HttpExchange {
            request: HttpRequest {
                method: Method::GET,
                url: Url::parse(
                    "https://api.github.com/repos/octo/notes/contents/docs/a.txt?ref=main",
                )
                .unwrap(),
                body: None,
            },
            response: HttpResponse::new(status, body),
        }
    }

    const READ_BODY: &str = r#"{
        "type": "file",
        "encoding": "base64",
        "size": 5,
        "name": "a.txt",
        "path": "docs/a.txt",
        "content": "aGVs\nbG8=\n",
        "sha": "abc123",
        "download_url": "https://raw.githubusercontent.com/octo/notes/main/docs/a.txt"
    }"#;

    const WRITE_BODY: &str = r#"{
        "content": {
            "name": "a.txt",
            "path": "docs/a.txt",
            "sha": "def456",
            "size": 5,
            "download_url": "https://raw.githubusercontent.com/octo/notes/main/docs/a.txt"
        },
        "commit": {"sha": "7638417db6d59f3c431d3e1f261cc637155684cd"}
    }"#;

    #[test]
    fn error_status_keeps_body_verbatim() {
        let body = "{\"message\":\"Not Found\",\n \"documentation_url\":\"x\"}";
        for status in [400, 401, 404, 409, 422, 500, 503] {
            let err = file_content(&exchange(status, body)).unwrap_err();
            match err {
                ContentsError::RemoteApi { status: s, body: b } => {
                    assert_eq!(s, status);
                    assert_eq!(b, body);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn read_decodes_wrapped_base64() {
        let content = file_content(&exchange(200, READ_BODY)).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn read_decodes_empty_file() {
        let body = r#"{"path":"empty.txt","sha":"e69de29","content":"","encoding":"base64"}"#;
        let content = file_content(&exchange(200, body)).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn read_needs_only_content() {
        let body = r#"{"content":"aGVsbG8=","encoding":"base64"}"#;
        let content = file_content(&exchange(200, body)).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn read_without_content_is_malformed() {
        let body = r#"{"path":"docs/a.txt","sha":"abc123"}"#;
        let err = file_content(&exchange(200, body)).unwrap_err();
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
    }

    #[test]
    fn directory_listing_is_malformed() {
        let body = r#"[{"path":"docs/a.txt","sha":"abc123"}]"#;
        let err = file_content(&exchange(200, body)).unwrap_err();
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_success_is_malformed() {
        let err = version_token(&exchange(200, "<html>")).unwrap_err();
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
    }

    #[test]
    fn large_file_without_inline_content_is_malformed() {
        let body = r#"{"path":"big.bin","sha":"abc","content":"","encoding":"none"}"#;
        let err = file_content(&exchange(200, body)).unwrap_err();
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
    }

    #[test]
    fn binary_content_read_as_text_is_utf8_error() {
        let body = r#"{"path":"logo.png","sha":"abc","content":"iVBORwD/","encoding":"base64"}"#;
        let err = file_content(&exchange(200, body)).unwrap_err();
        assert!(matches!(err, ContentsError::Utf8Error(_)));
    }

    #[test]
    fn version_token_is_sha_field() {
        let sha = version_token(&exchange(200, READ_BODY)).unwrap();
        assert_eq!(sha, "abc123");
    }

    #[test]
    fn version_token_missing_is_malformed() {
        let body = r#"{"path":"docs/a.txt","content":""}"#;
        let err = version_token(&exchange(200, body)).unwrap_err();
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
    }

    #[test]
    fn write_receipt_extracts_token_and_url() {
        let receipt = write_receipt(&exchange(201, WRITE_BODY), "docs/a.txt", "main").unwrap();
        assert_eq!(receipt.path, "docs/a.txt");
        assert_eq!(receipt.sha, "def456");
        assert_eq!(
            receipt.download_url,
            "https://raw.githubusercontent.com/octo/notes/main/docs/a.txt"
        );
        assert_eq!(
            receipt.commit_sha.as_deref(),
            Some("7638417db6d59f3c431d3e1f261cc637155684cd")
        );
        assert_eq!(receipt.branch, "main");
    }

    #[test]
    fn write_receipt_keeps_path_as_sent() {
        let body = r#"{"content":{"path":"notes/a#b.txt","sha":"def456","download_url":"https://raw.example/notes/a%23b.txt"}}"#;
        let receipt =
            write_receipt(&exchange(201, body), "notes/a%23b.txt", "main").unwrap();
        assert_eq!(receipt.path, "notes/a%23b.txt");
    }

    #[test]
    fn upload_response_with_only_download_url_is_accepted() {
        let body = r#"{"content":{"download_url":"https://raw.example/img/logo.png"}}"#;
        let receipt =
            write_receipt(&exchange(201, body), "img/logo.png", "main").unwrap();
        assert_eq!(receipt.download_url, "https://raw.example/img/logo.png");
        assert_eq!(receipt.sha, "");
    }

    #[test]
    fn write_without_download_url_is_malformed() {
        let body = r#"{"content":{"path":"docs/a.txt","sha":"def456","download_url":null}}"#;
        let err = write_receipt(&exchange(200, body), "docs/a.txt", "main").unwrap_err();
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
    }

    #[test]
    fn write_without_content_object_is_malformed() {
        let err =
            write_receipt(&exchange(200, r#"{"commit":{"sha":"x"}}"#), "a", "main")
                .unwrap_err();
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
    }

    #[test]
    fn delete_returns_raw_text() {
        let body = "{\"content\":null,\n\"commit\":{\"sha\":\"x\"}}";
        let text = delete_confirmation(&exchange(200, body)).unwrap();
        assert_eq!(text, body);
    }

    #[test]
    fn delete_error_is_remote_api() {
        let err = delete_confirmation(&exchange(409, "conflict")).unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert!(err.is_version_conflict());
    }

    #[test]
    fn base64_round_trips_text() {
        for text in ["", "hello", "multi\nline\n", "ünïcödé ✓ 漢字 🚀"] {
            let file = RemoteFile {
                path: "t.txt".into(),
                sha: "x".into(),
                download_url: None,
                content: Some(BASE64_STANDARD.encode(text)),
                encoding: Some("base64".into()),
                size: text.len() as u64,
            };
            assert_eq!(decode_content(&file).unwrap(), text);
        }
    }
}
