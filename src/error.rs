//! Error types for repository content operations.

use thiserror::Error;

/// Main error type for content API operations.
#[derive(Error, Debug)]
pub enum ContentsError {
    // Configuration / request errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Network errors: no response was obtained
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    // API errors
    #[error("Remote API error (status {status}): {body}")]
    RemoteApi { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // Conversions
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using ContentsError
pub type Result<T> = std::result::Result<T, ContentsError>;

impl ContentsError {
    /// Create a remote API error, keeping the body verbatim
    pub fn remote_api(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteApi {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// HTTP status returned by the remote service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the remote service rejected the supplied version token.
    ///
    /// A stale token comes back as 409. A token that was never sent for an
    /// existing file comes back as 422 with a message naming `sha`. Callers
    /// doing read-modify-write should re-read and retry on either.
    pub fn is_version_conflict(&self) -> bool {
        match self {
            Self::RemoteApi { status: 409, .. } => true,
            Self::RemoteApi { status: 422, body } => body.contains("sha"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = ContentsError::remote_api(404, r#"{"message":"Not Found"}"#);
        assert_eq!(
            err.to_string(),
            r#"Remote API error (status 404): {"message":"Not Found"}"#
        );

        let err = ContentsError::malformed("missing field `sha`");
        assert_eq!(err.to_string(), "Malformed response: missing field `sha`");

        let err = ContentsError::invalid_config("owner must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: owner must not be empty"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = ContentsError::remote_api(500, "boom");
        assert!(matches!(err, ContentsError::RemoteApi { .. }));
        assert_eq!(err.status(), Some(500));

        let err = ContentsError::malformed("nope");
        assert!(matches!(err, ContentsError::MalformedResponse(_)));
        assert_eq!(err.status(), None);

        let err = ContentsError::invalid_request("empty path");
        assert!(matches!(err, ContentsError::InvalidRequest(_)));
    }

    #[test]
    fn test_version_conflict_detection() {
        let stale = ContentsError::remote_api(
            409,
            r#"{"message":"docs/a.txt does not match abc123"}"#,
        );
        assert!(stale.is_version_conflict());

        let missing = ContentsError::remote_api(
            422,
            r#"{"message":"Invalid request.\n\n\"sha\" wasn't supplied."}"#,
        );
        assert!(missing.is_version_conflict());

        let validation =
            ContentsError::remote_api(422, r#"{"message":"path is invalid"}"#);
        assert!(!validation.is_version_conflict());

        let not_found = ContentsError::remote_api(404, "Not Found");
        assert!(!not_found.is_version_conflict());
    }

    #[test]
    fn test_from_conversions() {
        let url_err = url::Url::parse("not a url");
        assert!(url_err.is_err());
        let err: ContentsError = url_err.unwrap_err().into();
        assert!(matches!(err, ContentsError::UrlError(_)));

        let utf8_err = String::from_utf8(vec![0xff, 0xfe]);
        let err: ContentsError = utf8_err.unwrap_err().into();
        assert!(matches!(err, ContentsError::Utf8Error(_)));
    }
}
