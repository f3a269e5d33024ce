//! Result type for the command line binary.
//!
//! Library calls return [`repo_contents::Result`] with a typed
//! [`repo_contents::ContentsError`]. At the binary boundary those errors are
//! folded into `color-eyre` reports so they print with context:
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//!
//! let content = client
//!     .get_file_content(&path)
//!     .await
//!     .wrap_err_with(|| format!("failed to read {path}"))?;
//! ```
use color_eyre::eyre::Result as EyreResult;

/// Standard result type used by the binary.
pub type Result<T> = EyreResult<T>;
