//! Hard extraction failures.
//!
//! Anything recoverable is reported as a string in `ParseResult::errors`
//! instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction of {file_path} was cancelled")]
    Cancelled { file_path: String },

    #[error("{file_path} is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge {
        file_path: String,
        size: usize,
        limit: usize,
    },

    #[error("{file_path} is not valid UTF-8")]
    InvalidUtf8 {
        file_path: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("unsupported language for {file_path}: {reason}")]
    UnsupportedLanguage { file_path: String, reason: String },

    #[error("failed to parse {file_path}: {reason}")]
    ParseFailed { file_path: String, reason: String },
}
