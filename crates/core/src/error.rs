//! Error types for the BPE tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Pre-tokenizer grammar failed to consume the input
    #[error("Pre-tokenization left unmatched input at byte offset {offset}")]
    UnmatchedTail { offset: usize },

    /// Regex engine failure during pre-tokenization
    #[error("Regex error during pre-tokenization: {0}")]
    Regex(String),

    /// A persisted model line does not match the `<int>-<int> <int>` grammar
    #[error("Malformed model line {line}: {content:?}")]
    MalformedModelLine { line: usize, content: String },

    /// Unknown token ID passed to decode
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Invalid merge rule
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Decoded byte stream is not valid UTF-8
    #[error("Decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// I/O error on a model byte stream
    #[error("Model stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
