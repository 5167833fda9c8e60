// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for accesscheck

use thiserror::Error;

/// Main error type for accesscheck
///
/// Network and HTTP failures are kept apart from everything else so the CLI
/// can report them the way they happened. Checker failures never appear here;
/// the runner turns them into `warn` cards.
#[derive(Error, Debug)]
pub enum AccessCheckError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {status} for url {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

impl AccessCheckError {
    /// Whether this error came from retrieving the page
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AccessCheckError::Network(_) | AccessCheckError::HttpStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AccessCheckError>;
