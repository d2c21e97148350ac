//! Error types for the generative provider and its configuration.

use reqwest::StatusCode;
use thiserror::Error;

/// Longest response body excerpt carried in [`GenerateError::HttpStatus`].
const SNIPPET_MAX_CHARS: usize = 300;

/// Environment/config problems detected at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A numeric variable failed to parse.
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// A value that cannot be used as given, e.g. an API key with control characters.
    #[error("invalid value in {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },

    /// An endpoint did not start with `http://` or `https://`.
    #[error("invalid endpoint in {var}: {value}")]
    InvalidEndpoint { var: &'static str, value: String },
}

/// Failure of a single generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connection, TLS, or timeout failure from the HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        snippet: String,
    },

    /// The body was not the JSON shape we expect.
    #[error("decode error: {0}")]
    Decode(String),

    /// The provider refused the prompt.
    #[error("prompt blocked: {0}")]
    Blocked(String),

    /// The provider answered without any text.
    #[error("empty response (finish reason: {0})")]
    EmptyResponse(String),
}

/// Collapse whitespace and cap `body` at [`SNIPPET_MAX_CHARS`] characters.
pub fn make_snippet(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_MAX_CHARS {
        collapsed
    } else {
        let mut cut: String = collapsed.chars().take(SNIPPET_MAX_CHARS).collect();
        cut.push('…');
        cut
    }
}
