//! Custom error types for the application.
//!
//! Every error here is recoverable: command handlers and the engine turn
//! them into a line of terminal text and the session carries on.
//!
//! - [`FsError`] - Problems in the static filesystem definition
//! - [`NavigationError`] - Opening an external link failed
//! - [`FetchError`] - Network errors for the contact submission
//! - [`PromptError`] - Misuse of the interactive prompt machine

use thiserror::Error;

/// Errors raised while building the virtual filesystem from its definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// The definition text could not be parsed.
    #[error("invalid filesystem definition: {0}")]
    Parse(String),
    /// An entry has an empty path or an empty segment.
    #[error("invalid path in filesystem definition: '{0}'")]
    InvalidPath(String),
    /// A file occupies a path segment that must be a directory.
    #[error("'{path}' is blocked by the file '{blocker}'")]
    BlockedByFile { path: String, blocker: String },
    /// The same path is defined twice.
    #[error("duplicate entry '{0}'")]
    Duplicate(String),
    /// A file carries both inline content and an external url.
    #[error("'{0}' has both content and url")]
    AmbiguousFile(String),
}

/// Errors from the best-effort external navigation of `open`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Browser window not available
    #[error("browser window not available")]
    NoWindow,
    /// The popup was blocked and the anchor fallback could not be created
    #[error("navigation was blocked")]
    Blocked,
    /// A browser API threw
    #[error("{0}")]
    Js(String),
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("failed to create request")]
    RequestCreationFailed,
    /// Request body could not be encoded
    #[error("failed to encode request: {0}")]
    Serialize(String),
    /// Network request failed (CORS, offline, ...)
    #[error("network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Invalid response object
    #[error("invalid response")]
    InvalidResponse,
    /// Request timed out
    #[error("request timed out")]
    Timeout,
}

/// Errors from the interactive prompt state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromptError {
    /// A dialog is already running in this session.
    #[error("a prompt is already active")]
    AlreadyActive,
}
