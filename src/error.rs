//! Error types for the content layer.
//!
//! Every failure is surfaced immediately to the caller; nothing in this
//! crate retries internally. Stale owners and missing self-module content
//! are not errors, they are reported as explicit absent values.

use thiserror::Error;

use crate::id::ModuleId;

/// Root error type for the content layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("locator error: {0}")]
    Locator(#[from] LocatorError),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while resolving a locator to a content connection.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// No runtime instance is discoverable from the calling context.
    #[error("no runtime context available for locator resolution")]
    NoContext,

    /// The locator text does not match `module://<module-id>/<path>`.
    #[error("malformed locator: {0}")]
    Malformed(String),

    /// Connection construction failed; carries the original cause's message.
    #[error("failed to open connection: {0}")]
    Connect(String),

    #[error("module not found: {0}")]
    ModuleNotFound(ModuleId),

    #[error("entry not found in module {module}: {path}")]
    EntryNotFound { module: ModuleId, path: String },
}

/// Errors raised by module content access.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The module's content has been superseded or removed.
    #[error("module content is stale: {0}")]
    Stale(ModuleId),
}

/// Result type used throughout the content layer.
pub type Result<T> = std::result::Result<T, Error>;
