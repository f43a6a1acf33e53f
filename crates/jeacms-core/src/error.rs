//! Unified error types for the jeacms engine.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while loading a table or rendering a template.
///
/// Missing table keys, path-shaped tags that name no file, and malformed tag
/// syntax are not errors: they render as the empty string or as literal text.
#[derive(Error, Debug)]
pub enum JeaCmsError {
    // --- Rendering ---

    /// A template file, either passed directly or named by a tag, exists but
    /// could not be opened or read (permissions, non-UTF-8 content, ...).
    #[error("failed to read template {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File inclusion nested deeper than the renderer's configured limit.
    #[error("include depth limit of {limit} exceeded at {path}")]
    IncludeDepthExceeded { path: PathBuf, limit: usize },

    // --- Substitution tables ---

    /// The JSON substitution table file was not found or could not be read.
    #[error("vars file not found at {path}")]
    VarsNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The vars file is not a JSON object of scalar values.
    #[error("failed to parse vars at {path}")]
    VarsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A `KEY=VALUE` assignment is missing its `=` or its key.
    #[error("invalid assignment '{0}' (expected KEY=VALUE)")]
    InvalidAssignment(String),
}

/// Alias for `Result<T, JeaCmsError>`.
pub type Result<T> = std::result::Result<T, JeaCmsError>;
