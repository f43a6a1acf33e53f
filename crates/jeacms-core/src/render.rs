//! Tag substitution and recursive file inclusion.
//!
//! Rendering a piece of text runs three phases:
//!
//! 1. **Extract** the distinct tag names present in the original text
//!    ([`tag::extract_names`]).
//! 2. **Resolve** each name to its replacement. A name is classified by
//!    [`classify`] into a [`TagSource`]:
//!    - an existing regular file is rendered with the same table and included
//!    - a path-shaped name (one containing a path separator) that names no
//!      file becomes the empty string, even if the table has that key
//!    - any other name is looked up in the table, defaulting to `""`
//! 3. **Splice** every occurrence of the name into the working copy
//!    ([`tag::splice`]).
//!
//! Names are spliced one after another over the same working copy, so text
//! inserted for an earlier name can be matched by a later name from the
//! original text. Names are never discovered from replacement text; only
//! included files are rendered recursively.
//!
//! ## Include depth
//!
//! Included files may include further files without limit. A file that
//! includes itself recurses until the stack is exhausted. Use
//! [`Renderer::with_max_depth`] to turn that into an
//! [`JeaCmsError::IncludeDepthExceeded`] error instead.

use std::path::Path;

use crate::error::{JeaCmsError, Result};
use crate::table::SubstitutionTable;
use crate::tag;

/// Where the replacement for a tag name comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSource<'a> {
    /// `{{{}}}` or `{{{ }}}`: always the empty string.
    Blank,
    /// The name is an existing regular file, rendered and included.
    File(&'a Path),
    /// The name contains a path separator but no such file exists.
    MissingPath,
    /// Plain name, resolved through the substitution table.
    Value,
}

/// Classify a trimmed tag name. Filesystem checks take precedence over the
/// table.
pub fn classify(name: &str) -> TagSource<'_> {
    let path = Path::new(name);
    if name.is_empty() {
        TagSource::Blank
    } else if path.is_file() {
        TagSource::File(path)
    } else if name.chars().any(std::path::is_separator) {
        TagSource::MissingPath
    } else {
        TagSource::Value
    }
}

/// Template renderer with an optional limit on file-inclusion nesting.
///
/// The default renderer imposes no limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    max_depth: Option<usize>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail once file inclusion nests deeper than `limit` files.
    ///
    /// A file passed to [`Renderer::substitute_file`] is depth 1, each file
    /// it includes is depth 2, and so on.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Render `text`, resolving every tag against `table` and the filesystem.
    pub fn substitute(&self, text: &str, table: &SubstitutionTable) -> Result<String> {
        self.render_text(text, table, 0)
    }

    /// Read the file at `path` and render its contents.
    ///
    /// Fails with [`JeaCmsError::Read`] if the file cannot be opened or read.
    pub fn substitute_file(
        &self,
        path: impl AsRef<Path>,
        table: &SubstitutionTable,
    ) -> Result<String> {
        self.render_file(path.as_ref(), table, 1)
    }

    fn render_text(&self, text: &str, table: &SubstitutionTable, depth: usize) -> Result<String> {
        let mut rendered = text.to_string();
        for name in tag::extract_names(text) {
            let replacement = self.resolve(name, table, depth)?;
            rendered = tag::splice(&rendered, name, &replacement);
        }
        Ok(rendered)
    }

    fn resolve(&self, name: &str, table: &SubstitutionTable, depth: usize) -> Result<String> {
        match classify(name) {
            TagSource::Blank => Ok(String::new()),
            TagSource::File(path) => {
                tracing::debug!("including {}", path.display());
                self.render_file(path, table, depth + 1)
            }
            TagSource::MissingPath => {
                tracing::debug!("no file at '{name}', substituting empty string");
                Ok(String::new())
            }
            TagSource::Value => {
                if !table.contains_key(name) {
                    tracing::debug!("no value for '{name}', substituting empty string");
                }
                Ok(table.get(name).to_string())
            }
        }
    }

    // Lines are rendered independently, so a tag split across lines never
    // matches.
    fn render_file(&self, path: &Path, table: &SubstitutionTable, depth: usize) -> Result<String> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(JeaCmsError::IncludeDepthExceeded {
                    path: path.to_path_buf(),
                    limit,
                });
            }
        }

        let contents = std::fs::read_to_string(path).map_err(|e| JeaCmsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::trace!("read {} bytes from {}", contents.len(), path.display());

        contents
            .split_inclusive('\n')
            .map(|line| self.render_text(line, table, depth))
            .collect()
    }
}

/// Render `text` with the default (unbounded) renderer.
pub fn substitute(text: &str, table: &SubstitutionTable) -> Result<String> {
    Renderer::new().substitute(text, table)
}

/// Render the file at `path` with the default (unbounded) renderer.
pub fn substitute_file(path: impl AsRef<Path>, table: &SubstitutionTable) -> Result<String> {
    Renderer::new().substitute_file(path, table)
}
