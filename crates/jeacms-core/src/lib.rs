//! Core library for jeacms, a minimal `{{{ tag }}}` templating engine.
//!
//! A tag is replaced by a value from a [`table::SubstitutionTable`], by the
//! rendered contents of a file when the tag names an existing file, or by the
//! empty string. Included files are rendered with the same table, so they may
//! use tags and include further files.
//!
//! ```no_run
//! use jeacms_core::{substitute, SubstitutionTable};
//!
//! let table = SubstitutionTable::from_iter([("name", "world")]);
//! let page = substitute("hello {{{ name }}}{{{ partials/footer.html }}}", &table)?;
//! # Ok::<(), jeacms_core::error::JeaCmsError>(())
//! ```
//!
//! There are no loops, conditionals, or escapes, and rendered files are not
//! cached.

pub mod error;
pub mod render;
pub mod table;
pub mod tag;

pub use error::{JeaCmsError, Result};
pub use render::{substitute, substitute_file, Renderer};
pub use table::SubstitutionTable;
