//! CLI command implementations for jeacms.
//!
//! Each module corresponds to a subcommand (`jeacms <command>`).

pub mod inline;
pub mod render;
