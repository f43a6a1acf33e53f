//! jeacms CLI — render `{{{ tag }}}` templates from the command line.
//!
//! Provides two commands: `render` for template files and `inline` for text
//! given as an argument. Both resolve tags against a substitution table built
//! from `--vars` and `--set`.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jeacms_core::{Renderer, SubstitutionTable};

#[derive(Parser)]
#[command(
    name = "jeacms",
    about = "Render {{{ tag }}} templates with values and recursive file includes",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file of substitution values (a flat object)
    #[arg(long, global = true, env = "JEACMS_VARS")]
    vars: Option<PathBuf>,

    /// Set a substitution value, overriding --vars (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    set: Vec<String>,

    /// Fail instead of recursing past this many nested file includes
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template file
    Render {
        /// Path to the template file
        template: PathBuf,

        /// Write the rendered output here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Render text given on the command line
    Inline {
        /// Template text, e.g. "hello {{{ name }}}"
        text: String,
    },
}

impl Cli {
    fn renderer(&self) -> Renderer {
        match self.max_depth {
            Some(limit) => Renderer::new().with_max_depth(limit),
            None => Renderer::new(),
        }
    }

    fn table(&self) -> anyhow::Result<SubstitutionTable> {
        let mut table = match &self.vars {
            Some(path) => SubstitutionTable::load(path)?,
            None => SubstitutionTable::new(),
        };
        table.apply_assignments(&self.set)?;
        tracing::info!("loaded {} substitution values", table.len());
        Ok(table)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let renderer = cli.renderer();
    let table = cli.table()?;

    match &cli.command {
        Commands::Render { template, output } => {
            commands::render::run(&renderer, &table, template, output.as_deref())?;
        }
        Commands::Inline { text } => {
            commands::inline::run(&renderer, &table, text)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_set_builds_table() {
        let cli =
            Cli::try_parse_from(["jeacms", "inline", "x", "--set", "a=1", "--set", "a=2"])
                .unwrap();
        let table = cli.table().unwrap();
        assert_eq!(table.get("a"), "2");
        assert_eq!(table.get("b"), "");
    }

    #[test]
    fn test_set_overrides_vars_file() {
        let dir = tempfile::tempdir().unwrap();
        let vars = dir.path().join("vars.json");
        std::fs::write(&vars, r#"{"a": "file", "b": "file"}"#).unwrap();
        let cli = Cli::try_parse_from([
            "jeacms",
            "--vars",
            vars.to_str().unwrap(),
            "--set",
            "a=cli",
            "render",
            "page.html",
        ])
        .unwrap();
        let table = cli.table().unwrap();
        assert_eq!(table.get("a"), "cli");
        assert_eq!(table.get("b"), "file");
    }

    #[test]
    fn test_invalid_assignment_rejected() {
        let cli = Cli::try_parse_from(["jeacms", "--set", "oops", "inline", "x"]).unwrap();
        assert!(cli.table().is_err());
    }

    #[test]
    fn test_max_depth_configures_renderer() {
        let cli = Cli::try_parse_from(["jeacms", "--max-depth", "5", "inline", "x"]).unwrap();
        assert_eq!(cli.renderer().max_depth(), Some(5));
        let cli = Cli::try_parse_from(["jeacms", "inline", "x"]).unwrap();
        assert_eq!(cli.renderer().max_depth(), None);
    }
}
