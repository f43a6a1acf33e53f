use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use jeacms_core::{Renderer, SubstitutionTable};

use crate::output;

/// Render a template file to stdout or to `output`.
pub fn run(
    renderer: &Renderer,
    table: &SubstitutionTable,
    template: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = renderer
        .substitute_file(template, table)
        .with_context(|| format!("rendering {}", template.display()))?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            output::print_success(&format!("Rendered {}", template.display()));
            output::print_key_value("output", &path.display().to_string());
            output::print_key_value("bytes", &rendered.len().to_string());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("page.txt");
        let out = dir.path().join("page.out");
        std::fs::write(&template, "hello {{{ name }}}\n").unwrap();

        let table = SubstitutionTable::from_iter([("name", "world")]);
        run(&Renderer::new(), &table, &template, Some(&out)).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hello world\n");
    }

    #[test]
    fn test_render_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("page.out");
        let result = run(
            &Renderer::new(),
            &SubstitutionTable::new(),
            &dir.path().join("missing.txt"),
            Some(&out),
        );
        assert!(result.is_err());
        assert!(!out.exists());
    }
}
