use anyhow::Result;

use jeacms_core::{Renderer, SubstitutionTable};

/// Render `text` and print it to stdout, followed by a newline.
pub fn run(renderer: &Renderer, table: &SubstitutionTable, text: &str) -> Result<()> {
    let rendered = renderer.substitute(text, table)?;
    println!("{rendered}");
    Ok(())
}
