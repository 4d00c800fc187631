//! `panelc import`.

use std::path::Path;

use anyhow::Context;
use panel_compiler::import_project;

use crate::{style, write_output};

pub fn run_import(input: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let project = import_project(&text)?;
    let mut body = project.to_json_pretty();
    body.push('\n');
    write_output(out, &body)?;
    let widgets = project.widgets().count();
    eprintln!(
        "{}",
        style::success(format!(
            "Recovered {} page(s) with {widgets} widget(s)",
            project.pages.len()
        ))
    );
    Ok(())
}
