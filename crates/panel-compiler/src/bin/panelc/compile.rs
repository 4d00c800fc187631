//! `panelc compile`.

use std::path::Path;

use anyhow::Context;
use panel_compiler::{Compiler, CompilerConfig, TargetMode};

use crate::{style, write_output};

const DEFAULT_CONFIG: &str = "panel.toml";

fn load_config(path: Option<&Path>) -> anyhow::Result<CompilerConfig> {
    if let Some(path) = path {
        return Ok(CompilerConfig::load(path)?);
    }
    let fallback = Path::new(DEFAULT_CONFIG);
    if fallback.is_file() {
        return Ok(CompilerConfig::load(fallback)?);
    }
    Ok(CompilerConfig::default())
}

pub fn run_compile(
    project: &Path,
    config: Option<&Path>,
    mode: Option<&str>,
    out: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    if let Some(mode) = mode {
        config = config.with_mode(TargetMode::parse(mode)?);
    }
    let text = std::fs::read_to_string(project)
        .with_context(|| format!("failed to read {}", project.display()))?;
    let artifact = Compiler::new(config).compile_json(&text)?;
    let body = if json {
        let mut body = serde_json::to_string_pretty(&artifact.document)?;
        body.push('\n');
        body
    } else {
        artifact.text
    };
    write_output(out, &body)?;
    let stats = artifact.stats;
    eprintln!(
        "{}",
        style::success(format!(
            "Compiled {} page(s), {} widget(s) for {} ({} skipped)",
            stats.pages,
            stats.widgets,
            artifact.mode,
            stats.skipped
        ))
    );
    Ok(())
}
