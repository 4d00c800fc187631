//! CLI entrypoint for the panel compiler.

#[path = "panelc/cli.rs"]
mod cli;
#[path = "panelc/compile.rs"]
mod compile;
#[path = "panelc/completions.rs"]
mod completions;
#[path = "panelc/import.rs"]
mod import;
#[path = "panelc/style.rs"]
mod style;
#[path = "panelc/widgets.rs"]
mod widgets;

use std::path::Path;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use cli::{Cli, Command};

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", style::error(format!("Error: {err:#}")));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
        Some(Command::Compile {
            project,
            config,
            mode,
            out,
            json,
        }) => compile::run_compile(&project, config.as_deref(), mode.as_deref(), out.as_deref(), json),
        Some(Command::Import { input, out }) => import::run_import(&input, out.as_deref()),
        Some(Command::Widgets) => widgets::run_widgets(),
        Some(Command::Completions { shell }) => completions::run_completions(shell),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Writes to `out`, or to stdout when no path is given.
fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
