//! CLI definitions for panelc.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "panelc",
    version,
    about = "Compile display layouts to ESPHome, LVGL and e-paper payloads",
    after_help = "Examples:\n  panelc compile --project layout.json              # display lambda\n  panelc compile --project layout.json --mode lvgl  # LVGL pages\n  panelc import --input display.yaml                # recover the layout\n  panelc widgets                                    # list widget types"
)]
pub struct Cli {
    /// Show debug output for every widget.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a layout project into a backend artifact.
    #[command(
        after_help = "Examples:\n  panelc compile --project layout.json --out display.yaml\n  panelc compile --project layout.json --mode oepl\n  panelc compile --project layout.json --config panel.toml --json"
    )]
    Compile {
        /// Project JSON file.
        #[arg(long)]
        project: PathBuf,
        /// Compiler config (defaults to ./panel.toml when present).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Target mode override (direct, retained, protocol_a, protocol_b or an alias).
        #[arg(long)]
        mode: Option<String>,
        /// Output file (stdout when omitted).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the structured artifact as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Rebuild a project from generated text or a project JSON.
    Import {
        /// Generated YAML/lambda text or project JSON.
        #[arg(long)]
        input: PathBuf,
        /// Output file (stdout when omitted).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List registered widget types.
    Widgets,
    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}
