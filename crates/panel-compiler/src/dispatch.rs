//! Generation pass: aggregation, then per-page, per-widget dispatch.
//!
//! One [`Compiler::compile`] call owns one [`GenerationContext`] from start to
//! finish. Widgets are visited in page order then widget order, and each
//! supported widget is emitted exactly once.

#![allow(missing_docs)]

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate, SensorKind};
use crate::backend::{self, Output};
use crate::config::CompilerConfig;
use crate::context::GenerationContext;
use crate::error::CompileError;
use crate::mode::TargetMode;
use crate::model::Project;
use crate::widgets::{self, WidgetView};

/// Counters of one generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub pages: usize,
    pub widgets: usize,
    /// Widgets whose type is unknown or unsupported in the active mode.
    pub skipped: usize,
    pub sensors: usize,
    pub fonts: usize,
    /// Distinct (size, glyph) icon entries.
    pub icons: usize,
}

/// Result of compiling one project for one target mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub mode: TargetMode,
    /// Artifact as written to disk.
    pub text: String,
    /// Structured form of the same artifact.
    pub document: Value,
    pub stats: CompileStats,
}

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Parses a project document and compiles it.
    pub fn compile_json(&self, text: &str) -> Result<Artifact, CompileError> {
        let project = Project::from_json(text)?;
        Ok(self.compile(&project))
    }

    /// Runs one full generation pass with a fresh context.
    #[must_use]
    pub fn compile(&self, project: &Project) -> Artifact {
        let mode = self.config.mode;
        let mut ctx = GenerationContext::new(mode, &self.config.device);
        let aggregated = (!mode.is_protocol()).then(|| aggregate(project, &mut ctx));

        let mut out = backend::for_config(&self.config);
        let mut stats = CompileStats {
            pages: project.pages.len(),
            ..CompileStats::default()
        };
        for (index, page) in project.pages.iter().enumerate() {
            ctx.set_page_dark(page.effective_dark(project.dark_mode));
            out.begin_page(index, page, &mut ctx);
            for widget in &page.widgets {
                let Some(handler) = widgets::lookup(&widget.widget_type) else {
                    warn!(widget = %widget.id, widget_type = %widget.widget_type, "unknown widget type skipped");
                    stats.skipped += 1;
                    continue;
                };
                if !handler.supported_modes().contains(mode) {
                    debug!(widget = %widget.id, widget_type = %widget.widget_type, mode = mode.as_str(), "widget unsupported in mode");
                    stats.skipped += 1;
                    continue;
                }
                let view = WidgetView::new(widget, handler.props());
                handler.collect_requirements(&view, &mut ctx);
                let produced = out.emit(handler, &view, &mut ctx);
                debug!(widget = %widget.id, widget_type = %widget.widget_type, produced, "widget dispatched");
                stats.widgets += 1;
            }
            out.end_page(&mut ctx);
        }

        if let Some(aggregated) = &aggregated {
            stats.sensors = [SensorKind::Numeric, SensorKind::Text, SensorKind::Binary]
                .into_iter()
                .map(|kind| aggregated.sensor_count(kind))
                .sum();
        }
        stats.fonts = ctx.fonts.len();
        stats.icons = ctx.icons.len();
        let Output { text, document } = out.finish(&ctx, aggregated.as_ref());
        info!(
            mode = mode.as_str(),
            pages = stats.pages,
            widgets = stats.widgets,
            skipped = stats.skipped,
            sensors = stats.sensors,
            fonts = stats.fonts,
            "generation finished"
        );
        Artifact {
            mode,
            text,
            document,
            stats,
        }
    }
}
