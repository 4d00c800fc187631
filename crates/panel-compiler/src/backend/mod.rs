//! Artifact writers, one per target mode.
//!
//! The dispatcher feeds each backend pages and widgets in order; the backend
//! owns the per-page output container and assembles the final artifact once
//! every page has been emitted.

#![allow(missing_docs)]

mod direct;
mod protocol;
mod retained;
pub mod yaml;

use serde_json::Value;

use crate::aggregate::{Aggregated, Section};
use crate::config::CompilerConfig;
use crate::context::GenerationContext;
use crate::mode::TargetMode;
use crate::model::Page;
use crate::widgets::{WidgetExport, WidgetView};

pub use direct::PAGE_RULE;

/// Text and structured form of one generated artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub text: String,
    pub document: Value,
}

/// Per-mode output container driven by the dispatcher.
pub(crate) trait Backend {
    fn begin_page(&mut self, index: usize, page: &Page, ctx: &mut GenerationContext<'_>);

    /// Emits one widget. Returns `false` when nothing was produced.
    fn emit(
        &mut self,
        handler: &dyn WidgetExport,
        view: &WidgetView<'_>,
        ctx: &mut GenerationContext<'_>,
    ) -> bool;

    fn end_page(&mut self, ctx: &mut GenerationContext<'_>);

    fn finish(self: Box<Self>, ctx: &GenerationContext<'_>, aggregated: Option<&Aggregated>) -> Output;
}

pub(crate) fn for_config(config: &CompilerConfig) -> Box<dyn Backend> {
    match config.mode {
        TargetMode::Direct => Box::new(direct::DirectBackend::default()),
        TargetMode::Retained => Box::new(retained::RetainedBackend::default()),
        TargetMode::ProtocolA | TargetMode::ProtocolB => {
            Box::new(protocol::ProtocolBackend::new(config.mode, config.protocol.clone()))
        }
    }
}

/// Declaration sections joined by blank lines.
fn render_sections(sections: &[Section]) -> String {
    let mut text = sections
        .iter()
        .map(|section| section.render().join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n");
    text.push('\n');
    text
}

/// Structured view of the declaration sections.
fn sections_document(sections: &[Section]) -> Value {
    let mut map = serde_json::Map::new();
    for section in sections {
        map.insert(
            section.name.to_string(),
            Value::from(section.lines.clone()),
        );
    }
    Value::Object(map)
}
