//! ESPHome display lambda.

use panel_syntax::quote;
use serde_json::json;
use tracing::debug;

use crate::aggregate::{Aggregated, Section};
use crate::color::direct_constants;
use crate::condition::Condition;
use crate::context::GenerationContext;
use crate::model::Page;
use crate::widgets::{WidgetExport, WidgetView};

use super::{render_sections, sections_document, Backend, Output};

/// Separator between widget blocks of one page.
pub const PAGE_RULE: &str = "// ────────────────";

#[derive(Debug, Default)]
pub(crate) struct DirectBackend {
    pages: Vec<Vec<String>>,
    current: Vec<String>,
    widgets_on_page: usize,
}

impl DirectBackend {
    fn push(&mut self, depth: usize, line: &str) {
        self.current.push(format!("{}{line}", "  ".repeat(depth)));
    }
}

impl Backend for DirectBackend {
    fn begin_page(&mut self, index: usize, page: &Page, ctx: &mut GenerationContext<'_>) {
        self.current = vec![format!("if (currentPage == {index}) {{")];
        self.widgets_on_page = 0;
        self.push(1, &format!("// page:name {}", quote(&page.name)));
        self.push(1, &format!("// page:dark_mode {}", quote(page.dark_mode.as_str())));
        if let Some(refresh_type) = &page.refresh_type {
            self.push(1, &format!("// page:refresh_type {}", quote(refresh_type)));
        }
        if let Some(refresh_time) = &page.refresh_time {
            self.push(1, &format!("// page:refresh_time {}", quote(refresh_time)));
        }
        let fill = format!("it.fill({});", ctx.direct_background());
        self.push(1, &fill);
    }

    fn emit(
        &mut self,
        handler: &dyn WidgetExport,
        view: &WidgetView<'_>,
        ctx: &mut GenerationContext<'_>,
    ) -> bool {
        if self.widgets_on_page > 0 {
            self.push(1, PAGE_RULE);
        }
        self.widgets_on_page += 1;
        self.push(1, &format!("// {}", view.marker().render()));

        handler.export_direct(view, ctx);
        let body = ctx.take_lines();
        if body.is_empty() {
            debug!(widget = %view.widget.id, "widget drew nothing");
        }
        match Condition::from_widget(view.widget) {
            Some(condition) => {
                self.push(1, &format!("if ({}) {{", condition.check_expression()));
                for line in &body {
                    self.push(2, line);
                }
                self.push(1, "}");
            }
            None => {
                for line in &body {
                    self.push(1, line);
                }
            }
        }
        !body.is_empty()
    }

    fn end_page(&mut self, _ctx: &mut GenerationContext<'_>) {
        self.current.push("}".to_string());
        self.pages.push(std::mem::take(&mut self.current));
    }

    fn finish(self: Box<Self>, ctx: &GenerationContext<'_>, aggregated: Option<&Aggregated>) -> Output {
        let mut lambda = direct_constants();
        lambda.extend(ctx.helpers.prelude());
        lambda.push("int currentPage = id(display_page);".to_string());
        for page in self.pages {
            lambda.extend(page);
        }

        let mut sections = aggregated.map(|agg| agg.sections(ctx)).unwrap_or_default();
        sections.push(Section::new("font", ctx.fonts.manifest_lines(&ctx.icons)));
        let mut display = vec![
            format!("  - id: {}", ctx.profile().display_id),
            "    lambda: |-".to_string(),
        ];
        display.extend(lambda.iter().map(|line| format!("      {line}")));
        sections.push(Section::new("display", display));

        Output {
            text: render_sections(&sections),
            document: json!({
                "sections": sections_document(&sections[..sections.len() - 1]),
                "lambda": lambda,
            }),
        }
    }
}
