//! LVGL page tree.

use panel_syntax::{quote, MarkerRecord};
use serde_json::{json, Value};

use crate::aggregate::{Aggregated, Section};
use crate::context::GenerationContext;
use crate::model::Page;
use crate::widgets::{WidgetExport, WidgetView};

use super::{render_sections, sections_document, yaml, Backend, Output};

#[derive(Debug)]
struct RetainedPage {
    id: String,
    bg_color: String,
    meta: Vec<(&'static str, String)>,
    widgets: Vec<(MarkerRecord, Value)>,
}

#[derive(Debug, Default)]
pub(crate) struct RetainedBackend {
    pages: Vec<RetainedPage>,
}

impl RetainedPage {
    fn document(&self) -> Value {
        let widgets: Vec<Value> = self.widgets.iter().map(|(_, node)| node.clone()).collect();
        json!({ "id": self.id, "bg_color": self.bg_color, "widgets": widgets })
    }

    /// `- id: page_N` item with marker comments, relative to the `lvgl:` key.
    fn lines(&self) -> Vec<String> {
        let mut out = vec![format!("    - id: {}", self.id)];
        for (key, value) in &self.meta {
            out.push(format!("      # page:{key} {}", quote(value)));
        }
        yaml::write_entry(&mut out, 6, "bg_color", &Value::from(self.bg_color.as_str()));
        if self.widgets.is_empty() {
            out.push("      widgets: []".to_string());
            return out;
        }
        out.push("      widgets:".to_string());
        for (marker, node) in &self.widgets {
            out.push(format!("        # {}", marker.render()));
            yaml::write_seq(&mut out, 8, std::slice::from_ref(node));
        }
        out
    }
}

/// Empty transparent box that keeps the marker of a widget with nothing to
/// show yet, such as an image without a source.
fn placeholder(view: &WidgetView<'_>) -> Value {
    let widget = view.widget;
    json!({
        "obj": {
            "id": view.ident(),
            "x": widget.x,
            "y": widget.y,
            "width": widget.width,
            "height": widget.height,
            "bg_opa": "TRANSP",
            "border_width": 0,
        }
    })
}

impl Backend for RetainedBackend {
    fn begin_page(&mut self, index: usize, page: &Page, ctx: &mut GenerationContext<'_>) {
        let mut meta = vec![
            ("name", page.name.clone()),
            ("dark_mode", page.dark_mode.as_str().to_string()),
        ];
        if let Some(refresh_type) = &page.refresh_type {
            meta.push(("refresh_type", refresh_type.clone()));
        }
        if let Some(refresh_time) = &page.refresh_time {
            meta.push(("refresh_time", refresh_time.clone()));
        }
        let background = if ctx.is_dark() { "black" } else { "white" };
        self.pages.push(RetainedPage {
            id: format!("page_{index}"),
            bg_color: ctx.retained_color(background),
            meta,
            widgets: Vec::new(),
        });
    }

    fn emit(
        &mut self,
        handler: &dyn WidgetExport,
        view: &WidgetView<'_>,
        ctx: &mut GenerationContext<'_>,
    ) -> bool {
        let (node, produced) = match handler.export_retained(view, ctx) {
            Some(node) => (node, true),
            None => (placeholder(view), false),
        };
        let Some(page) = self.pages.last_mut() else {
            return false;
        };
        page.widgets.push((view.marker(), node));
        produced
    }

    fn end_page(&mut self, _ctx: &mut GenerationContext<'_>) {}

    fn finish(self: Box<Self>, ctx: &GenerationContext<'_>, aggregated: Option<&Aggregated>) -> Output {
        let mut sections = aggregated.map(|agg| agg.sections(ctx)).unwrap_or_default();
        sections.push(Section::new("font", ctx.fonts.manifest_lines(&ctx.icons)));
        let mut lvgl = vec![
            "  displays:".to_string(),
            format!("    - {}", ctx.profile().display_id),
            "  pages:".to_string(),
        ];
        for page in &self.pages {
            lvgl.extend(page.lines());
        }
        let pages: Vec<Value> = self.pages.iter().map(RetainedPage::document).collect();
        let document = json!({
            "sections": sections_document(&sections),
            "lvgl": { "pages": pages },
        });
        sections.push(Section::new("lvgl", lvgl));
        Output {
            text: render_sections(&sections),
            document,
        }
    }
}
