//! Reconstruction of a project from previously generated text.
//!
//! Marker comments carry each widget's full reconstructable state. Page
//! headers and `page:` comments rebuild the page list. Bare draw calls outside
//! any widget block are recovered as shapes at lower fidelity.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use panel_syntax::{classify_line, DrawPrimitive, LineKind};
use smol_str::SmolStr;
use tracing::{debug, info};

use crate::error::CompileError;
use crate::model::{clamp_i32, DarkMode, Page, Project, Widget};
use crate::widgets;

/// Loads a project from a project document or from generated text.
///
/// Text whose first non-blank character is `{` is read as project JSON;
/// anything else goes through the marker parser.
pub fn import_project(text: &str) -> Result<Project, CompileError> {
    if text.trim_start().starts_with('{') {
        return Project::from_json(text);
    }
    parse_generated(text)
}

#[derive(Debug, Default)]
struct PrimitiveIds {
    rect: usize,
    filled_rect: usize,
    circle: usize,
    filled_circle: usize,
    line: usize,
}

impl PrimitiveIds {
    fn next(&mut self, primitive: &DrawPrimitive) -> String {
        let (prefix, counter) = match primitive {
            DrawPrimitive::Rectangle { filled: false, .. } => ("w_rect", &mut self.rect),
            DrawPrimitive::Rectangle { filled: true, .. } => ("w_frect", &mut self.filled_rect),
            DrawPrimitive::Circle { filled: false, .. } => ("w_circle", &mut self.circle),
            DrawPrimitive::Circle { filled: true, .. } => ("w_fcircle", &mut self.filled_circle),
            DrawPrimitive::Line { .. } => ("w_line", &mut self.line),
        };
        let id = format!("{prefix}_{counter}");
        *counter += 1;
        id
    }
}

/// Shape widget standing in for an unmarked draw call. Coordinates are
/// widened before arithmetic and clamped back into pixel range.
fn primitive_widget(id: &str, primitive: DrawPrimitive) -> Widget {
    match primitive {
        DrawPrimitive::Rectangle { x, y, w, h, filled } => {
            Widget::new(id, "shape_rect", x, y, w, h).with_prop("fill", filled)
        }
        DrawPrimitive::Circle { cx, cy, r, filled } => {
            let r = i64::from(r.max(0));
            let size = clamp_i32((2 * r).max(1));
            let left = clamp_i32(i64::from(cx) - r);
            let top = clamp_i32(i64::from(cy) - r);
            Widget::new(id, "shape_circle", left, top, size, size).with_prop("fill", filled)
        }
        DrawPrimitive::Line { x1, y1, x2, y2 } => {
            let dx = (i64::from(x2) - i64::from(x1)).abs();
            let dy = (i64::from(y2) - i64::from(y1)).abs();
            let (width, height, orientation) = if dy > dx {
                (1, clamp_i32(dy.max(1)), "vertical")
            } else {
                (clamp_i32(dx.max(1)), 1, "horizontal")
            };
            Widget::new(id, "line", x1.min(x2), y1.min(y2), width, height)
                .with_prop("stroke_width", 1)
                .with_prop("orientation", orientation)
        }
    }
}

fn page_at(pages: &mut BTreeMap<u32, Page>, index: u32) -> &mut Page {
    pages.entry(index).or_insert_with(|| Page {
        id: format!("page_{index}"),
        name: String::new(),
        dark_mode: DarkMode::Inherit,
        refresh_type: None,
        refresh_time: None,
        widgets: Vec::new(),
    })
}

fn apply_page_meta(page: &mut Page, key: &str, value: String) {
    match key {
        "name" => page.name = value,
        "dark_mode" => page.dark_mode = DarkMode::parse(&value),
        "refresh_type" => page.refresh_type = Some(value),
        "refresh_time" => page.refresh_time = Some(value),
        other => debug!(key = other, "unknown page metadata ignored"),
    }
}

/// Marker parser over generated display text.
///
/// Fails with [`CompileError::MissingPages`] when the text holds neither a
/// page header nor a recoverable widget.
pub fn parse_generated(text: &str) -> Result<Project, CompileError> {
    let mut pages: BTreeMap<u32, Page> = BTreeMap::new();
    let mut current = 0u32;
    let mut in_widget = false;
    let mut ids = PrimitiveIds::default();
    let mut markers = 0usize;
    let mut primitives = 0usize;

    for line in text.lines() {
        match classify_line(line) {
            LineKind::PageHeader(index) => {
                current = index;
                in_widget = false;
                page_at(&mut pages, current);
            }
            LineKind::PageMeta { key, value } => {
                apply_page_meta(page_at(&mut pages, current), &key, value);
            }
            LineKind::Marker(marker) => match widgets::widget_from_marker(&marker) {
                Some(widget) => {
                    page_at(&mut pages, current).widgets.push(widget);
                    markers += 1;
                    in_widget = true;
                }
                None => {
                    debug!(widget_type = marker.widget_type(), "marker of unknown type ignored");
                    in_widget = false;
                }
            },
            LineKind::Primitive(primitive) if !in_widget => {
                let id = ids.next(&primitive);
                page_at(&mut pages, current)
                    .widgets
                    .push(primitive_widget(&id, primitive));
                primitives += 1;
            }
            LineKind::Primitive(_) | LineKind::Other => {}
        }
    }

    if pages.is_empty() {
        return Err(CompileError::MissingPages);
    }
    let mut project = Project {
        name: None,
        dark_mode: false,
        pages: pages.into_values().collect(),
    };
    project.normalize();
    info!(
        pages = project.pages.len(),
        markers,
        primitives,
        "project reconstructed"
    );
    Ok(project)
}

/// Marker-listed state of a widget, used to compare round trips.
#[must_use]
pub fn marker_fields(widget: &Widget) -> Vec<(SmolStr, String)> {
    let Some(handler) = widgets::lookup(&widget.widget_type) else {
        return Vec::new();
    };
    widgets::WidgetView::new(widget, handler.props())
        .marker()
        .fields()
        .map(|(key, value)| (SmolStr::new(key), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn circle_primitive_becomes_bounding_box() {
        let widget = primitive_widget(
            "w_circle_0",
            DrawPrimitive::Circle {
                cx: 50,
                cy: 40,
                r: 10,
                filled: false,
            },
        );
        assert_eq!((widget.x, widget.y, widget.width, widget.height), (40, 30, 20, 20));
    }

    #[test]
    fn huge_circles_are_clamped() {
        let widget = primitive_widget(
            "w_circle_0",
            DrawPrimitive::Circle {
                cx: i32::MIN,
                cy: 0,
                r: 2_000_000_000,
                filled: false,
            },
        );
        assert_eq!((widget.x, widget.width), (i32::MIN, i32::MAX));
    }

    #[test]
    fn steep_lines_are_vertical() {
        let widget = primitive_widget(
            "w_line_0",
            DrawPrimitive::Line {
                x1: 5,
                y1: 100,
                x2: 6,
                y2: 10,
            },
        );
        assert_eq!((widget.x, widget.y, widget.height), (5, 10, 90));
        assert_eq!(widget.props.get("orientation"), Some(&Value::from("vertical")));
    }
}
