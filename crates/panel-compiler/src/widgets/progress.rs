//! Horizontal progress bar bound to a 0-100 sensor.

use serde_json::{json, Value};

use crate::aggregate::{HookContext, SensorRequest};
use crate::color::{DitherShape, Paint};
use crate::context::GenerationContext;
use crate::layout::TextAlign;
use crate::mode::SupportedModes;
use crate::registry::DrawHelper;

use super::emit::{self, Flavor};
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::bool("show_label", true),
    PropSpec::bool("show_percentage", true),
    PropSpec::int("bar_height", 15),
    PropSpec::int("border_width", 1),
    PropSpec::int("font_size", 12),
    PropSpec::str("color", "theme_auto"),
];

pub struct ProgressBar;

/// Resolved geometry of the bar below the optional label row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BarBox {
    label_height: i32,
    y: i32,
    height: i32,
    border: i32,
}

impl BarBox {
    fn of(view: &WidgetView<'_>) -> Self {
        let widget = view.widget;
        let label_height = if shows_label(view) || view.bool("show_percentage") {
            view.int32("font_size").max(1) + 4
        } else {
            0
        };
        let height = view
            .int32("bar_height")
            .min(widget.height - label_height)
            .max(1);
        let border = view.int32("border_width").clamp(0, height / 2);
        Self {
            label_height,
            y: widget.y + label_height,
            height,
            border,
        }
    }
}

fn shows_label(view: &WidgetView<'_>) -> bool {
    view.bool("show_label") && view.title().is_some()
}

fn request(view: &WidgetView<'_>) -> Option<SensorRequest> {
    view.entity().map(SensorRequest::numeric)
}

fn font(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> smol_str::SmolStr {
    ctx.font("Roboto", 400, view.size("font_size", 1), false)
}

impl ProgressBar {
    fn protocol(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, flavor: Flavor) -> Option<Value> {
        let widget = view.widget;
        let bar = BarBox::of(view);
        let color = view.str("color");
        let progress = match request(view) {
            Some(request) => format!("{{{{ {} | float(0) | int }}}}", emit::jinja_state(&request.entity_id)),
            None => "0".to_string(),
        };
        let mut items = Vec::new();
        if shows_label(view) {
            items.push(emit::protocol_text(
                flavor,
                ctx,
                view.title().unwrap_or_default(),
                (widget.x, widget.y),
                view.size("font_size", 1),
                &color,
                TextAlign::TOP_LEFT,
                Some(widget.width),
            ));
        }
        let kind = match flavor {
            Flavor::A => "progress_bar",
            Flavor::B => "progress",
        };
        let mut element = json!({
            "type": kind,
            "x_start": widget.x,
            "y_start": bar.y,
            "x_end": widget.x + widget.width,
            "y_end": bar.y + bar.height,
            "progress": progress,
            "fill": ctx.protocol_color(&color),
            "outline": ctx.protocol_color(&color),
            "width": bar.border,
            "show_percentage": view.bool("show_percentage"),
        });
        if flavor == Flavor::B {
            if let Some(object) = element.as_object_mut() {
                object.insert("direction".into(), Value::from("right"));
            }
        }
        items.push(element);
        emit::elements(items)
    }
}

impl WidgetExport for ProgressBar {
    fn type_tag(&self) -> &'static str {
        "progress_bar"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 40)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        if shows_label(view) || view.bool("show_percentage") {
            font(view, ctx);
        }
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let bar = BarBox::of(view);
        let color = view.str("color");
        let text_color = ctx.direct_color(&color);
        let font = font(view, ctx);
        let source = request(view).map_or_else(|| "0".to_string(), |request| format!("id({}).state", request.id));
        let inner_x = widget.x + bar.border;
        let inner_y = bar.y + bar.border;
        let inner_w = (widget.width - 2 * bar.border).max(0);
        let inner_h = (bar.height - 2 * bar.border).max(0);

        ctx.line("{");
        ctx.line(format!("  float progress_value = {source};"));
        ctx.line("  if (isnan(progress_value) || progress_value < 0) progress_value = 0;");
        ctx.line("  if (progress_value > 100) progress_value = 100;");
        ctx.line(format!("  int progress_fill = (int) ({inner_w} * progress_value / 100.0f);"));
        if shows_label(view) {
            let title = view.title().unwrap_or_default();
            ctx.line(format!(
                "  {}",
                emit::print(widget.x, widget.y, &font, &text_color, TextAlign::TOP_LEFT, title)
            ));
        }
        if view.bool("show_percentage") {
            ctx.line(format!(
                "  {}",
                emit::printf(
                    widget.x + widget.width,
                    widget.y,
                    &font,
                    &text_color,
                    TextAlign::parse("TOP_RIGHT"),
                    "%.0f%%",
                    "progress_value"
                )
            ));
        }
        match ctx.paint(&color) {
            Paint::Solid(border_color) => {
                for inset in 0..bar.border {
                    ctx.line(format!(
                        "  it.rectangle({}, {}, {}, {}, {border_color});",
                        widget.x + inset,
                        bar.y + inset,
                        widget.width - 2 * inset,
                        bar.height - 2 * inset
                    ));
                }
            }
            Paint::Dither if bar.border > 0 => {
                let band = DitherShape::RectBand {
                    x: widget.x,
                    y: bar.y,
                    w: widget.width,
                    h: bar.height,
                    band: bar.border,
                };
                ctx.require_helper(band.helper());
                for line in band.statements() {
                    ctx.line(format!("  {line}"));
                }
            }
            Paint::Dither => {}
        }
        let fill = match ctx.paint(&color) {
            Paint::Dither => {
                ctx.require_helper(DrawHelper::DitherRect);
                format!("apply_grey_dither_mask({inner_x}, {inner_y}, progress_fill, {inner_h});")
            }
            Paint::Solid(fill_color) => {
                format!("it.filled_rectangle({inner_x}, {inner_y}, progress_fill, {inner_h}, {fill_color});")
            }
        };
        ctx.line(format!("  if (progress_fill > 0) {fill}"));
        ctx.line("}");
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let widget = view.widget;
        let bar = BarBox::of(view);
        let color = view.str("color");
        let hex = ctx.retained_color(&color);
        let mut children = Vec::new();
        if shows_label(view) || view.bool("show_percentage") {
            let font = font(view, ctx);
            let title = if shows_label(view) {
                format!("{} ", view.title().unwrap_or_default())
            } else {
                String::new()
            };
            let text = match (request(view), view.bool("show_percentage")) {
                (Some(request), true) => emit::lambda(format!(
                    "return str_sprintf(\"{}%.0f%%\", id({}).state);",
                    emit::printf_literal(&title),
                    request.id
                )),
                (None, true) => Value::from(format!("{title}0%")),
                (_, false) => Value::from(title.trim_end().to_string()),
            };
            let mut label = serde_json::Map::new();
            label.insert("id".into(), Value::from(view.ident_with("_label")));
            label.insert("x".into(), Value::from(0));
            label.insert("y".into(), Value::from(0));
            label.insert("text".into(), text);
            label.insert("text_font".into(), Value::from(font.as_str()));
            label.insert("text_color".into(), Value::from(hex.clone()));
            children.push(emit::node("label", label));
        }
        let value = match request(view) {
            Some(request) => emit::lambda(format!("return id({}).state;", request.id)),
            None => Value::from(0),
        };
        let mut node = serde_json::Map::new();
        node.insert("id".into(), Value::from(view.ident_with("_bar")));
        node.insert("x".into(), Value::from(0));
        node.insert("y".into(), Value::from(bar.label_height));
        node.insert("width".into(), Value::from(widget.width));
        node.insert("height".into(), Value::from(bar.height));
        node.insert("min_value".into(), Value::from(0));
        node.insert("max_value".into(), Value::from(100));
        node.insert("value".into(), value);
        node.insert("border_width".into(), Value::from(bar.border));
        node.insert("border_color".into(), Value::from(hex.clone()));
        node.insert("indicator".into(), json!({ "bg_color": hex }));
        children.push(emit::node("bar", node));
        Some(emit::container(view, children))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::protocol(view, ctx, Flavor::A)
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::protocol(view, ctx, Flavor::B)
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        request(view)
            .map(|request| {
                request
                    .refreshing(&view.ident_with("_bar"))
                    .refreshing(&view.ident_with("_label"))
            })
            .into_iter()
            .collect()
    }
}
