//! Static text.

use serde_json::Value;

use crate::color::{DitherShape, Paint};
use crate::context::GenerationContext;
use crate::layout::{line_offsets, TextAlign};
use crate::mode::SupportedModes;

use super::emit::{self, Flavor};
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::str("text", "Text"),
    PropSpec::str("font_family", "Roboto"),
    PropSpec::int("font_size", 20),
    PropSpec::int("font_weight", 400),
    PropSpec::bool("italic", false),
    PropSpec::str("color", "theme_auto"),
    PropSpec::str("text_align", "TOP_LEFT"),
    PropSpec::str("bg_color", "transparent"),
];

pub struct Text;

fn font(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> smol_str::SmolStr {
    let weight = u16::try_from(view.int("font_weight")).unwrap_or(400);
    ctx.font(&view.str("font_family"), weight, view.size("font_size", 1), view.bool("italic"))
}

/// Fills the widget box with `bg_color` unless it is transparent.
pub(super) fn direct_background(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
    let token = view.str("bg_color");
    if ctx.color(&token).is_transparent() {
        return;
    }
    let widget = view.widget;
    match ctx.paint(&token) {
        Paint::Dither => ctx.dither(DitherShape::Rect {
            x: widget.x,
            y: widget.y,
            w: widget.width,
            h: widget.height,
        }),
        Paint::Solid(color) => ctx.line(format!(
            "it.filled_rectangle({}, {}, {}, {}, {color});",
            widget.x, widget.y, widget.width, widget.height
        )),
    }
}

impl Text {
    fn protocol(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>, flavor: Flavor) -> Value {
        let align = view.align("text_align");
        emit::protocol_text(
            flavor,
            ctx,
            &view.str("text"),
            align.anchor(view.widget),
            view.size("font_size", 1),
            &view.str("color"),
            align,
            Some(view.widget.width),
        )
    }
}

impl WidgetExport for Text {
    fn type_tag(&self) -> &'static str {
        "text"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        font(view, ctx);
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        direct_background(view, ctx);
        let font = font(view, ctx);
        let color = ctx.direct_color(&view.str("color"));
        let align: TextAlign = view.align("text_align");
        let (x, y) = align.anchor(view.widget);
        let text = view.str("text");
        let lines: Vec<&str> = text.split('\n').collect();
        let pitch = view.int32("font_size").max(1) + 4;
        for (line, line_y) in lines.iter().zip(line_offsets(align, y, lines.len(), pitch)) {
            ctx.line(emit::print(x, line_y, &font, &color, align, line));
        }
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let font = font(view, ctx);
        let mut label = emit::geometry(view);
        label.insert("text".into(), Value::from(view.str("text")));
        label.insert("text_font".into(), Value::from(font.as_str()));
        label.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        label.insert("text_align".into(), Value::from(view.align("text_align").lvgl()));
        let bg = view.str("bg_color");
        if !ctx.color(&bg).is_transparent() {
            label.insert("bg_color".into(), Value::from(ctx.retained_color(&bg)));
            label.insert("bg_opa".into(), Value::from("COVER"));
        }
        Some(emit::node("label", label))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::A))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::B))
    }
}
