//! Rectangles, rounded rectangles, circles and lines.
//!
//! Fill is emitted before the border. On palette-limited targets a gray fill
//! or border becomes a dither mask in place of the solid primitive, never in
//! addition to it.

use serde_json::{json, Value};

use crate::color::{DitherShape, Paint};
use crate::context::GenerationContext;
use crate::mode::SupportedModes;
use crate::registry::DrawHelper;

use super::emit::{self, Flavor};
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const RECT_PROPS: &[PropSpec] = &[
    PropSpec::bool("fill", false),
    PropSpec::int("border_width", 1),
    PropSpec::str("color", "theme_auto"),
    PropSpec::same_as("border_color", "color"),
];

const ROUNDED_PROPS: &[PropSpec] = &[
    PropSpec::bool("fill", false),
    PropSpec::bool("show_border", true),
    PropSpec::int("border_width", 4),
    PropSpec::int("radius", 10),
    PropSpec::str("color", "theme_auto"),
    PropSpec::same_as("border_color", "color"),
];

const CIRCLE_PROPS: &[PropSpec] = &[
    PropSpec::bool("fill", false),
    PropSpec::int("border_width", 1),
    PropSpec::str("color", "theme_auto"),
    PropSpec::same_as("border_color", "color"),
];

const LINE_PROPS: &[PropSpec] = &[
    PropSpec::int("stroke_width", 3),
    PropSpec::str("color", "theme_auto"),
    PropSpec::str("orientation", "horizontal"),
];

/// Border thickness bounded by half the smaller side.
fn border_width(view: &WidgetView<'_>) -> i32 {
    let widget = view.widget;
    view.int32("border_width").clamp(0, (widget.width.min(widget.height) / 2).max(1))
}

fn rounded_radius(view: &WidgetView<'_>) -> i32 {
    let widget = view.widget;
    view.int32("radius").clamp(0, widget.width.min(widget.height) / 2)
}

/// LVGL object shared by the three closed shapes.
fn retained_shape(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, border: i32, radius: i32) -> Value {
    let mut obj = emit::geometry(view);
    let fill = view.bool("fill");
    obj.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
    obj.insert("bg_opa".into(), Value::from(if fill { "COVER" } else { "TRANSP" }));
    obj.insert("border_width".into(), Value::from(border));
    obj.insert("border_color".into(), Value::from(ctx.retained_color(&view.str("border_color"))));
    obj.insert("radius".into(), Value::from(radius));
    obj.insert("pad_all".into(), Value::from(0));
    emit::node("obj", obj)
}

fn protocol_fill(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
    if view.bool("fill") {
        Value::from(ctx.protocol_color(&view.str("color")))
    } else {
        Value::Null
    }
}

fn protocol_rectangle(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, border: i32, radius: i32) -> Value {
    let widget = view.widget;
    let mut element = json!({
        "type": "rectangle",
        "x_start": widget.x,
        "y_start": widget.y,
        "x_end": widget.x + widget.width,
        "y_end": widget.y + widget.height,
        "fill": protocol_fill(view, ctx),
        "outline": ctx.protocol_color(&view.str("border_color")),
        "width": border,
    });
    if radius > 0 {
        if let Some(object) = element.as_object_mut() {
            object.insert("radius".into(), Value::from(radius));
        }
    }
    element
}

pub struct ShapeRect;

impl WidgetExport for ShapeRect {
    fn type_tag(&self) -> &'static str {
        "shape_rect"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        RECT_PROPS
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let (x, y, w, h) = (widget.x, widget.y, widget.width, widget.height);
        if view.bool("fill") {
            match ctx.paint(&view.str("color")) {
                Paint::Dither => ctx.dither(DitherShape::Rect { x, y, w, h }),
                Paint::Solid(color) => ctx.line(format!("it.filled_rectangle({x}, {y}, {w}, {h}, {color});")),
            }
        }
        let band = border_width(view);
        if band == 0 {
            return;
        }
        match ctx.paint(&view.str("border_color")) {
            Paint::Dither => ctx.dither(DitherShape::RectBand { x, y, w, h, band }),
            Paint::Solid(color) => {
                for inset in 0..band {
                    ctx.line(format!(
                        "it.rectangle({}, {}, {}, {}, {color});",
                        x + inset,
                        y + inset,
                        w - 2 * inset,
                        h - 2 * inset
                    ));
                }
            }
        }
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(retained_shape(view, ctx, border_width(view), 0))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(protocol_rectangle(view, ctx, border_width(view), 0))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(protocol_rectangle(view, ctx, border_width(view), 0))
    }
}

pub struct RoundedRect;

impl RoundedRect {
    fn border(view: &WidgetView<'_>) -> i32 {
        if view.bool("show_border") {
            border_width(view)
        } else {
            0
        }
    }
}

impl WidgetExport for RoundedRect {
    fn type_tag(&self) -> &'static str {
        "rounded_rect"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        ROUNDED_PROPS
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let (x, y, w, h) = (widget.x, widget.y, widget.width, widget.height);
        let r = rounded_radius(view);
        if view.bool("fill") {
            match ctx.paint(&view.str("color")) {
                Paint::Dither => ctx.dither(DitherShape::RoundedRect { x, y, w, h, r, band: 0 }),
                Paint::Solid(color) => {
                    ctx.require_helper(DrawHelper::FilledRoundedRect);
                    ctx.line(format!("draw_filled_rrect({x}, {y}, {w}, {h}, {r}, {color});"));
                }
            }
        }
        let band = Self::border(view);
        if band == 0 {
            return;
        }
        match ctx.paint(&view.str("border_color")) {
            Paint::Dither => ctx.dither(DitherShape::RoundedRect { x, y, w, h, r, band }),
            Paint::Solid(color) => {
                ctx.require_helper(DrawHelper::RoundedRectBorder);
                ctx.line(format!("draw_rrect_border({x}, {y}, {w}, {h}, {r}, {band}, {color});"));
            }
        }
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(retained_shape(view, ctx, Self::border(view), rounded_radius(view)))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(protocol_rectangle(view, ctx, Self::border(view), rounded_radius(view)))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(protocol_rectangle(view, ctx, Self::border(view), rounded_radius(view)))
    }
}

pub struct ShapeCircle;

impl ShapeCircle {
    /// Center and radius of the circle inscribed in the widget box.
    fn geometry(view: &WidgetView<'_>) -> (i32, i32, i32) {
        let widget = view.widget;
        (
            widget.x + widget.width / 2,
            widget.y + widget.height / 2,
            (widget.width.min(widget.height) / 2).max(1),
        )
    }

    fn protocol(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        let (cx, cy, r) = Self::geometry(view);
        json!({
            "type": "circle",
            "x": cx,
            "y": cy,
            "radius": r,
            "fill": protocol_fill(view, ctx),
            "outline": ctx.protocol_color(&view.str("border_color")),
            "width": border_width(view),
        })
    }
}

impl WidgetExport for ShapeCircle {
    fn type_tag(&self) -> &'static str {
        "shape_circle"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        CIRCLE_PROPS
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let (cx, cy, r) = Self::geometry(view);
        if view.bool("fill") {
            match ctx.paint(&view.str("color")) {
                Paint::Dither => ctx.dither(DitherShape::Circle { cx, cy, r, band: 0 }),
                Paint::Solid(color) => ctx.line(format!("it.filled_circle({cx}, {cy}, {r}, {color});")),
            }
        }
        let band = border_width(view).min(r);
        if band == 0 {
            return;
        }
        match ctx.paint(&view.str("border_color")) {
            Paint::Dither => ctx.dither(DitherShape::Circle { cx, cy, r, band }),
            Paint::Solid(color) => {
                for inset in 0..band {
                    ctx.line(format!("it.circle({cx}, {cy}, {}, {color});", r - inset));
                }
            }
        }
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let (_, _, r) = Self::geometry(view);
        Some(retained_shape(view, ctx, border_width(view), r))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx))
    }
}

pub struct Line;

impl Line {
    fn is_vertical(view: &WidgetView<'_>) -> bool {
        view.str("orientation").trim().eq_ignore_ascii_case("vertical")
    }

    fn stroke(view: &WidgetView<'_>) -> i32 {
        view.int32("stroke_width").max(1)
    }

    /// `(x_end, y_end)` of the line starting at the widget origin.
    fn end(view: &WidgetView<'_>) -> (i32, i32) {
        let widget = view.widget;
        if Self::is_vertical(view) {
            (widget.x, widget.y + widget.height)
        } else {
            (widget.x + widget.width, widget.y)
        }
    }

    fn protocol(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, flavor: Flavor) -> Value {
        let widget = view.widget;
        let (x_end, y_end) = Self::end(view);
        let color_key = match flavor {
            Flavor::A => "fill",
            Flavor::B => "color",
        };
        let mut element = json!({
            "type": "line",
            "x_start": widget.x,
            "y_start": widget.y,
            "x_end": x_end,
            "y_end": y_end,
            "width": Self::stroke(view),
        });
        if let Some(object) = element.as_object_mut() {
            object.insert(color_key.into(), Value::from(ctx.protocol_color(&view.str("color"))));
        }
        element
    }
}

impl WidgetExport for Line {
    fn type_tag(&self) -> &'static str {
        "line"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        LINE_PROPS
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let stroke = Self::stroke(view);
        let (x, y) = (widget.x, widget.y);
        let (w, h) = if Self::is_vertical(view) {
            (stroke, widget.height)
        } else {
            (widget.width, stroke)
        };
        match ctx.paint(&view.str("color")) {
            Paint::Dither => ctx.dither(DitherShape::Rect { x, y, w, h }),
            Paint::Solid(color) if stroke == 1 => {
                let (x_end, y_end) = Self::end(view);
                ctx.line(format!("it.line({x}, {y}, {x_end}, {y_end}, {color});"));
            }
            Paint::Solid(color) => ctx.line(format!("it.filled_rectangle({x}, {y}, {w}, {h}, {color});")),
        }
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let widget = view.widget;
        let end = if Self::is_vertical(view) {
            format!("0,{}", widget.height)
        } else {
            format!("{},0", widget.width)
        };
        let mut line = serde_json::Map::new();
        line.insert("id".into(), Value::from(view.ident()));
        line.insert("x".into(), Value::from(widget.x));
        line.insert("y".into(), Value::from(widget.y));
        line.insert("points".into(), json!(["0,0", end]));
        line.insert("line_width".into(), Value::from(Self::stroke(view)));
        line.insert("line_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        Some(emit::node("line", line))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::A))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::B))
    }
}
