//! Primitives only the drawing protocols understand.

use serde_json::{json, Map, Value};

use crate::context::GenerationContext;
use crate::mode::SupportedModes;

use super::emit::{Flavor, PROTOCOL_FONT};
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const ELLIPSE_PROPS: &[PropSpec] = &[
    PropSpec::str("fill", ""),
    PropSpec::str("outline", "black"),
    PropSpec::int("border_width", 1),
];

const POLYGON_PROPS: &[PropSpec] = &[
    PropSpec::str("points", "0,0;50,0;25,40"),
    PropSpec::str("fill", ""),
    PropSpec::str("outline", "black"),
    PropSpec::int("border_width", 1),
];

const MULTILINE_PROPS: &[PropSpec] = &[
    PropSpec::str("value", "Line 1|Line 2"),
    PropSpec::str("delimiter", "|"),
    PropSpec::int("font_size", 16),
    PropSpec::int("offset_y", 20),
    PropSpec::str("color", "theme_auto"),
];

const ARC_PROPS: &[PropSpec] = &[
    PropSpec::int("start_angle", 0),
    PropSpec::int("end_angle", 90),
    PropSpec::str("outline", "black"),
    PropSpec::int("border_width", 2),
];

const GRID_PROPS: &[PropSpec] = &[PropSpec::int("spacing", 20), PropSpec::str("line_color", "gray")];

const PLOT_PROPS: &[PropSpec] = &[
    PropSpec::int("duration", 36400),
    PropSpec::str("color", "black"),
    PropSpec::int("line_width", 1),
    PropSpec::bool("smooth", true),
    PropSpec::bool("show_points", true),
    PropSpec::int("point_size", 3),
    PropSpec::str("point_color", "black"),
];

const ICON_SEQUENCE_PROPS: &[PropSpec] = &[
    PropSpec::str("icons", "mdi:home,mdi:arrow-right,mdi:office-building"),
    PropSpec::int("size", 24),
    PropSpec::str("direction", "right"),
    PropSpec::int("spacing", 6),
    PropSpec::str("fill", "black"),
];

const RECTANGLE_PATTERN_PROPS: &[PropSpec] = &[
    PropSpec::int("x_size", 30),
    PropSpec::int("y_size", 15),
    PropSpec::int("x_offset", 5),
    PropSpec::int("y_offset", 5),
    PropSpec::int("x_repeat", 3),
    PropSpec::int("y_repeat", 2),
    PropSpec::str("fill", "white"),
    PropSpec::str("outline", "black"),
    PropSpec::int("border_width", 1),
];

/// Entity a plot charts when none is bound.
const PLOT_ENTITY: &str = "sensor.temperature";

/// Protocol color, or `null` for a blank token.
fn optional_color(ctx: &GenerationContext<'_>, token: &str) -> Value {
    let token = token.trim();
    if token.is_empty() {
        Value::Null
    } else {
        Value::from(ctx.protocol_color(token))
    }
}

/// `x;y` pairs separated by `;`, relative to the origin. Malformed pairs are
/// skipped.
fn parse_points(raw: &str, (x, y): (i32, i32)) -> Vec<[i32; 2]> {
    raw.split(';')
        .filter_map(|pair| {
            let (px, py) = pair.split_once(',')?;
            let px = px.trim().parse::<f64>().ok()?;
            let py = py.trim().parse::<f64>().ok()?;
            #[allow(clippy::cast_possible_truncation)]
            Some([x.saturating_add(px.round() as i32), y.saturating_add(py.round() as i32)])
        })
        .collect()
}

pub struct Ellipse;

impl Ellipse {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        let widget = view.widget;
        json!({
            "type": "ellipse",
            "x_start": widget.x,
            "y_start": widget.y,
            "x_end": widget.x + widget.width,
            "y_end": widget.y + widget.height,
            "fill": optional_color(ctx, &view.str("fill")),
            "outline": ctx.protocol_color(&view.str("outline")),
            "width": view.int("border_width").max(0),
        })
    }
}

impl WidgetExport for Ellipse {
    fn type_tag(&self) -> &'static str {
        "odp_ellipse"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        ELLIPSE_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (100, 60)
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }
}

pub struct Polygon;

impl Polygon {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Option<Value> {
        let widget = view.widget;
        let points = parse_points(&view.str("points"), (widget.x, widget.y));
        if points.len() < 3 {
            return None;
        }
        Some(json!({
            "type": "polygon",
            "points": points,
            "fill": optional_color(ctx, &view.str("fill")),
            "outline": ctx.protocol_color(&view.str("outline")),
            "width": view.int("border_width").max(0),
        }))
    }
}

impl WidgetExport for Polygon {
    fn type_tag(&self) -> &'static str {
        "odp_polygon"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        POLYGON_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (60, 50)
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::element(view, ctx)
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::element(view, ctx)
    }
}

pub struct Multiline;

impl Multiline {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        let widget = view.widget;
        let mut delimiter = view.str("delimiter");
        if delimiter.is_empty() {
            delimiter.push('|');
        }
        let mut element = Map::new();
        element.insert("type".into(), Value::from("multiline"));
        element.insert("value".into(), Value::from(view.str("value")));
        element.insert("delimiter".into(), Value::from(delimiter));
        element.insert("x".into(), Value::from(widget.x));
        element.insert("y".into(), Value::from(widget.y));
        element.insert("offset_y".into(), Value::from(view.int("offset_y").max(1)));
        element.insert("size".into(), Value::from(view.size("font_size", 1)));
        element.insert("color".into(), Value::from(ctx.protocol_color(&view.str("color"))));
        element.insert("font".into(), Value::from(PROTOCOL_FONT));
        Value::Object(element)
    }
}

impl WidgetExport for Multiline {
    fn type_tag(&self) -> &'static str {
        "odp_multiline"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        MULTILINE_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 60)
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }
}

pub struct ArcOutline;

impl ArcOutline {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        let widget = view.widget;
        json!({
            "type": "arc",
            "x": widget.x + widget.width / 2,
            "y": widget.y + widget.height / 2,
            "radius": (widget.width.min(widget.height) / 2).max(1),
            "start_angle": view.int("start_angle"),
            "end_angle": view.int("end_angle"),
            "outline": ctx.protocol_color(&view.str("outline")),
            "width": view.int("border_width").max(1),
        })
    }
}

impl WidgetExport for ArcOutline {
    fn type_tag(&self) -> &'static str {
        "odp_arc"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        ARC_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (100, 100)
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }
}

/// Full-screen alignment grid.
pub struct DebugGrid;

impl DebugGrid {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        json!({
            "type": "debug_grid",
            "spacing": view.int("spacing").max(2),
            "line_color": ctx.protocol_color(&view.str("line_color")),
        })
    }
}

impl WidgetExport for DebugGrid {
    fn type_tag(&self) -> &'static str {
        "debug_grid"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        GRID_PROPS
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }
}

/// History plot of one entity.
pub struct Plot;

impl Plot {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        let widget = view.widget;
        let series = json!({
            "entity": view.entity().unwrap_or(PLOT_ENTITY),
            "color": ctx.protocol_color(&view.str("color")),
            "width": view.int("line_width").max(1),
            "smooth": view.bool("smooth"),
            "show_points": view.bool("show_points"),
            "point_size": view.int("point_size").max(1),
            "point_color": ctx.protocol_color(&view.str("point_color")),
        });
        json!({
            "type": "plot",
            "x_start": widget.x,
            "y_start": widget.y,
            "x_end": widget.x.saturating_add(widget.width),
            "y_end": widget.y.saturating_add(widget.height),
            "duration": view.int("duration").max(1),
            "data": [series],
        })
    }
}

impl WidgetExport for Plot {
    fn type_tag(&self) -> &'static str {
        "odp_plot"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        PLOT_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 100)
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }
}

/// Row or column of icons laid out by the display.
pub struct IconSequence;

impl IconSequence {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, flavor: Flavor) -> Option<Value> {
        let widget = view.widget;
        let icons: Vec<String> = view
            .str("icons")
            .split(',')
            .map(str::trim)
            .filter(|icon| !icon.is_empty())
            .map(str::to_string)
            .collect();
        if icons.is_empty() {
            return None;
        }
        let mut direction = view.str("direction").trim().to_ascii_lowercase();
        if direction.is_empty() {
            direction.push_str("right");
        }
        let mut element = Map::new();
        element.insert("type".into(), Value::from("icon_sequence"));
        if flavor == Flavor::B {
            element.insert("visible".into(), Value::Bool(true));
        }
        element.insert("x".into(), Value::from(widget.x));
        element.insert("y".into(), Value::from(widget.y));
        element.insert("icons".into(), json!(icons));
        element.insert("size".into(), Value::from(view.size("size", 1)));
        element.insert("direction".into(), Value::from(direction));
        element.insert("spacing".into(), Value::from(view.int("spacing").max(0)));
        element.insert("fill".into(), Value::from(ctx.protocol_color(&view.str("fill"))));
        Some(Value::Object(element))
    }
}

impl WidgetExport for IconSequence {
    fn type_tag(&self) -> &'static str {
        "odp_icon_sequence"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        ICON_SEQUENCE_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (120, 30)
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::element(view, ctx, Flavor::A)
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::element(view, ctx, Flavor::B)
    }
}

/// Grid of equal rectangles repeated across and down.
pub struct RectanglePattern;

impl RectanglePattern {
    fn element(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        let widget = view.widget;
        json!({
            "type": "rectangle_pattern",
            "x_start": widget.x,
            "y_start": widget.y,
            "x_size": view.int("x_size").max(1),
            "y_size": view.int("y_size").max(1),
            "x_offset": view.int("x_offset").max(0),
            "y_offset": view.int("y_offset").max(0),
            "x_repeat": view.int("x_repeat").max(1),
            "y_repeat": view.int("y_repeat").max(1),
            "fill": ctx.protocol_color(&view.str("fill")),
            "outline": ctx.protocol_color(&view.str("outline")),
            "width": view.int("border_width").max(1),
            "x_end": widget.x.saturating_add(widget.width),
            "y_end": widget.y.saturating_add(widget.height),
        })
    }
}

impl WidgetExport for RectanglePattern {
    fn type_tag(&self) -> &'static str {
        "odp_rectangle_pattern"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::PROTOCOLS
    }

    fn props(&self) -> &'static [PropSpec] {
        RECTANGLE_PATTERN_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (120, 80)
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::element(view, ctx))
    }
}
