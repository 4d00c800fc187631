//! Widget catalogue.
//!
//! Every widget type implements [`WidgetExport`]: up to four backend
//! emitters, a requirements pre-pass and the aggregation hooks. Handlers are
//! stateless and looked up by type tag in a process-wide table; all per-pass
//! state lives in the [`GenerationContext`] they borrow.

#![allow(missing_docs)]

mod calendar;
mod controls;
mod datetime;
mod emit;
mod graph;
mod icon;
mod image;
mod lvgl;
mod meters;
mod progress;
mod protocol_shapes;
mod qr;
pub mod schema;
mod sensor_text;
mod shapes;
mod text;
pub mod tiers;
mod touch;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use panel_syntax::MarkerRecord;
use serde_json::Value;
use smol_str::SmolStr;

use crate::aggregate::{ComponentRequest, GlobalRequest, HookContext, SensorRequest};
use crate::condition::Condition;
use crate::context::GenerationContext;
use crate::mode::SupportedModes;
use crate::model::{clamp_i32, value_to_i64, Widget};

pub use emit::Flavor;
pub use icon::icon_name;
pub use schema::{PropDefault, PropSpec, WidgetView};

/// Export contract of one widget type.
pub trait WidgetExport: Send + Sync {
    fn type_tag(&self) -> &'static str;

    fn supported_modes(&self) -> SupportedModes;

    /// Prop table: defaults, marker fields and import fields.
    fn props(&self) -> &'static [PropSpec];

    /// Size used when a marker omits `w`/`h`.
    fn default_size(&self) -> (i32, i32) {
        (100, 30)
    }

    /// Registers every font and glyph the widget may emit, independent of
    /// runtime state. Runs before the backend emitter.
    fn collect_requirements(&self, _view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) {}

    /// Appends display-lambda statements to the context line buffer.
    fn export_direct(&self, _view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) {}

    /// One LVGL root node.
    fn export_retained(&self, _view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        None
    }

    /// `None` when the widget has no OpenEPaperLink form.
    fn export_protocol_a(&self, _view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        None
    }

    /// `None` when the widget has no OpenDisplay form.
    fn export_protocol_b(&self, _view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        None
    }

    fn sensors(&self, _view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        Vec::new()
    }

    fn components(&self, _view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<ComponentRequest> {
        Vec::new()
    }

    fn globals(&self, _view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<GlobalRequest> {
        Vec::new()
    }
}

type Handler = Box<dyn WidgetExport>;

static REGISTRY: Lazy<IndexMap<&'static str, Handler>> = Lazy::new(|| {
    let handlers: Vec<Handler> = vec![
        Box::new(text::Text),
        Box::new(sensor_text::SensorText),
        Box::new(datetime::DateTime),
        Box::new(icon::Icon),
        Box::new(icon::WeatherIcon),
        Box::new(meters::BatteryIcon),
        Box::new(meters::WifiSignal),
        Box::new(progress::ProgressBar),
        Box::new(qr::QrCodeWidget),
        Box::new(shapes::ShapeRect),
        Box::new(shapes::RoundedRect),
        Box::new(shapes::ShapeCircle),
        Box::new(shapes::Line),
        Box::new(image::Image),
        Box::new(image::OnlineImage),
        Box::new(touch::TouchArea),
        Box::new(calendar::Calendar),
        Box::new(graph::Graph),
        Box::new(controls::Button),
        Box::new(controls::Label),
        Box::new(controls::Arc),
        Box::new(controls::Bar),
        Box::new(controls::Slider),
        Box::new(controls::Switch),
        Box::new(controls::Checkbox),
        Box::new(controls::Led),
        Box::new(lvgl::Meter),
        Box::new(lvgl::Chart),
        Box::new(lvgl::Dropdown),
        Box::new(lvgl::Roller),
        Box::new(lvgl::Textarea),
        Box::new(lvgl::QrCode),
        Box::new(lvgl::Img),
        Box::new(lvgl::Line),
        Box::new(lvgl::Obj),
        Box::new(lvgl::ButtonMatrix),
        Box::new(lvgl::Keyboard),
        Box::new(lvgl::Spinbox),
        Box::new(lvgl::Tabview),
        Box::new(lvgl::Tileview),
        Box::new(protocol_shapes::Ellipse),
        Box::new(protocol_shapes::Polygon),
        Box::new(protocol_shapes::Multiline),
        Box::new(protocol_shapes::ArcOutline),
        Box::new(protocol_shapes::DebugGrid),
        Box::new(protocol_shapes::Plot),
        Box::new(protocol_shapes::IconSequence),
        Box::new(protocol_shapes::RectanglePattern),
    ];
    handlers
        .into_iter()
        .map(|handler| (handler.type_tag(), handler))
        .collect()
});

/// `alias -> (type, prop defaults applied on normalisation)`
const ALIASES: &[(&str, &str, &[(&str, &str)])] = &[
    ("label", "text", &[]),
    ("rectangle", "shape_rect", &[]),
    ("rrect", "rounded_rect", &[]),
    ("circle", "shape_circle", &[]),
    ("qrcode", "qr_code", &[]),
    ("progress", "progress_bar", &[]),
    ("puppet", "online_image", &[]),
    ("nav_next_page", "touch_area", &[("action", "next_page")]),
    ("nav_previous_page", "touch_area", &[("action", "prev_page")]),
    ("nav_reload_page", "touch_area", &[("action", "reload_page")]),
    ("multiline", "odp_multiline", &[]),
    ("polygon", "odp_polygon", &[]),
    ("ellipse", "odp_ellipse", &[]),
    ("arc", "odp_arc", &[]),
];

/// Handler for a type tag. Aliases are not resolved here.
#[must_use]
pub fn lookup(type_tag: &str) -> Option<&'static dyn WidgetExport> {
    REGISTRY.get(type_tag).map(Box::as_ref)
}

/// All handlers in catalogue order.
pub fn registered() -> impl Iterator<Item = &'static dyn WidgetExport> {
    REGISTRY.values().map(Box::as_ref)
}

/// Aliases that normalise to `type_tag`.
#[must_use]
pub fn aliases_of(type_tag: &str) -> Vec<&'static str> {
    ALIASES
        .iter()
        .filter(|(_, target, _)| *target == type_tag)
        .map(|(alias, _, _)| *alias)
        .collect()
}

/// Rewrites an alias type to its canonical tag, filling alias-implied props
/// the widget does not already set.
pub fn normalize_alias(widget: &mut Widget) {
    let Some((_, target, defaults)) = ALIASES
        .iter()
        .find(|(alias, _, _)| *alias == widget.widget_type.as_str())
    else {
        return;
    };
    widget.widget_type = SmolStr::new(target);
    for (key, value) in *defaults {
        if !widget.props.contains(key) {
            widget.props.insert(key, Value::from(*value));
        }
    }
}

/// Rebuilds a widget from its marker. `None` for unknown types.
#[must_use]
pub fn widget_from_marker(marker: &MarkerRecord) -> Option<Widget> {
    let mut widget = Widget::new("", marker.widget_type(), 0, 0, 0, 0);
    normalize_alias(&mut widget);
    let handler = lookup(&widget.widget_type)?;
    let (default_w, default_h) = handler.default_size();
    let number = |key: &str| {
        marker
            .get(key)
            .and_then(|raw| value_to_i64(&Value::String(raw.to_string())))
            .map(clamp_i32)
    };
    widget.id = SmolStr::new(marker.get("id").unwrap_or_default());
    widget.x = number("x").unwrap_or(0);
    widget.y = number("y").unwrap_or(0);
    widget.width = number("w").unwrap_or(default_w);
    widget.height = number("h").unwrap_or(default_h);
    widget.entity_id = marker.get("ent").map(str::to_string);
    widget.title = marker.get("title").map(str::to_string);
    schema::read_marker_props(marker, handler.props(), &mut widget);
    Condition::read_marker(marker, &mut widget);
    Some(widget)
}
