//! Retained-only LVGL widgets without a Home Assistant action.
//!
//! List-valued props travel as delimited strings so they fit on one marker
//! line: options and tab names one per line, button rows as `a,b;c,d`.

use serde_json::{json, Map, Value};

use crate::aggregate::{HookContext, SensorRequest};
use crate::context::GenerationContext;
use crate::mode::SupportedModes;

use super::controls::numeric_request;
use super::emit;
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const METER_PROPS: &[PropSpec] = &[
    PropSpec::int("value", 0),
    PropSpec::int("min", 0),
    PropSpec::int("max", 100),
    PropSpec::str("bg_color", "#d3d3d3"),
    PropSpec::str("color", "black"),
    PropSpec::str("indicator_color", "red"),
    PropSpec::int("tick_count", 11),
    PropSpec::int("tick_length", 10),
    PropSpec::int("scale_width", 10),
    PropSpec::int("indicator_width", 4),
    PropSpec::int("label_gap", 10),
    PropSpec::int("opa", 255),
];

const CHART_PROPS: &[PropSpec] = &[
    PropSpec::str("title", "Chart"),
    PropSpec::str("chart_type", "line"),
    PropSpec::str("color", "blue"),
    PropSpec::str("bg_color", "white"),
    PropSpec::int("point_count", 10),
    PropSpec::int("x_div_lines", 3),
    PropSpec::int("y_div_lines", 3),
    PropSpec::int("opa", 255),
];

const DROPDOWN_PROPS: &[PropSpec] = &[
    PropSpec::str("options", "Option 1\nOption 2\nOption 3"),
    PropSpec::int("selected_index", 0),
    PropSpec::str("color", "black"),
    PropSpec::str("direction", "DOWN"),
    PropSpec::int("max_height", 200),
    PropSpec::int("opa", 255),
];

const ROLLER_PROPS: &[PropSpec] = &[
    PropSpec::str("options", "Option A\nOption B\nOption C"),
    PropSpec::int("selected_index", 0),
    PropSpec::int("visible_row_count", 3),
    PropSpec::str("bg_color", "white"),
    PropSpec::str("color", "black"),
    PropSpec::str("selected_bg_color", "blue"),
    PropSpec::str("selected_text_color", "white"),
    PropSpec::str("mode", "normal"),
    PropSpec::int("opa", 255),
];

const TEXTAREA_PROPS: &[PropSpec] = &[
    PropSpec::str("text", ""),
    PropSpec::str("placeholder", "Enter text..."),
    PropSpec::int("max_length", 128),
    PropSpec::bool("one_line", false),
    PropSpec::bool("password_mode", false),
];

const QRCODE_PROPS: &[PropSpec] = &[
    PropSpec::str("text", "https://esphome.io"),
    PropSpec::str("color", "black"),
    PropSpec::str("bg_color", "white"),
];

const IMG_PROPS: &[PropSpec] = &[
    PropSpec::str("src", "symbol_image"),
    PropSpec::int("rotation", 0),
    PropSpec::str("color", "black"),
    PropSpec::int("pivot_x", 0),
    PropSpec::int("pivot_y", 0),
];

const LINE_PROPS: &[PropSpec] = &[
    PropSpec::str("points", ""),
    PropSpec::int("line_width", 3),
    PropSpec::str("line_color", "black"),
    PropSpec::str("orientation", "horizontal"),
    PropSpec::bool("line_rounded", true),
    PropSpec::int("opa", 255),
];

const OBJ_PROPS: &[PropSpec] = &[
    PropSpec::str("color", "white"),
    PropSpec::same_as("bg_color", "color"),
    PropSpec::str("border_color", "gray"),
    PropSpec::int("border_width", 1),
    PropSpec::int("radius", 0),
    PropSpec::bool("fill", true),
    PropSpec::int("opa", 255),
];

const BUTTONMATRIX_PROPS: &[PropSpec] = &[
    PropSpec::str("rows", "1,2,3;4,5,6;7,8,9;*,0,#"),
    PropSpec::str("bg_color", "#444444"),
    PropSpec::str("color", "white"),
    PropSpec::int("opa", 255),
];

const KEYBOARD_PROPS: &[PropSpec] = &[PropSpec::str("mode", "TEXT_LOWER"), PropSpec::int("opa", 255)];

const SPINBOX_PROPS: &[PropSpec] = &[
    PropSpec::int("value", 0),
    PropSpec::int("digit_count", 4),
    PropSpec::int("step", 1),
];

const TABVIEW_PROPS: &[PropSpec] = &[
    PropSpec::str("tabs", "Page 1\nPage 2\nPage 3"),
    PropSpec::str("tab_pos", "TOP"),
    PropSpec::int("tab_size", 10),
    PropSpec::str("bg_color", "white"),
];

const TILEVIEW_PROPS: &[PropSpec] = &[PropSpec::str("bg_color", "white")];

/// LVGL opacity: `COVER` at 255 and above, `TRANSP` at 0 and below, a
/// percentage between.
fn opacity(view: &WidgetView<'_>) -> Value {
    match view.int("opa") {
        opa if opa >= 255 => Value::from("COVER"),
        opa if opa <= 0 => Value::from("TRANSP"),
        opa => Value::from(format!("{}%", (opa * 100 + 127) / 255)),
    }
}

/// Non-blank lines of a prop, trimmed.
fn lines_of(view: &WidgetView<'_>, key: &str) -> Vec<String> {
    view.str(key)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Index lambda for a widget bound to a numeric entity.
fn selected_index(view: &WidgetView<'_>, request: Option<&SensorRequest>) -> Value {
    match request {
        Some(request) => emit::lambda(format!("return (int)id({}).state;", request.id)),
        None => Value::from(view.int("selected_index").max(0)),
    }
}

fn refreshed_numeric(view: &WidgetView<'_>) -> Vec<SensorRequest> {
    numeric_request(view)
        .map(|request| request.refreshing(&view.ident()))
        .into_iter()
        .collect()
}

pub struct Meter;

impl WidgetExport for Meter {
    fn type_tag(&self) -> &'static str {
        "lvgl_meter"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        METER_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (140, 140)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let color = ctx.retained_color(&view.str("color"));
        let count = view.int("tick_count").max(2);
        let length = view.int("tick_length").max(1);
        let value = match numeric_request(view) {
            Some(request) => emit::lambda(format!("return id({}).state;", request.id)),
            None => Value::from(view.int("value")),
        };
        let indicator = json!({
            "line": {
                "id": view.ident_with("_ind"),
                "value": value,
                "color": ctx.retained_color(&view.str("indicator_color")),
                "width": view.int("indicator_width").max(1),
                "r_mod": view.int("scale_width").saturating_neg(),
            }
        });
        let scale = json!({
            "range_from": view.int("min"),
            "range_to": view.int("max"),
            "angle_range": 270,
            "rotation": 135,
            "ticks": {
                "count": count,
                "length": length,
                "width": 2,
                "color": color,
                "major": {
                    "stride": (count / 5).max(1),
                    "length": length.saturating_add(5),
                    "width": 3,
                    "color": color,
                    "label_gap": view.int("label_gap"),
                },
            },
            "indicators": [indicator],
        });
        let mut node = emit::geometry(view);
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert("opa".into(), opacity(view));
        node.insert("scales".into(), Value::Array(vec![scale]));
        Some(emit::node("meter", node))
    }

    /// The needle is moved directly instead of refreshing the whole meter.
    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        numeric_request(view)
            .map(|request| {
                request.refresh(format!(
                    "- lvgl.indicator.update:\n    id: {}\n    value: !lambda \"return x;\"",
                    view.ident_with("_ind")
                ))
            })
            .into_iter()
            .collect()
    }
}

pub struct Chart;

impl WidgetExport for Chart {
    fn type_tag(&self) -> &'static str {
        "lvgl_chart"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        CHART_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 150)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let color = ctx.retained_color(&view.str("color"));
        let y_lines = view.int("y_div_lines").max(0);
        let mut node = emit::geometry(view);
        node.insert("type".into(), Value::from(view.str("chart_type").trim().to_ascii_uppercase()));
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert("border_color".into(), Value::from(color.as_str()));
        node.insert("border_width".into(), Value::from(1));
        node.insert("opa".into(), opacity(view));
        node.insert("point_count".into(), Value::from(view.int("point_count").max(1)));
        node.insert(
            "div_line_count".into(),
            json!({ "x": view.int("x_div_lines").max(0), "y": y_lines }),
        );
        node.insert("series".into(), json!([{ "color": color }]));
        node.insert("y_axis".into(), json!({ "show_labels": true, "num_ticks": y_lines.saturating_add(1) }));
        let title = json!({
            "label": { "align": "TOP_MID", "text": view.str("title"), "text_color": color }
        });
        node.insert("widgets".into(), Value::Array(vec![title]));
        Some(emit::node("lv_chart", node))
    }
}

pub struct Dropdown;

impl Dropdown {
    fn direction(raw: &str) -> String {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DOWN" | "" => "BOTTOM".to_string(),
            "UP" => "TOP".to_string(),
            other => other.to_string(),
        }
    }
}

impl WidgetExport for Dropdown {
    fn type_tag(&self) -> &'static str {
        "lvgl_dropdown"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        DROPDOWN_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (150, 40)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let request = numeric_request(view);
        let mut node = emit::geometry(view);
        node.insert("options".into(), json!(lines_of(view, "options")));
        node.insert("selected_index".into(), selected_index(view, request.as_ref()));
        node.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert("dir".into(), Value::from(Self::direction(&view.str("direction"))));
        node.insert(
            "dropdown_list".into(),
            json!({ "max_height": view.int("max_height").max(1) }),
        );
        node.insert("opa".into(), opacity(view));
        Some(emit::node("dropdown", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        refreshed_numeric(view)
    }
}

pub struct Roller;

impl WidgetExport for Roller {
    fn type_tag(&self) -> &'static str {
        "lvgl_roller"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        ROLLER_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (120, 100)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let request = numeric_request(view);
        let mut node = emit::geometry(view);
        node.insert("options".into(), json!(lines_of(view, "options")));
        node.insert("selected_index".into(), selected_index(view, request.as_ref()));
        node.insert("visible_row_count".into(), Value::from(view.int("visible_row_count").max(1)));
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert(
            "selected".into(),
            json!({
                "bg_color": ctx.retained_color(&view.str("selected_bg_color")),
                "text_color": ctx.retained_color(&view.str("selected_text_color")),
            }),
        );
        node.insert("mode".into(), Value::from(view.str("mode").trim().to_ascii_uppercase()));
        node.insert("opa".into(), opacity(view));
        Some(emit::node("roller", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        refreshed_numeric(view)
    }
}

pub struct Textarea;

impl WidgetExport for Textarea {
    fn type_tag(&self) -> &'static str {
        "lvgl_textarea"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        TEXTAREA_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 80)
    }

    fn export_retained(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut node = emit::geometry(view);
        node.insert("placeholder_text".into(), Value::from(view.str("placeholder")));
        node.insert("text".into(), Value::from(view.str("text")));
        node.insert("max_length".into(), Value::from(view.int("max_length").max(0)));
        node.insert("one_line".into(), Value::Bool(view.bool("one_line")));
        node.insert("password_mode".into(), Value::Bool(view.bool("password_mode")));
        Some(emit::node("textarea", node))
    }
}

pub struct QrCode;

impl QrCode {
    fn request(view: &WidgetView<'_>) -> Option<SensorRequest> {
        view.entity().map(SensorRequest::text)
    }
}

impl WidgetExport for QrCode {
    fn type_tag(&self) -> &'static str {
        "lvgl_qrcode"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        QRCODE_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (130, 130)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let widget = view.widget;
        let text = match Self::request(view) {
            Some(request) => emit::lambda(format!("return id({}).state.c_str();", request.id)),
            None => Value::from(view.str("text")),
        };
        let mut node = emit::geometry(view);
        node.insert("text".into(), text);
        node.insert("size".into(), Value::from(widget.width.min(widget.height).max(1)));
        node.insert("dark_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert("light_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        Some(emit::node("qrcode", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        Self::request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

pub struct Img;

impl WidgetExport for Img {
    fn type_tag(&self) -> &'static str {
        "lvgl_img"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        IMG_PROPS
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut src = view.str("src").trim().to_string();
        if src.is_empty() {
            src.push_str("symbol_image");
        }
        let mut node = emit::geometry(view);
        node.insert("src".into(), Value::from(src));
        node.insert("angle".into(), Value::from(view.int("rotation")));
        node.insert("pivot_x".into(), Value::from(view.int("pivot_x")));
        node.insert("pivot_y".into(), Value::from(view.int("pivot_y")));
        node.insert("image_recolor".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert("image_recolor_opa".into(), Value::from("COVER"));
        Some(emit::node("image", node))
    }
}

pub struct Line;

impl Line {
    /// Explicit `x,y x,y` points, or a full-length stroke along the
    /// orientation. Points are relative to the widget.
    fn points(view: &WidgetView<'_>) -> Vec<Value> {
        let raw = view.str("points");
        let explicit: Vec<Value> = raw
            .split_whitespace()
            .filter_map(|pair| {
                let (x, y) = pair.split_once(',')?;
                let x = x.trim().parse::<f64>().ok()?;
                let y = y.trim().parse::<f64>().ok()?;
                #[allow(clippy::cast_possible_truncation)]
                Some(json!({ "x": x.round() as i64, "y": y.round() as i64 }))
            })
            .collect();
        if explicit.len() >= 2 {
            return explicit;
        }
        let widget = view.widget;
        let end = if view.str("orientation").trim().eq_ignore_ascii_case("vertical") {
            json!({ "x": 0, "y": widget.height })
        } else {
            json!({ "x": widget.width, "y": 0 })
        };
        vec![json!({ "x": 0, "y": 0 }), end]
    }
}

impl WidgetExport for Line {
    fn type_tag(&self) -> &'static str {
        "lvgl_line"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        LINE_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (100, 3)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut node = emit::geometry(view);
        node.insert("points".into(), Value::Array(Self::points(view)));
        node.insert("line_width".into(), Value::from(view.int("line_width").max(1)));
        node.insert("line_color".into(), Value::from(ctx.retained_color(&view.str("line_color"))));
        node.insert("line_rounded".into(), Value::Bool(view.bool("line_rounded")));
        node.insert("opa".into(), opacity(view));
        Some(emit::node("line", node))
    }
}

/// Plain styled rectangle.
pub struct Obj;

impl WidgetExport for Obj {
    fn type_tag(&self) -> &'static str {
        "lvgl_obj"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        OBJ_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (100, 100)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut node = emit::geometry(view);
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        let fill = if view.bool("fill") { "COVER" } else { "TRANSP" };
        node.insert("bg_opa".into(), Value::from(fill));
        node.insert("border_width".into(), Value::from(view.int("border_width").max(0)));
        node.insert("border_color".into(), Value::from(ctx.retained_color(&view.str("border_color"))));
        node.insert("radius".into(), Value::from(view.int("radius").max(0)));
        node.insert("opa".into(), opacity(view));
        Some(emit::node("obj", node))
    }
}

pub struct ButtonMatrix;

impl ButtonMatrix {
    /// `a,b;c,d` as LVGL rows of `{text}` buttons. Empty rows are dropped.
    fn rows(raw: &str) -> Vec<Value> {
        raw.split(';')
            .map(|row| {
                row.split(',')
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(|text| json!({ "text": text }))
                    .collect::<Vec<_>>()
            })
            .filter(|buttons| !buttons.is_empty())
            .map(|buttons| json!({ "buttons": buttons }))
            .collect()
    }
}

impl WidgetExport for ButtonMatrix {
    fn type_tag(&self) -> &'static str {
        "lvgl_buttonmatrix"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        BUTTONMATRIX_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 200)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut node = emit::geometry(view);
        node.insert("rows".into(), Value::Array(Self::rows(&view.str("rows"))));
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert("opa".into(), opacity(view));
        Some(emit::node("buttonmatrix", node))
    }
}

pub struct Keyboard;

impl WidgetExport for Keyboard {
    fn type_tag(&self) -> &'static str {
        "lvgl_keyboard"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        KEYBOARD_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (300, 120)
    }

    fn export_retained(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut node = emit::geometry(view);
        let mut mode = view.str("mode").trim().to_ascii_uppercase();
        if mode.is_empty() {
            mode.push_str("TEXT_LOWER");
        }
        node.insert("mode".into(), Value::from(mode));
        node.insert("opa".into(), opacity(view));
        Some(emit::node("keyboard", node))
    }
}

pub struct Spinbox;

impl WidgetExport for Spinbox {
    fn type_tag(&self) -> &'static str {
        "lvgl_spinbox"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        SPINBOX_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (120, 40)
    }

    fn export_retained(&self, view: &WidgetView<'_>, _ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let value = match numeric_request(view) {
            Some(request) => emit::lambda(format!("return (int)id({}).state;", request.id)),
            None => Value::from(view.int("value")),
        };
        let mut node = emit::geometry(view);
        node.insert("value".into(), value);
        node.insert("digits".into(), Value::from(view.int("digit_count").clamp(1, 10)));
        node.insert("step".into(), Value::from(view.int("step").max(1)));
        Some(emit::node("spinbox", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        refreshed_numeric(view)
    }
}

pub struct Tabview;

impl Tabview {
    /// Tab names one per line; a single line may list them with commas.
    fn names(view: &WidgetView<'_>) -> Vec<String> {
        let raw = view.str("tabs");
        let names: Vec<String> = if raw.contains('\n') {
            lines_of(view, "tabs")
        } else {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        };
        if names.is_empty() {
            vec!["Tab 1".to_string(), "Tab 2".to_string()]
        } else {
            names
        }
    }
}

impl WidgetExport for Tabview {
    fn type_tag(&self) -> &'static str {
        "lvgl_tabview"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        TABVIEW_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (300, 200)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let tabs: Vec<Value> = Self::names(view)
            .into_iter()
            .map(|name| json!({ "name": name, "widgets": [] }))
            .collect();
        let mut node = emit::geometry(view);
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert("position".into(), Value::from(view.str("tab_pos").trim().to_ascii_uppercase()));
        node.insert("size".into(), Value::from(format!("{}%", view.int("tab_size").clamp(1, 100))));
        node.insert("tabs".into(), Value::Array(tabs));
        Some(emit::node("tabview", node))
    }
}

pub struct Tileview;

impl WidgetExport for Tileview {
    fn type_tag(&self) -> &'static str {
        "lvgl_tileview"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        TILEVIEW_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (300, 200)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut tile = Map::new();
        tile.insert("row".into(), Value::from(0));
        tile.insert("column".into(), Value::from(0));
        tile.insert("widgets".into(), Value::Array(Vec::new()));
        let mut node = emit::geometry(view);
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert("tiles".into(), Value::Array(vec![Value::Object(tile)]));
        Some(emit::node("tileview", node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Widget;

    #[test]
    fn opacity_levels() {
        let view_of = |opa: i64| Widget::new("o", "lvgl_obj", 0, 0, 10, 10).with_prop("opa", opa);
        let cases = [(255, "COVER"), (300, "COVER"), (0, "TRANSP"), (128, "50%")];
        for (opa, expected) in cases {
            let widget = view_of(opa);
            assert_eq!(opacity(&WidgetView::new(&widget, OBJ_PROPS)), Value::from(expected));
        }
    }

    #[test]
    fn matrix_rows_skip_blanks() {
        assert_eq!(
            ButtonMatrix::rows("1, 2;;*,#"),
            vec![
                json!({ "buttons": [{ "text": "1" }, { "text": "2" }] }),
                json!({ "buttons": [{ "text": "*" }, { "text": "#" }] }),
            ]
        );
    }

    #[test]
    fn dropdown_directions() {
        assert_eq!(Dropdown::direction("down"), "BOTTOM");
        assert_eq!(Dropdown::direction("UP"), "TOP");
        assert_eq!(Dropdown::direction("LEFT"), "LEFT");
    }

    #[test]
    fn comma_separated_tabs() {
        let widget = Widget::new("t", "lvgl_tabview", 0, 0, 10, 10).with_prop("tabs", "A, B,");
        assert_eq!(Tabview::names(&WidgetView::new(&widget, TABVIEW_PROPS)), vec!["A", "B"]);
    }

    #[test]
    fn line_points_fall_back_to_the_orientation() {
        let widget = Widget::new("l", "lvgl_line", 0, 0, 40, 80).with_prop("orientation", "vertical");
        let points = Line::points(&WidgetView::new(&widget, LINE_PROPS));
        assert_eq!(points, vec![json!({ "x": 0, "y": 0 }), json!({ "x": 0, "y": 80 })]);
    }
}
