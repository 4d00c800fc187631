//! Emission helpers shared by the widget handlers.

use serde_json::{json, Map, Value};

use crate::condition::cpp_escape;
use crate::context::GenerationContext;
use crate::layout::TextAlign;

use super::schema::WidgetView;

/// Which drawing protocol an element is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// OpenEPaperLink.
    A,
    /// OpenDisplay.
    B,
}

/// Font file the drawing protocols render text with.
pub const PROTOCOL_FONT: &str = "ppb.ttf";

/// `it.print(...)` with a C++ string literal.
pub fn print(x: i32, y: i32, font: &str, color: &str, align: TextAlign, text: &str) -> String {
    format!(
        "it.print({x}, {y}, id({font}), {color}, {}, \"{}\");",
        align.esphome(),
        cpp_escape(text)
    )
}

/// `it.printf(...)` with a format string and arguments.
pub fn printf(x: i32, y: i32, font: &str, color: &str, align: TextAlign, format: &str, args: &str) -> String {
    format!(
        "it.printf({x}, {y}, id({font}), {color}, {}, \"{format}\", {args});",
        align.esphome()
    )
}

/// C++ printf literal text: escaped and with `%` doubled.
pub fn printf_literal(text: &str) -> String {
    cpp_escape(text).replace('%', "%%")
}

/// Glyph character of a hex codepoint.
pub fn glyph(code: &str) -> String {
    u32::from_str_radix(code, 16)
        .ok()
        .and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_default()
}

/// Value the YAML writer emits as a `!lambda` block.
pub fn lambda(code: impl AsRef<str>) -> Value {
    Value::String(format!("!lambda {}", code.as_ref()))
}

/// `id`, `x`, `y`, `width`, `height` of an LVGL node.
pub fn geometry(view: &WidgetView<'_>) -> Map<String, Value> {
    let widget = view.widget;
    let mut node = Map::new();
    node.insert("id".into(), Value::from(view.ident()));
    node.insert("x".into(), Value::from(widget.x));
    node.insert("y".into(), Value::from(widget.y));
    node.insert("width".into(), Value::from(widget.width));
    node.insert("height".into(), Value::from(widget.height));
    node
}

/// `{ "<kind>": node }`
pub fn node(kind: &str, node: Map<String, Value>) -> Value {
    let mut root = Map::new();
    root.insert(kind.to_string(), Value::Object(node));
    Value::Object(root)
}

/// Transparent container used for multi-part widgets.
pub fn container(view: &WidgetView<'_>, children: Vec<Value>) -> Value {
    let mut obj = geometry(view);
    obj.insert("bg_opa".into(), Value::from("TRANSP"));
    obj.insert("border_width".into(), Value::from(0));
    obj.insert("pad_all".into(), Value::from(0));
    obj.insert("widgets".into(), Value::Array(children));
    node("obj", obj)
}

/// Child label positioned at `y` inside a container, horizontally centered.
pub fn child_label(id: &str, y: i32, text: Value, font: &str, color: &str) -> Value {
    let mut label = Map::new();
    label.insert("id".into(), Value::from(id));
    label.insert("align".into(), Value::from("TOP_MID"));
    label.insert("y".into(), Value::from(y));
    label.insert("text".into(), text);
    label.insert("text_font".into(), Value::from(font));
    label.insert("text_color".into(), Value::from(color));
    node("label", label)
}

/// Protocol text element.
#[allow(clippy::too_many_arguments)]
pub fn protocol_text(
    flavor: Flavor,
    ctx: &GenerationContext<'_>,
    value: &str,
    (x, y): (i32, i32),
    size: u32,
    color_token: &str,
    align: TextAlign,
    max_width: Option<i32>,
) -> Value {
    let mut element = json!({
        "type": "text",
        "value": value,
        "x": x,
        "y": y,
        "size": size,
        "color": ctx.protocol_color(color_token),
        "anchor": align.protocol_anchor(),
        "font": PROTOCOL_FONT,
    });
    if flavor == Flavor::A {
        if let Some(object) = element.as_object_mut() {
            if let Some(width) = max_width {
                object.insert("max_width".into(), Value::from(width));
            }
            object.insert("spacing".into(), Value::from(4));
            object.insert("align".into(), Value::from(align.horizontal_name()));
        }
    }
    element
}

/// Protocol icon element; the color key differs between the protocols.
pub fn protocol_icon(
    flavor: Flavor,
    ctx: &GenerationContext<'_>,
    name: &str,
    (x, y): (i32, i32),
    size: u32,
    color_token: &str,
) -> Value {
    let color_key = match flavor {
        Flavor::A => "color",
        Flavor::B => "fill",
    };
    let mut element = Map::new();
    element.insert("type".into(), Value::from("icon"));
    element.insert("value".into(), Value::from(name));
    element.insert("x".into(), Value::from(x));
    element.insert("y".into(), Value::from(y));
    element.insert("size".into(), Value::from(size));
    element.insert(color_key.into(), Value::from(ctx.protocol_color(color_token)));
    element.insert("anchor".into(), Value::from("mt"));
    Value::Object(element)
}

/// Jinja read of an entity's state.
pub fn jinja_state(entity_id: &str) -> String {
    format!("states('{entity_id}')")
}

/// Array value when more than one element is produced.
pub fn elements(mut items: Vec<Value>) -> Option<Value> {
    match items.len() {
        0 => None,
        1 => items.pop(),
        _ => Some(Value::Array(items)),
    }
}

/// Double-quoted YAML scalar.
pub fn yaml_quote(text: &str) -> String {
    Value::from(text).to_string()
}
