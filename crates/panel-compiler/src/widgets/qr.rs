//! QR code widget.

use qrcode::{EcLevel, QrCode};
use serde_json::{json, Value};

use crate::aggregate::{ComponentRequest, HookContext};
use crate::context::GenerationContext;
use crate::mode::{SupportedModes, TargetMode};

use super::emit;
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::str("value", "https://esphome.io"),
    PropSpec::int("scale", 0),
    PropSpec::str("ecc", "LOW"),
    PropSpec::str("color", "theme_auto"),
];

/// Module count assumed when the value cannot be encoded.
const FALLBACK_MODULES: i32 = 25;

pub struct QrCodeWidget;

fn ecc(view: &WidgetView<'_>) -> (&'static str, EcLevel) {
    match view.str("ecc").trim().to_ascii_uppercase().as_str() {
        "MEDIUM" | "M" => ("MEDIUM", EcLevel::M),
        "QUARTILE" | "Q" => ("QUARTILE", EcLevel::Q),
        "HIGH" | "H" => ("HIGH", EcLevel::H),
        _ => ("LOW", EcLevel::L),
    }
}

/// Modules per side of the encoded symbol.
fn module_count(value: &str, level: EcLevel) -> i32 {
    QrCode::with_error_correction_level(value.as_bytes(), level)
        .ok()
        .and_then(|code| i32::try_from(code.width()).ok())
        .unwrap_or(FALLBACK_MODULES)
}

/// Pixels per module: explicit `scale`, or the largest that fits the box.
fn scale(view: &WidgetView<'_>) -> i32 {
    let explicit = view.int32("scale");
    if explicit > 0 {
        return explicit;
    }
    let widget = view.widget;
    let modules = module_count(&view.str("value"), ecc(view).1).max(1);
    (widget.width.min(widget.height) / modules).max(1)
}

fn component_id(view: &WidgetView<'_>) -> String {
    format!("qr_{}", view.ident())
}

impl QrCodeWidget {
    fn protocol(view: &WidgetView<'_>, ctx: &GenerationContext<'_>) -> Value {
        let widget = view.widget;
        json!({
            "type": "qrcode",
            "data": view.str("value"),
            "x": widget.x,
            "y": widget.y,
            "boxsize": scale(view),
            "border": 1,
            "color": ctx.protocol_color(&view.str("color")),
            "bgcolor": ctx.protocol_color("transparent"),
        })
    }
}

impl WidgetExport for QrCodeWidget {
    fn type_tag(&self) -> &'static str {
        "qr_code"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (100, 100)
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let color = ctx.direct_color(&view.str("color"));
        ctx.line(format!(
            "it.qr_code({}, {}, id({}), {color}, {});",
            widget.x,
            widget.y,
            component_id(view),
            scale(view)
        ));
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let widget = view.widget;
        let mut node = serde_json::Map::new();
        node.insert("id".into(), Value::from(view.ident()));
        node.insert("x".into(), Value::from(widget.x));
        node.insert("y".into(), Value::from(widget.y));
        node.insert("size".into(), Value::from(widget.width.min(widget.height)));
        node.insert("text".into(), Value::from(view.str("value")));
        node.insert("dark_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert("light_color".into(), Value::from(ctx.retained_color("white")));
        Some(emit::node("qrcode", node))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx))
    }

    fn components(&self, view: &WidgetView<'_>, hooks: &HookContext<'_>) -> Vec<ComponentRequest> {
        if hooks.mode != TargetMode::Direct {
            return Vec::new();
        }
        let id = component_id(view);
        vec![ComponentRequest::new(
            "qr_code",
            id.clone(),
            vec![
                format!("  - id: {id}"),
                format!("    value: {}", emit::yaml_quote(&view.str("value"))),
                format!("    ecc: {}", ecc(view).0),
            ],
        )]
    }
}
