//! Interactive LVGL controls.
//!
//! These have no drawing-protocol or display-lambda form. Bound entities are
//! read through the sensor ledger and refreshed through the trigger map.

use serde_json::{json, Map, Value};

use crate::aggregate::{domain_kind, HookContext, SensorKind, SensorRequest};
use crate::context::GenerationContext;
use crate::mode::SupportedModes;

use super::emit;
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const BUTTON_PROPS: &[PropSpec] = &[
    PropSpec::str("text", "Button"),
    PropSpec::str("bg_color", "white"),
    PropSpec::str("color", "black"),
    PropSpec::int("border_width", 2),
    PropSpec::int("radius", 5),
];

const LABEL_PROPS: &[PropSpec] = &[
    PropSpec::str("text", "Label"),
    PropSpec::int("font_size", 20),
    PropSpec::str("font_family", "Roboto"),
    PropSpec::str("color", "theme_auto"),
    PropSpec::str("text_align", "CENTER"),
];

const ARC_PROPS: &[PropSpec] = &[
    PropSpec::int("value", 50),
    PropSpec::int("min", 0),
    PropSpec::int("max", 100),
    PropSpec::int("thickness", 10),
    PropSpec::str("color", "blue"),
    PropSpec::int("start_angle", 135),
    PropSpec::int("end_angle", 45),
    PropSpec::str("mode", "normal"),
];

const BAR_PROPS: &[PropSpec] = &[
    PropSpec::int("value", 50),
    PropSpec::int("min", 0),
    PropSpec::int("max", 100),
    PropSpec::str("color", "blue"),
    PropSpec::str("bg_color", "gray"),
];

const SLIDER_PROPS: &[PropSpec] = &[
    PropSpec::int("value", 30),
    PropSpec::int("min", 0),
    PropSpec::int("max", 100),
    PropSpec::str("color", "blue"),
];

const SWITCH_PROPS: &[PropSpec] = &[PropSpec::bool("checked", false), PropSpec::str("color", "blue")];

const CHECKBOX_PROPS: &[PropSpec] = &[
    PropSpec::str("text", "Checkbox"),
    PropSpec::bool("checked", false),
    PropSpec::str("color", "blue"),
];

const LED_PROPS: &[PropSpec] = &[PropSpec::str("color", "red"), PropSpec::int("brightness", 100)];

fn domain(entity_id: &str) -> &str {
    entity_id.split_once('.').map_or("", |(domain, _)| domain)
}

/// `homeassistant.service` action.
fn service(name: &str, data: Map<String, Value>) -> Value {
    json!([{ "homeassistant.service": { "service": name, "data": data } }])
}

fn entity_data(entity_id: &str) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("entity_id".into(), Value::from(entity_id));
    data
}

/// Service a button press calls for an entity's domain.
fn press_service(entity_id: &str) -> String {
    match domain(entity_id) {
        "button" | "input_button" => format!("{}.press", domain(entity_id)),
        "script" | "scene" => format!("{}.turn_on", domain(entity_id)),
        _ => "homeassistant.toggle".to_string(),
    }
}

pub(super) fn numeric_request(view: &WidgetView<'_>) -> Option<SensorRequest> {
    view.entity()
        .filter(|entity| domain_kind(entity).is_none())
        .map(SensorRequest::numeric)
}

fn binary_request(view: &WidgetView<'_>) -> Option<SensorRequest> {
    view.entity().map(SensorRequest::binary)
}

/// Value prop, or a lambda reading the bound sensor.
fn value_or_state(view: &WidgetView<'_>, request: Option<&SensorRequest>) -> Value {
    match request {
        Some(request) => emit::lambda(format!("return id({}).state;", request.id)),
        None => Value::from(view.int("value")),
    }
}

fn range(view: &WidgetView<'_>, node: &mut Map<String, Value>) {
    node.insert("min_value".into(), Value::from(view.int("min")));
    node.insert("max_value".into(), Value::from(view.int("max")));
}

fn checked(view: &WidgetView<'_>, request: Option<&SensorRequest>) -> Value {
    let checked = match request {
        Some(request) => emit::lambda(format!("return id({}).state;", request.id)),
        None => Value::Bool(view.bool("checked")),
    };
    json!({ "checked": checked })
}

pub struct Button;

impl WidgetExport for Button {
    fn type_tag(&self) -> &'static str {
        "lvgl_button"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        BUTTON_PROPS
    }

    fn collect_requirements(&self, _view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        ctx.font("Roboto", 400, 20, false);
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let mut node = emit::geometry(view);
        let text_color = ctx.retained_color(&view.str("color"));
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert("border_width".into(), Value::from(view.int("border_width").max(0)));
        node.insert("border_color".into(), Value::from(text_color.clone()));
        node.insert("radius".into(), Value::from(view.int("radius").max(0)));
        let label = json!({
            "label": {
                "align": "CENTER",
                "text": view.str("text"),
                "text_font": ctx.font("Roboto", 400, 20, false).as_str(),
                "text_color": text_color,
            }
        });
        node.insert("widgets".into(), Value::Array(vec![label]));
        if let Some(entity) = view.entity() {
            node.insert("on_click".into(), service(&press_service(entity), entity_data(entity)));
        }
        Some(emit::node("button", node))
    }
}

pub struct Label;

impl Label {
    fn request(view: &WidgetView<'_>) -> Option<SensorRequest> {
        let entity = view.entity()?;
        Some(match domain_kind(entity) {
            Some(kind) => SensorRequest::new(kind, entity),
            None => SensorRequest::numeric(entity),
        })
    }
}

impl WidgetExport for Label {
    fn type_tag(&self) -> &'static str {
        "lvgl_label"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        LABEL_PROPS
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        ctx.font(&view.str("font_family"), 400, view.size("font_size", 1), false);
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let font = ctx.font(&view.str("font_family"), 400, view.size("font_size", 1), false);
        let text = match Self::request(view) {
            Some(request) => emit::lambda(match request.kind {
                SensorKind::Numeric => format!("return str_sprintf(\"%.1f\", id({}).state);", request.id),
                SensorKind::Text => format!("return id({}).state;", request.id),
                SensorKind::Binary => format!(
                    "return std::string(id({}).state ? \"ON\" : \"OFF\");",
                    request.id
                ),
            }),
            None => Value::from(view.str("text")),
        };
        let mut node = emit::geometry(view);
        node.insert("text".into(), text);
        node.insert("text_font".into(), Value::from(font.as_str()));
        node.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert("text_align".into(), Value::from(view.align("text_align").lvgl()));
        Some(emit::node("label", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        Self::request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

pub struct Arc;

impl WidgetExport for Arc {
    fn type_tag(&self) -> &'static str {
        "lvgl_arc"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        ARC_PROPS
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let request = numeric_request(view);
        let color = ctx.retained_color(&view.str("color"));
        let thickness = view.int("thickness").max(1);
        let mut node = emit::geometry(view);
        node.insert("value".into(), value_or_state(view, request.as_ref()));
        range(view, &mut node);
        node.insert("start_angle".into(), Value::from(view.int("start_angle").rem_euclid(360)));
        node.insert("end_angle".into(), Value::from(view.int("end_angle").rem_euclid(360)));
        node.insert("mode".into(), Value::from(view.str("mode").trim().to_ascii_uppercase()));
        node.insert("arc_width".into(), Value::from(thickness));
        node.insert(
            "indicator".into(),
            json!({ "arc_color": color, "arc_width": thickness }),
        );
        Some(emit::node("arc", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        numeric_request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

pub struct Bar;

impl WidgetExport for Bar {
    fn type_tag(&self) -> &'static str {
        "lvgl_bar"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        BAR_PROPS
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let request = numeric_request(view);
        let mut node = emit::geometry(view);
        node.insert("value".into(), value_or_state(view, request.as_ref()));
        range(view, &mut node);
        node.insert("bg_color".into(), Value::from(ctx.retained_color(&view.str("bg_color"))));
        node.insert(
            "indicator".into(),
            json!({ "bg_color": ctx.retained_color(&view.str("color")) }),
        );
        Some(emit::node("bar", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        numeric_request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

pub struct Slider;

impl Slider {
    /// Service and value key that set the bound entity from the slider.
    fn setter(entity_id: &str) -> (String, &'static str) {
        match domain(entity_id) {
            "light" => ("light.turn_on".to_string(), "brightness_pct"),
            "fan" => ("fan.set_percentage".to_string(), "percentage"),
            "cover" => ("cover.set_cover_position".to_string(), "position"),
            "media_player" => ("media_player.volume_set".to_string(), "volume_level"),
            other @ ("number" | "input_number") => (format!("{other}.set_value"), "value"),
            _ => ("number.set_value".to_string(), "value"),
        }
    }
}

impl WidgetExport for Slider {
    fn type_tag(&self) -> &'static str {
        "lvgl_slider"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        SLIDER_PROPS
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let request = numeric_request(view);
        let color = ctx.retained_color(&view.str("color"));
        let mut node = emit::geometry(view);
        node.insert("value".into(), value_or_state(view, request.as_ref()));
        range(view, &mut node);
        node.insert("indicator".into(), json!({ "bg_color": color }));
        node.insert("knob".into(), json!({ "bg_color": color }));
        if let Some(entity) = view.entity() {
            let (name, key) = Self::setter(entity);
            let mut data = entity_data(entity);
            let value = if key == "volume_level" {
                "return x / 100.0;"
            } else {
                "return x;"
            };
            data.insert(key.into(), emit::lambda(value));
            node.insert("on_release".into(), service(&name, data));
        }
        Some(emit::node("slider", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        numeric_request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

pub struct Switch;

impl WidgetExport for Switch {
    fn type_tag(&self) -> &'static str {
        "lvgl_switch"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        SWITCH_PROPS
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let request = binary_request(view);
        let mut node = emit::geometry(view);
        node.insert("state".into(), checked(view, request.as_ref()));
        node.insert(
            "indicator".into(),
            json!({ "checked": { "bg_color": ctx.retained_color(&view.str("color")) } }),
        );
        if let Some(entity) = view.entity() {
            node.insert("on_change".into(), service("homeassistant.toggle", entity_data(entity)));
        }
        Some(emit::node("switch", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        binary_request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

pub struct Checkbox;

impl WidgetExport for Checkbox {
    fn type_tag(&self) -> &'static str {
        "lvgl_checkbox"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        CHECKBOX_PROPS
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let request = binary_request(view);
        let mut node = emit::geometry(view);
        node.insert("text".into(), Value::from(view.str("text")));
        node.insert("state".into(), checked(view, request.as_ref()));
        node.insert(
            "indicator".into(),
            json!({ "checked": { "bg_color": ctx.retained_color(&view.str("color")) } }),
        );
        if let Some(entity) = view.entity() {
            node.insert("on_click".into(), service("homeassistant.toggle", entity_data(entity)));
        }
        Some(emit::node("checkbox", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        binary_request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

pub struct Led;

impl WidgetExport for Led {
    fn type_tag(&self) -> &'static str {
        "lvgl_led"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::RETAINED
    }

    fn props(&self) -> &'static [PropSpec] {
        LED_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (30, 30)
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let brightness = view.int("brightness").clamp(0, 100);
        let mut node = emit::geometry(view);
        node.insert("color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        let value = match binary_request(view) {
            Some(request) => emit::lambda(format!(
                "return id({}).state ? {brightness} : 0;",
                request.id
            )),
            None => Value::from(format!("{brightness}%")),
        };
        node.insert("brightness".into(), value);
        Some(emit::node("led", node))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        binary_request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_services_follow_the_domain() {
        assert_eq!(press_service("button.doorbell"), "button.press");
        assert_eq!(press_service("scene.movie"), "scene.turn_on");
        assert_eq!(press_service("light.hall"), "homeassistant.toggle");
    }

    #[test]
    fn slider_setters() {
        assert_eq!(Slider::setter("light.desk"), ("light.turn_on".to_string(), "brightness_pct"));
        assert_eq!(
            Slider::setter("input_number.target"),
            ("input_number.set_value".to_string(), "value")
        );
    }
}
