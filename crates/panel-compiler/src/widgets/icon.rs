//! Material Design Icons glyphs: fixed and weather-driven.

use serde_json::Value;
use smol_str::SmolStr;

use crate::aggregate::{HookContext, SensorRequest};
use crate::context::GenerationContext;
use crate::layout::{center_stack, center_x, StackBlock, TextAlign};
use crate::mode::SupportedModes;
use crate::registry::{normalize_codepoint, IconRegistry};

use super::emit::{self, Flavor};
use super::schema::{PropSpec, WidgetView};
use super::tiers::{BATTERY, WEATHER, WIFI};
use super::WidgetExport;

const ICON_PROPS: &[PropSpec] = &[
    PropSpec::str("code", "F0595"),
    PropSpec::int("size", 48),
    PropSpec::str("color", "theme_auto"),
];

const WEATHER_PROPS: &[PropSpec] = &[PropSpec::int("size", 48), PropSpec::str("color", "theme_auto")];

/// Entity read when a weather icon has none bound.
pub const DEFAULT_WEATHER_ENTITY: &str = "weather.forecast_home";

/// Protocol names of common glyphs outside the tier tables.
const NAMED: &[(&str, &str)] = &[
    ("F02DC", "home"),
    ("F02FC", "information"),
    ("F0335", "lightbulb"),
    ("F050F", "thermometer"),
    ("F058E", "water-percent"),
];

/// Protocol icon name of a codepoint, `information` when unknown.
#[must_use]
pub fn icon_name(code: &str) -> &'static str {
    let Some(code) = normalize_codepoint(code) else {
        return "information";
    };
    NAMED
        .iter()
        .find(|(known, _)| *known == code.as_str())
        .map(|(_, name)| *name)
        .or_else(|| WEATHER.name_of(&code))
        .or_else(|| BATTERY.name_of(&code))
        .or_else(|| WIFI.name_of(&code))
        .unwrap_or("information")
}

/// Top of a glyph of `size` centered vertically in the widget.
fn glyph_top(view: &WidgetView<'_>, size: u32) -> i32 {
    let size = i32::try_from(size).unwrap_or(i32::MAX);
    view.widget.y + center_stack(&[StackBlock::new(size)], view.widget.height).top_padding
}

pub struct Icon;

fn icon_code(view: &WidgetView<'_>) -> SmolStr {
    normalize_codepoint(&view.str("code")).unwrap_or_else(|| SmolStr::new_inline("F0595"))
}

impl Icon {
    fn protocol(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, flavor: Flavor) -> Value {
        let size = view.size("size", 1);
        emit::protocol_icon(
            flavor,
            ctx,
            icon_name(&icon_code(view)),
            (center_x(view.widget), glyph_top(view, size)),
            size,
            &view.str("color"),
        )
    }
}

impl WidgetExport for Icon {
    fn type_tag(&self) -> &'static str {
        "icon"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        ICON_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (60, 60)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        ctx.icons.track_icon(&icon_code(view), view.size("size", 1));
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let size = view.size("size", 1);
        let code = icon_code(view);
        let color = ctx.direct_color(&view.str("color"));
        ctx.line(format!(
            "it.print({}, {}, id({}), {color}, {}, \"{}\");",
            center_x(view.widget),
            glyph_top(view, size),
            IconRegistry::font_id(size),
            TextAlign::TOP_CENTER.esphome(),
            IconRegistry::escape(&code)
        ));
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let size = view.size("size", 1);
        let mut label = emit::geometry(view);
        label.insert("text".into(), Value::from(emit::glyph(&icon_code(view))));
        label.insert("text_font".into(), Value::from(IconRegistry::font_id(size).as_str()));
        label.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        label.insert("text_align".into(), Value::from("CENTER"));
        Some(emit::node("label", label))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::A))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::B))
    }
}

pub struct WeatherIcon;

fn weather_request(view: &WidgetView<'_>) -> SensorRequest {
    SensorRequest::text(view.entity().unwrap_or(DEFAULT_WEATHER_ENTITY))
}

impl WeatherIcon {
    fn protocol(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, flavor: Flavor) -> Value {
        let size = view.size("size", 1);
        let request = weather_request(view);
        let name = WEATHER.jinja(&emit::jinja_state(&request.entity_id));
        emit::protocol_icon(
            flavor,
            ctx,
            &name,
            (center_x(view.widget), glyph_top(view, size)),
            size,
            &view.str("color"),
        )
    }
}

impl WidgetExport for WeatherIcon {
    fn type_tag(&self) -> &'static str {
        "weather_icon"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        WEATHER_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (60, 60)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        WEATHER.track_all(&mut ctx.icons, view.size("size", 1));
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let size = view.size("size", 1);
        let request = weather_request(view);
        let color = ctx.direct_color(&view.str("color"));
        ctx.line("{");
        ctx.line(format!("  std::string weather_state = id({}).state;", request.id));
        ctx.line("  const char *weather_glyph;");
        for line in WEATHER.cpp_chain("weather_state", "weather_glyph") {
            ctx.line(format!("  {line}"));
        }
        ctx.line(format!(
            "  it.print({}, {}, id({}), {color}, {}, weather_glyph);",
            center_x(view.widget),
            glyph_top(view, size),
            IconRegistry::font_id(size),
            TextAlign::TOP_CENTER.esphome(),
        ));
        ctx.line("}");
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let size = view.size("size", 1);
        let request = weather_request(view);
        let mut body = vec![format!("std::string weather_state = id({}).state;", request.id)];
        body.extend(WEATHER.lambda_chain("weather_state"));
        let mut label = emit::geometry(view);
        label.insert("text".into(), emit::lambda(body.join("\n")));
        label.insert("text_font".into(), Value::from(IconRegistry::font_id(size).as_str()));
        label.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        label.insert("text_align".into(), Value::from("CENTER"));
        Some(emit::node("label", label))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::A))
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(Self::protocol(view, ctx, Flavor::B))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        vec![weather_request(view).refreshing(&view.ident())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_tables_and_fallback() {
        assert_eq!(icon_name("F0595"), "weather-partly-cloudy");
        assert_eq!(icon_name("0xF0081"), "battery-80");
        assert_eq!(icon_name("F02DC"), "home");
        assert_eq!(icon_name("ABCDE"), "information");
    }
}
