//! Battery level and Wi-Fi strength indicators: a tiered glyph over a value.

use serde_json::Value;

use crate::aggregate::{ComponentRequest, HookContext, SensorRequest};
use crate::context::GenerationContext;
use crate::layout::{center_stack, center_x, StackBlock, TextAlign};
use crate::mode::SupportedModes;
use crate::registry::IconRegistry;

use super::emit::{self, Flavor};
use super::schema::{PropSpec, WidgetView};
use super::tiers::{TierTable, BATTERY, WIFI};
use super::WidgetExport;

const BATTERY_PROPS: &[PropSpec] = &[
    PropSpec::int("size", 36),
    PropSpec::int("font_size", 14),
    PropSpec::str("color", "theme_auto"),
    PropSpec::bool("local", false),
];

const WIFI_PROPS: &[PropSpec] = &[
    PropSpec::int("size", 24),
    PropSpec::int("font_size", 12),
    PropSpec::str("color", "theme_auto"),
    PropSpec::bool("show_dbm", true),
    PropSpec::bool("local", true),
];

pub const DEFAULT_BATTERY_ENTITY: &str = "sensor.battery_level";
/// On-device battery sensor expected from the hardware config.
pub const LOCAL_BATTERY_ID: &str = "battery_level";
pub const LOCAL_WIFI_ID: &str = "wifi_signal_dbm";
const DEFAULT_WIFI_ENTITY: &str = "sensor.wifi_signal";

/// Shape shared by both meters.
struct Meter {
    table: &'static TierTable,
    /// C++ local holding the reading.
    var: &'static str,
    /// printf format of the value line.
    format: &'static str,
    /// Jinja value suffix and default for a missing state.
    jinja_suffix: &'static str,
    jinja_default: i32,
}

const BATTERY_METER: Meter = Meter {
    table: &BATTERY,
    var: "battery_level",
    format: "%.0f%%",
    jinja_suffix: "%",
    jinja_default: 0,
};

const WIFI_METER: Meter = Meter {
    table: &WIFI,
    var: "wifi_dbm",
    format: "%.0f dBm",
    jinja_suffix: " dBm",
    jinja_default: -100,
};

/// Where a meter reads from.
struct Source {
    /// Declaration id read by the lambdas.
    id: String,
    /// Home Assistant entity, when reading through Home Assistant.
    request: Option<SensorRequest>,
    /// Entity referenced by the drawing protocols.
    entity_id: String,
}

fn battery_source(view: &WidgetView<'_>) -> Source {
    let entity = view.entity().unwrap_or(DEFAULT_BATTERY_ENTITY);
    if view.bool("local") {
        return Source {
            id: LOCAL_BATTERY_ID.to_string(),
            request: None,
            entity_id: entity.to_string(),
        };
    }
    let request = SensorRequest::numeric(entity);
    Source {
        id: request.id.clone(),
        entity_id: request.entity_id.clone(),
        request: Some(request),
    }
}

fn wifi_source(view: &WidgetView<'_>) -> Source {
    match view.entity() {
        Some(entity) if !view.bool("local") => {
            let request = SensorRequest::numeric(entity);
            Source {
                id: request.id.clone(),
                entity_id: request.entity_id.clone(),
                request: Some(request),
            }
        }
        entity => Source {
            id: LOCAL_WIFI_ID.to_string(),
            request: None,
            entity_id: entity.unwrap_or(DEFAULT_WIFI_ENTITY).to_string(),
        },
    }
}

impl Meter {
    fn shows_value(&self, view: &WidgetView<'_>) -> bool {
        self.var != WIFI_METER.var || view.bool("show_dbm")
    }

    fn offsets(&self, view: &WidgetView<'_>) -> (i32, i32) {
        let mut blocks = vec![StackBlock::new(view.int32("size"))];
        if self.shows_value(view) {
            blocks.push(StackBlock::new(2));
            blocks.push(StackBlock::new(view.int32("font_size")));
        }
        let layout = center_stack(&blocks, view.widget.height);
        let icon = layout.offsets[0];
        let value = layout.offsets.get(2).copied().unwrap_or(icon);
        (icon, value)
    }

    fn collect(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        self.table.track_all(&mut ctx.icons, view.size("size", 1));
        if self.shows_value(view) {
            ctx.font("Roboto", 400, view.size("font_size", 1), false);
        }
    }

    fn direct(&self, view: &WidgetView<'_>, source: &Source, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let size = view.size("size", 1);
        let color = ctx.direct_color(&view.str("color"));
        let (icon_y, value_y) = self.offsets(view);
        let x = center_x(widget);
        let glyph = format!("{}_glyph", self.var);
        let align = TextAlign::TOP_CENTER.esphome();
        ctx.line("{");
        ctx.line(format!("  float {} = id({}).state;", self.var, source.id));
        ctx.line(format!("  const char *{glyph};"));
        for line in self.table.cpp_chain(self.var, &glyph) {
            ctx.line(format!("  {line}"));
        }
        ctx.line(format!(
            "  it.print({x}, {}, id({}), {color}, {align}, {glyph});",
            widget.y + icon_y,
            IconRegistry::font_id(size)
        ));
        if self.shows_value(view) {
            let font = ctx.font("Roboto", 400, view.size("font_size", 1), false);
            ctx.line(format!(
                "  it.printf({x}, {}, id({font}), {color}, {align}, \"{}\", {});",
                widget.y + value_y,
                self.format,
                self.var
            ));
        }
        ctx.line("}");
    }

    fn retained(&self, view: &WidgetView<'_>, source: &Source, ctx: &mut GenerationContext<'_>) -> Value {
        let size = view.size("size", 1);
        let color = ctx.retained_color(&view.str("color"));
        let (icon_y, value_y) = self.offsets(view);
        let mut body = vec![format!("float {} = id({}).state;", self.var, source.id)];
        body.extend(self.table.lambda_chain(self.var));
        let mut children = vec![emit::child_label(
            &view.ident_with("_icon"),
            icon_y,
            emit::lambda(body.join("\n")),
            &IconRegistry::font_id(size),
            &color,
        )];
        if self.shows_value(view) {
            let font = ctx.font("Roboto", 400, view.size("font_size", 1), false);
            children.push(emit::child_label(
                &view.ident_with("_value"),
                value_y,
                emit::lambda(format!(
                    "return str_sprintf(\"{}\", id({}).state);",
                    self.format, source.id
                )),
                &font,
                &color,
            ));
        }
        emit::container(view, children)
    }

    fn protocol(&self, view: &WidgetView<'_>, source: &Source, ctx: &GenerationContext<'_>, flavor: Flavor) -> Option<Value> {
        let widget = view.widget;
        let (icon_y, value_y) = self.offsets(view);
        let x = center_x(widget);
        let reading = format!(
            "{} | float({})",
            emit::jinja_state(&source.entity_id),
            self.jinja_default
        );
        let mut items = vec![emit::protocol_icon(
            flavor,
            ctx,
            &self.table.jinja(&reading),
            (x, widget.y + icon_y),
            view.size("size", 1),
            &view.str("color"),
        )];
        if self.shows_value(view) {
            items.push(emit::protocol_text(
                flavor,
                ctx,
                &format!("{{{{ {reading} | int }}}}{}", self.jinja_suffix),
                (x, widget.y + value_y),
                view.size("font_size", 1),
                &view.str("color"),
                TextAlign::TOP_CENTER,
                None,
            ));
        }
        emit::elements(items)
    }

    fn sensors(view: &WidgetView<'_>, source: Source) -> Vec<SensorRequest> {
        source
            .request
            .map(|request| {
                request
                    .refreshing(&view.ident_with("_icon"))
                    .refreshing(&view.ident_with("_value"))
            })
            .into_iter()
            .collect()
    }
}

pub struct BatteryIcon;

impl WidgetExport for BatteryIcon {
    fn type_tag(&self) -> &'static str {
        "battery_icon"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        BATTERY_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (60, 60)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        BATTERY_METER.collect(view, ctx);
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        BATTERY_METER.direct(view, &battery_source(view), ctx);
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(BATTERY_METER.retained(view, &battery_source(view), ctx))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        BATTERY_METER.protocol(view, &battery_source(view), ctx, Flavor::A)
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        BATTERY_METER.protocol(view, &battery_source(view), ctx, Flavor::B)
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        Meter::sensors(view, battery_source(view))
    }
}

pub struct WifiSignal;

impl WidgetExport for WifiSignal {
    fn type_tag(&self) -> &'static str {
        "wifi_signal"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        WIFI_PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (60, 60)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        WIFI_METER.collect(view, ctx);
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        WIFI_METER.direct(view, &wifi_source(view), ctx);
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Some(WIFI_METER.retained(view, &wifi_source(view), ctx))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        WIFI_METER.protocol(view, &wifi_source(view), ctx, Flavor::A)
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        WIFI_METER.protocol(view, &wifi_source(view), ctx, Flavor::B)
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        Meter::sensors(view, wifi_source(view))
    }

    fn components(&self, view: &WidgetView<'_>, hooks: &HookContext<'_>) -> Vec<ComponentRequest> {
        if wifi_source(view).request.is_some() || hooks.mode.is_protocol() {
            return Vec::new();
        }
        vec![ComponentRequest::new(
            "sensor",
            LOCAL_WIFI_ID,
            vec![
                "  - platform: wifi_signal".to_string(),
                format!("    id: {LOCAL_WIFI_ID}"),
                "    update_interval: 60s".to_string(),
            ],
        )]
    }
}
