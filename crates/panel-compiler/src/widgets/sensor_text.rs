//! Sensor readout with optional label.

use serde_json::Value;
use smol_str::SmolStr;

use crate::aggregate::{domain_kind, HookContext, SensorKind, SensorRequest};
use crate::context::GenerationContext;
use crate::layout::{center_stack, center_x, StackBlock, TextAlign};
use crate::mode::SupportedModes;

use super::emit::{self, Flavor};
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::str("value_format", "label_value"),
    PropSpec::str("unit", ""),
    PropSpec::int("precision", 1),
    PropSpec::int("label_font_size", 14),
    PropSpec::int("value_font_size", 20),
    PropSpec::str("font_family", "Roboto"),
    PropSpec::int("font_weight", 400),
    PropSpec::str("color", "theme_auto"),
    PropSpec::str("text_align", "TOP_LEFT"),
    PropSpec::bool("is_text_sensor", false),
    PropSpec::str("prefix", ""),
    PropSpec::str("postfix", ""),
];

/// Block spacing between label and value when stacked.
const STACK_GAP: i32 = 2;

pub struct SensorText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    ValueOnly,
    Inline,
    Stacked,
}

fn layout(view: &WidgetView<'_>) -> Layout {
    if view.title().is_none() {
        return Layout::ValueOnly;
    }
    match view.str("value_format").trim() {
        "value_only" => Layout::ValueOnly,
        "label_newline_value" | "label_above" => Layout::Stacked,
        _ => Layout::Inline,
    }
}

fn request(view: &WidgetView<'_>) -> Option<SensorRequest> {
    let entity = view.entity()?;
    let kind = if view.bool("is_text_sensor") {
        SensorKind::Text
    } else {
        domain_kind(entity).unwrap_or(SensorKind::Numeric)
    };
    Some(SensorRequest::new(kind, entity))
}

fn fonts(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> (SmolStr, SmolStr) {
    let family = view.str("font_family");
    let weight = u16::try_from(view.int("font_weight")).unwrap_or(400);
    let label = ctx.font(&family, weight, view.size("label_font_size", 1), false);
    let value = ctx.font(&family, weight, view.size("value_font_size", 1), false);
    (label, value)
}

fn precision(view: &WidgetView<'_>) -> usize {
    usize::try_from(view.int("precision").clamp(0, 6)).unwrap_or(1)
}

/// printf conversion and argument for the sensor value.
fn cpp_value(request: Option<&SensorRequest>, precision: usize) -> Option<(String, String)> {
    let request = request?;
    let state = format!("id({}).state", request.id);
    Some(match request.kind {
        SensorKind::Numeric => (format!("%.{precision}f"), state),
        SensorKind::Text => ("%s".to_string(), format!("{state}.c_str()")),
        SensorKind::Binary => ("%s".to_string(), format!("{state} ? \"ON\" : \"OFF\"")),
    })
}

/// Jinja rendering of the value.
fn jinja_value(request: Option<&SensorRequest>, precision: usize) -> String {
    match request {
        Some(request) if request.kind == SensorKind::Numeric => format!(
            "{{{{ {} | float(0) | round({precision}) }}}}",
            emit::jinja_state(&request.entity_id)
        ),
        Some(request) => format!("{{{{ {} }}}}", emit::jinja_state(&request.entity_id)),
        None => "--".to_string(),
    }
}

impl SensorText {
    fn value_parts(view: &WidgetView<'_>) -> (String, String) {
        (view.str("prefix"), format!("{}{}", view.str("unit"), view.str("postfix")))
    }

    fn protocol(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>, flavor: Flavor) -> Option<Value> {
        let widget = view.widget;
        let request = request(view);
        let (prefix, suffix) = Self::value_parts(view);
        let value = format!("{prefix}{}{suffix}", jinja_value(request.as_ref(), precision(view)));
        let color = view.str("color");
        let value_size = view.size("value_font_size", 1);
        let title = view.title().unwrap_or_default();
        let items = match layout(view) {
            Layout::ValueOnly | Layout::Inline => {
                let align = view.align("text_align");
                let text = if layout(view) == Layout::Inline {
                    format!("{title}: {value}")
                } else {
                    value
                };
                vec![emit::protocol_text(
                    flavor,
                    ctx,
                    &text,
                    align.anchor(widget),
                    value_size,
                    &color,
                    align,
                    Some(widget.width),
                )]
            }
            Layout::Stacked => {
                let label_size = view.size("label_font_size", 1);
                let stack = stack(view);
                let x = center_x(widget);
                vec![
                    emit::protocol_text(
                        flavor,
                        ctx,
                        title,
                        (x, widget.y + stack[0]),
                        label_size,
                        &color,
                        TextAlign::TOP_CENTER,
                        Some(widget.width),
                    ),
                    emit::protocol_text(
                        flavor,
                        ctx,
                        &value,
                        (x, widget.y + stack[2]),
                        value_size,
                        &color,
                        TextAlign::TOP_CENTER,
                        Some(widget.width),
                    ),
                ]
            }
        };
        emit::elements(items)
    }
}

fn stack(view: &WidgetView<'_>) -> Vec<i32> {
    center_stack(
        &[
            StackBlock::new(view.int32("label_font_size")),
            StackBlock::new(STACK_GAP),
            StackBlock::new(view.int32("value_font_size")),
        ],
        view.widget.height,
    )
    .offsets
}

impl WidgetExport for SensorText {
    fn type_tag(&self) -> &'static str {
        "sensor_text"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        fonts(view, ctx);
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let (label_font, value_font) = fonts(view, ctx);
        let color = ctx.direct_color(&view.str("color"));
        let request = request(view);
        let (prefix, suffix) = Self::value_parts(view);
        let title = view.title().unwrap_or_default();
        let value = cpp_value(request.as_ref(), precision(view));

        let (value_x, value_y, value_align, label_part) = match layout(view) {
            Layout::ValueOnly | Layout::Inline => {
                let align = view.align("text_align");
                let (x, y) = align.anchor(widget);
                let label = if layout(view) == Layout::Inline {
                    format!("{title}: ")
                } else {
                    String::new()
                };
                (x, y, align, label)
            }
            Layout::Stacked => {
                let stack = stack(view);
                let x = center_x(widget);
                ctx.line(emit::print(
                    x,
                    widget.y + stack[0],
                    &label_font,
                    &color,
                    TextAlign::TOP_CENTER,
                    title,
                ));
                (x, widget.y + stack[2], TextAlign::TOP_CENTER, String::new())
            }
        };
        let line = match value {
            Some((conversion, args)) => {
                let format = format!(
                    "{}{}{conversion}{}",
                    emit::printf_literal(&label_part),
                    emit::printf_literal(&prefix),
                    emit::printf_literal(&suffix)
                );
                emit::printf(value_x, value_y, &value_font, &color, value_align, &format, &args)
            }
            None => emit::print(
                value_x,
                value_y,
                &value_font,
                &color,
                value_align,
                &format!("{label_part}{prefix}--{suffix}"),
            ),
        };
        ctx.line(line);
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let (_, value_font) = fonts(view, ctx);
        let request = request(view);
        let (prefix, suffix) = Self::value_parts(view);
        let label = match layout(view) {
            Layout::ValueOnly => String::new(),
            Layout::Inline => format!("{}: ", view.title().unwrap_or_default()),
            Layout::Stacked => format!("{}\n", view.title().unwrap_or_default()),
        };
        let text = match cpp_value(request.as_ref(), precision(view)) {
            Some((conversion, args)) => emit::lambda(format!(
                "return str_sprintf(\"{}{}{conversion}{}\", {args});",
                emit::printf_literal(&label),
                emit::printf_literal(&prefix),
                emit::printf_literal(&suffix),
            )),
            None => Value::from(format!("{label}{prefix}--{suffix}")),
        };
        let align = match layout(view) {
            Layout::Stacked => TextAlign::TOP_CENTER,
            _ => view.align("text_align"),
        };
        let mut node = emit::geometry(view);
        node.insert("text".into(), text);
        node.insert("text_font".into(), Value::from(value_font.as_str()));
        node.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        node.insert("text_align".into(), Value::from(align.lvgl()));
        Some(emit::node("label", node))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::protocol(view, ctx, Flavor::A)
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::protocol(view, ctx, Flavor::B)
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        request(view)
            .map(|request| request.refreshing(&view.ident()))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::cpp_escape;

    #[test]
    fn text_domains_read_strings() {
        let request = SensorRequest::text("weather.home");
        let (conversion, args) = cpp_value(Some(&request), 1).unwrap();
        assert_eq!(conversion, "%s");
        assert_eq!(args, "id(weather_home_txt).state.c_str()");
        assert_eq!(cpp_escape("a\"b"), "a\\\"b");
    }
}
