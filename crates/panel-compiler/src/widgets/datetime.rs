//! Clock and date readout driven by the Home Assistant time source.

use serde_json::{json, Value};
use smol_str::SmolStr;

use crate::context::GenerationContext;
use crate::layout::{center_stack, center_x, StackBlock, TextAlign};
use crate::mode::SupportedModes;
use crate::registry::TIME_SOURCE_ID;

use super::emit::{self, Flavor, PROTOCOL_FONT};
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::str("format", "time_date"),
    PropSpec::int("time_font_size", 28),
    PropSpec::int("date_font_size", 16),
    PropSpec::str("font_family", "Roboto"),
    PropSpec::bool("italic", false),
    PropSpec::str("color", "theme_auto"),
    PropSpec::str("text_align", "CENTER"),
];

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%a, %b %d";
const STACK_GAP: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    TimeDate,
    TimeOnly,
    DateOnly,
}

fn format(view: &WidgetView<'_>) -> Format {
    match view.str("format").trim() {
        "time_only" | "time" => Format::TimeOnly,
        "date_only" | "date" => Format::DateOnly,
        _ => Format::TimeDate,
    }
}

pub struct DateTime;

fn fonts(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> (SmolStr, SmolStr) {
    let family = view.str("font_family");
    let italic = view.bool("italic");
    let time = ctx.font(&family, 700, view.size("time_font_size", 1), italic);
    let date = ctx.font(&family, 400, view.size("date_font_size", 1), italic);
    (time, date)
}

/// `(y offset of the time line, y offset of the date line)`
fn stack(view: &WidgetView<'_>) -> (i32, i32) {
    let offsets = center_stack(
        &[
            StackBlock::new(view.int32("time_font_size")),
            StackBlock::new(STACK_GAP),
            StackBlock::new(view.int32("date_font_size")),
        ],
        view.widget.height,
    )
    .offsets;
    (offsets[0], offsets[2])
}

fn jinja_now(pattern: &str) -> String {
    format!("{{{{ now().strftime('{pattern}') }}}}")
}

fn strftime(x: i32, y: i32, font: &str, color: &str, align: TextAlign, pattern: &str) -> String {
    format!(
        "it.strftime({x}, {y}, id({font}), {color}, {}, \"{pattern}\", now);",
        align.esphome()
    )
}

impl DateTime {
    fn protocol(view: &WidgetView<'_>, ctx: &GenerationContext<'_>, flavor: Flavor) -> Option<Value> {
        let widget = view.widget;
        let color = view.str("color");
        let time_size = view.size("time_font_size", 1);
        let date_size = view.size("date_font_size", 1);
        let single = |pattern: &str, size: u32| {
            let align = view.align("text_align");
            emit::protocol_text(flavor, ctx, &jinja_now(pattern), align.anchor(widget), size, &color, align, Some(widget.width))
        };
        match format(view) {
            Format::TimeOnly => Some(single(TIME_FORMAT, time_size)),
            Format::DateOnly => Some(single(DATE_FORMAT, date_size)),
            Format::TimeDate => {
                let (time_y, date_y) = stack(view);
                let x = center_x(widget);
                if flavor == Flavor::B {
                    return Some(json!({
                        "type": "multiline",
                        "value": format!("{}|{}", jinja_now(TIME_FORMAT), jinja_now(DATE_FORMAT)),
                        "delimiter": "|",
                        "x": x,
                        "offset_y": date_y - time_y,
                        "y": widget.y + time_y,
                        "size": time_size,
                        "color": ctx.protocol_color(&color),
                        "anchor": TextAlign::TOP_CENTER.protocol_anchor(),
                        "font": PROTOCOL_FONT,
                    }));
                }
                emit::elements(vec![
                    emit::protocol_text(
                        flavor,
                        ctx,
                        &jinja_now(TIME_FORMAT),
                        (x, widget.y + time_y),
                        time_size,
                        &color,
                        TextAlign::TOP_CENTER,
                        Some(widget.width),
                    ),
                    emit::protocol_text(
                        flavor,
                        ctx,
                        &jinja_now(DATE_FORMAT),
                        (x, widget.y + date_y),
                        date_size,
                        &color,
                        TextAlign::TOP_CENTER,
                        Some(widget.width),
                    ),
                ])
            }
        }
    }
}

impl WidgetExport for DateTime {
    fn type_tag(&self) -> &'static str {
        "datetime"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::ALL
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 60)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        fonts(view, ctx);
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let (time_font, date_font) = fonts(view, ctx);
        let color = ctx.direct_color(&view.str("color"));
        ctx.line("{");
        ctx.line(format!("  auto now = id({TIME_SOURCE_ID}).now();"));
        match format(view) {
            Format::TimeDate => {
                let (time_y, date_y) = stack(view);
                let x = center_x(widget);
                let align = TextAlign::TOP_CENTER;
                ctx.line(format!("  {}", strftime(x, widget.y + time_y, &time_font, &color, align, TIME_FORMAT)));
                ctx.line(format!("  {}", strftime(x, widget.y + date_y, &date_font, &color, align, DATE_FORMAT)));
            }
            single => {
                let align = view.align("text_align");
                let (x, y) = align.anchor(widget);
                let (font, pattern) = if single == Format::TimeOnly {
                    (&time_font, TIME_FORMAT)
                } else {
                    (&date_font, DATE_FORMAT)
                };
                ctx.line(format!("  {}", strftime(x, y, font, &color, align, pattern)));
            }
        }
        ctx.line("}");
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let (time_font, date_font) = fonts(view, ctx);
        let (pattern, font) = match format(view) {
            Format::TimeDate => (format!("{TIME_FORMAT}\\n{DATE_FORMAT}"), time_font),
            Format::TimeOnly => (TIME_FORMAT.to_string(), time_font),
            Format::DateOnly => (DATE_FORMAT.to_string(), date_font),
        };
        let mut label = emit::geometry(view);
        label.insert(
            "text".into(),
            emit::lambda(format!("return id({TIME_SOURCE_ID}).now().strftime(\"{pattern}\");")),
        );
        label.insert("text_font".into(), Value::from(font.as_str()));
        label.insert("text_color".into(), Value::from(ctx.retained_color(&view.str("color"))));
        label.insert("text_align".into(), Value::from(view.align("text_align").lvgl()));
        Some(emit::node("label", label))
    }

    fn export_protocol_a(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::protocol(view, ctx, Flavor::A)
    }

    fn export_protocol_b(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        Self::protocol(view, ctx, Flavor::B)
    }
}
