//! Month calendar with today's date and weekday header.

use serde_json::Value;
use smol_str::SmolStr;

use crate::aggregate::{HookContext, SensorRequest};
use crate::context::GenerationContext;
use crate::layout::{center_x, TextAlign};
use crate::mode::SupportedModes;
use crate::registry::TIME_SOURCE_ID;

use super::emit;
use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::str("font_family", "Roboto"),
    PropSpec::int("date_font_size", 48),
    PropSpec::int("day_font_size", 20),
    PropSpec::int("grid_font_size", 14),
    PropSpec::str("color", "theme_auto"),
];

const WEEKDAYS: &str = "{\"Mo\", \"Tu\", \"We\", \"Th\", \"Fr\", \"Sa\", \"Su\"}";

/// Month lengths plus the leap-year rule, shared by both backends.
const DAYS_IN_MONTH: [&str; 3] = [
    "static const int month_days[] = {31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31};",
    "int days = month_days[(now.month - 1) % 12];",
    "if (now.month == 2 && ((now.year % 4 == 0 && now.year % 100 != 0) || now.year % 400 == 0)) days = 29;",
];

/// Monday-based column of the first day of the month.
const FIRST_COLUMN: &str = "int first = ((now.day_of_week + 5) - (now.day_of_month - 1) % 7 + 7) % 7;";

struct Fonts {
    date: SmolStr,
    day: SmolStr,
    grid: SmolStr,
}

fn fonts(view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Fonts {
    let family = view.str("font_family");
    Fonts {
        date: ctx.font(&family, 700, view.size("date_font_size", 1), false),
        day: ctx.font(&family, 400, view.size("day_font_size", 1), false),
        grid: ctx.font(&family, 400, view.size("grid_font_size", 1), false),
    }
}

fn events(view: &WidgetView<'_>) -> Option<SensorRequest> {
    view.entity()
        .map(|entity| SensorRequest::text(entity).with_attribute("entries"))
}

pub struct Calendar;

impl WidgetExport for Calendar {
    fn type_tag(&self) -> &'static str {
        "calendar"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::SCREEN
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (300, 300)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        fonts(view, ctx);
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        let fonts = fonts(view, ctx);
        let color = ctx.direct_color(&view.str("color"));
        let background = ctx.direct_background();
        let date_size = view.int32("date_font_size");
        let day_size = view.int32("day_font_size");
        let grid_size = view.int32("grid_font_size");
        let x = center_x(widget);
        let top = TextAlign::TOP_CENTER.esphome();
        let day_y = widget.y + date_size + 2;
        let month_y = day_y + day_size + 2;
        let grid_top = month_y + grid_size + 6;
        let row_h = grid_size + 4;
        let cell_w = (widget.width / 7).max(1);

        ctx.line("{");
        ctx.line(format!("  auto now = id({TIME_SOURCE_ID}).now();"));
        ctx.line("  if (now.is_valid()) {");
        ctx.line(format!("    it.strftime({x}, {}, id({}), {color}, {top}, \"%d\", now);", widget.y, fonts.date));
        ctx.line(format!("    it.strftime({x}, {day_y}, id({}), {color}, {top}, \"%A\", now);", fonts.day));
        ctx.line(format!("    it.strftime({x}, {month_y}, id({}), {color}, {top}, \"%B %Y\", now);", fonts.grid));
        for line in DAYS_IN_MONTH {
            ctx.line(format!("    {line}"));
        }
        ctx.line(format!("    {FIRST_COLUMN}"));
        ctx.line(format!("    const char *weekdays[] = {WEEKDAYS};"));
        ctx.line("    for (int c = 0; c < 7; c++) {");
        ctx.line(format!(
            "      it.print({} + c * {cell_w} + {}, {grid_top}, id({}), {color}, {top}, weekdays[c]);",
            widget.x,
            cell_w / 2,
            fonts.grid
        ));
        ctx.line("    }");
        ctx.line("    for (int d = 1; d <= days; d++) {");
        ctx.line("      int slot = first + d - 1;");
        ctx.line(format!("      int cx = {} + (slot % 7) * {cell_w} + {};", widget.x, cell_w / 2));
        ctx.line(format!("      int cy = {grid_top} + (slot / 7 + 1) * {row_h};"));
        ctx.line("      if (d == now.day_of_month) {");
        ctx.line(format!(
            "        it.filled_rectangle(cx - {}, cy - 1, {}, {row_h}, {color});",
            cell_w / 2 - 1,
            (cell_w - 2).max(1)
        ));
        ctx.line(format!(
            "        it.printf(cx, cy, id({}), {background}, {top}, \"%d\", d);",
            fonts.grid
        ));
        ctx.line("      } else {");
        ctx.line(format!("        it.printf(cx, cy, id({}), {color}, {top}, \"%d\", d);", fonts.grid));
        ctx.line("      }");
        ctx.line("    }");
        ctx.line("  }");
        if let Some(request) = events(view) {
            ctx.line(format!(
                "  {}",
                emit::printf(
                    widget.x,
                    widget.y + widget.height - grid_size - 2,
                    &fonts.grid,
                    &color,
                    TextAlign::TOP_LEFT,
                    "%s",
                    &format!("id({}).state.c_str()", request.id)
                )
            ));
        }
        ctx.line("}");
    }

    fn export_retained(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) -> Option<Value> {
        let fonts = fonts(view, ctx);
        let color = ctx.retained_color(&view.str("color"));
        let date_size = view.int32("date_font_size");
        let day_y = date_size + 2;
        let month_y = day_y + view.int32("day_font_size") + 2;
        let grid_y = month_y + view.int32("grid_font_size") + 6;
        let strftime = |pattern: &str| {
            emit::lambda(format!(
                "return id({TIME_SOURCE_ID}).now().strftime(\"{pattern}\");"
            ))
        };
        let mut grid = vec![
            format!("auto now = id({TIME_SOURCE_ID}).now();"),
            "if (!now.is_valid()) return std::string(\"\");".to_string(),
        ];
        grid.extend(DAYS_IN_MONTH.iter().map(|line| (*line).to_string()));
        grid.push(FIRST_COLUMN.to_string());
        grid.extend(
            [
                "std::string out = \"Mo Tu We Th Fr Sa Su\\n\";",
                "for (int i = 0; i < first; i++) out += \"   \";",
                "for (int d = 1; d <= days; d++) {",
                "  char cell[4];",
                "  snprintf(cell, sizeof(cell), \"%2d \", d);",
                "  out += cell;",
                "  if ((first + d) % 7 == 0) out += \"\\n\";",
                "}",
                "return out;",
            ]
            .iter()
            .map(|line| (*line).to_string()),
        );
        let children = vec![
            emit::child_label(&view.ident_with("_date"), 0, strftime("%d"), &fonts.date, &color),
            emit::child_label(&view.ident_with("_day"), day_y, strftime("%A"), &fonts.day, &color),
            emit::child_label(&view.ident_with("_month"), month_y, strftime("%B %Y"), &fonts.grid, &color),
            emit::child_label(&view.ident_with("_grid"), grid_y, emit::lambda(grid.join("\n")), &fonts.grid, &color),
        ];
        Some(emit::container(view, children))
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        events(view).into_iter().collect()
    }
}
