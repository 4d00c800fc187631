//! Touchscreen hot zones for page navigation and entity toggles.

use tracing::warn;

use crate::aggregate::{ComponentRequest, GlobalRequest, HookContext};
use crate::context::GenerationContext;
use crate::layout::{center_x, TextAlign};
use crate::mode::SupportedModes;
use crate::registry::{normalize_codepoint, IconRegistry};

use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::str("action", "none"),
    PropSpec::str("icon", ""),
    PropSpec::int("icon_size", 40),
    PropSpec::str("color", "theme_auto"),
];

/// Device feature that provides `touchscreen_id`.
pub const TOUCH_FEATURE: &str = "touch";
const TOUCHSCREEN_ID: &str = "my_touchscreen";
const PAGE_COUNT_GLOBAL: &str = "display_page_count";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    NextPage,
    PrevPage,
    ReloadPage,
    Toggle,
}

fn action(view: &WidgetView<'_>) -> Action {
    match view.str("action").trim() {
        "next_page" => Action::NextPage,
        "prev_page" | "previous_page" => Action::PrevPage,
        "reload_page" | "refresh" => Action::ReloadPage,
        "toggle" => Action::Toggle,
        _ if view.entity().is_some() => Action::Toggle,
        _ => Action::None,
    }
}

fn sensor_id(view: &WidgetView<'_>) -> String {
    format!("touch_{}", view.ident())
}

fn icon(view: &WidgetView<'_>) -> Option<smol_str::SmolStr> {
    normalize_codepoint(&view.str("icon"))
}

pub struct TouchArea;

impl TouchArea {
    /// `then:` steps of the press handler, indented for the `if:` block.
    fn steps(view: &WidgetView<'_>, hooks: &HookContext<'_>) -> Vec<String> {
        let update = format!("            - component.update: {}", hooks.profile.display_id);
        match action(view) {
            Action::None => Vec::new(),
            Action::NextPage => vec![
                format!(
                    "            - lambda: 'id(display_page) = (id(display_page) + 1) % id({PAGE_COUNT_GLOBAL});'"
                ),
                update,
            ],
            Action::PrevPage => vec![
                format!(
                    "            - lambda: 'id(display_page) = (id(display_page) + id({PAGE_COUNT_GLOBAL}) - 1) % id({PAGE_COUNT_GLOBAL});'"
                ),
                update,
            ],
            Action::ReloadPage => vec![update],
            Action::Toggle => match view.entity() {
                Some(entity) => vec![
                    "            - homeassistant.service:".to_string(),
                    "                service: homeassistant.toggle".to_string(),
                    "                data:".to_string(),
                    format!("                  entity_id: {entity}"),
                ],
                None => Vec::new(),
            },
        }
    }
}

impl WidgetExport for TouchArea {
    fn type_tag(&self) -> &'static str {
        "touch_area"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::DIRECT
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (100, 100)
    }

    fn collect_requirements(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        if let Some(code) = icon(view) {
            ctx.icons.track_icon(&code, view.size("icon_size", 1));
        }
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let Some(code) = icon(view) else {
            return;
        };
        let widget = view.widget;
        let size = view.size("icon_size", 1);
        let color = ctx.direct_color(&view.str("color"));
        ctx.line(format!(
            "it.print({}, {}, id({}), {color}, {}, \"{}\");",
            center_x(widget),
            widget.y + widget.height / 2,
            IconRegistry::font_id(size),
            TextAlign::CENTER.esphome(),
            IconRegistry::escape(&code)
        ));
    }

    fn components(&self, view: &WidgetView<'_>, hooks: &HookContext<'_>) -> Vec<ComponentRequest> {
        if !hooks.profile.has_feature(TOUCH_FEATURE) {
            warn!(widget = %view.widget.id, "touch_area on a device without a touchscreen skipped");
            return Vec::new();
        }
        let widget = view.widget;
        let id = sensor_id(view);
        let mut lines = vec![
            "  - platform: touchscreen".to_string(),
            format!("    id: {id}"),
            format!("    touchscreen_id: {TOUCHSCREEN_ID}"),
            format!("    x_min: {}", widget.x),
            format!("    x_max: {}", widget.x + widget.width),
            format!("    y_min: {}", widget.y),
            format!("    y_max: {}", widget.y + widget.height),
        ];
        let steps = Self::steps(view, hooks);
        if !steps.is_empty() {
            lines.push("    on_press:".to_string());
            lines.push("      - if:".to_string());
            lines.push("          condition:".to_string());
            lines.push(format!(
                "            lambda: 'return id(display_page) == {};'",
                hooks.page_index
            ));
            lines.push("          then:".to_string());
            lines.extend(steps);
        }
        vec![ComponentRequest::new("binary_sensor", id, lines)]
    }

    fn globals(&self, view: &WidgetView<'_>, hooks: &HookContext<'_>) -> Vec<GlobalRequest> {
        if !hooks.profile.has_feature(TOUCH_FEATURE) {
            return Vec::new();
        }
        match action(view) {
            Action::NextPage | Action::PrevPage => {
                vec![GlobalRequest::int(PAGE_COUNT_GLOBAL, false, hooks.page_count.max(1))]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Widget;

    #[test]
    fn entity_implies_toggle() {
        let widget = Widget::new("t", "touch_area", 0, 0, 10, 10).with_entity("light.hall");
        assert_eq!(action(&WidgetView::new(&widget, PROPS)), Action::Toggle);
        let widget = Widget::new("t", "touch_area", 0, 0, 10, 10).with_prop("action", "next_page");
        assert_eq!(action(&WidgetView::new(&widget, PROPS)), Action::NextPage);
    }
}
