//! Sensor history graph.

use tracing::debug;

use crate::aggregate::{ComponentRequest, HookContext, SensorRequest};
use crate::context::GenerationContext;
use crate::mode::SupportedModes;

use super::schema::{PropSpec, WidgetView};
use super::WidgetExport;

const PROPS: &[PropSpec] = &[
    PropSpec::str("duration", "1h"),
    PropSpec::str("line_color", "theme_auto"),
    PropSpec::bool("border", true),
    PropSpec::str("min_value", ""),
    PropSpec::str("max_value", ""),
];

pub struct Graph;

fn graph_id(view: &WidgetView<'_>) -> String {
    format!("graph_{}", view.ident())
}

fn request(view: &WidgetView<'_>) -> Option<SensorRequest> {
    view.entity().map(SensorRequest::numeric)
}

/// Numeric bound prop, `None` when blank or unparsable.
fn bound(view: &WidgetView<'_>, key: &str) -> Option<f64> {
    view.str(key).trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

impl WidgetExport for Graph {
    fn type_tag(&self) -> &'static str {
        "graph"
    }

    fn supported_modes(&self) -> SupportedModes {
        SupportedModes::DIRECT
    }

    fn props(&self) -> &'static [PropSpec] {
        PROPS
    }

    fn default_size(&self) -> (i32, i32) {
        (200, 100)
    }

    fn export_direct(&self, view: &WidgetView<'_>, ctx: &mut GenerationContext<'_>) {
        let widget = view.widget;
        if request(view).is_none() {
            debug!(widget = %widget.id, "graph without a sensor drawn as an empty frame");
            if view.bool("border") {
                let color = ctx.direct_color(&view.str("line_color"));
                ctx.line(format!(
                    "it.rectangle({}, {}, {}, {}, {color});",
                    widget.x, widget.y, widget.width, widget.height
                ));
            }
            return;
        }
        let color = ctx.direct_color(&view.str("line_color"));
        ctx.line(format!(
            "it.graph({}, {}, id({}), {color});",
            widget.x,
            widget.y,
            graph_id(view)
        ));
    }

    fn sensors(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<SensorRequest> {
        request(view).into_iter().collect()
    }

    fn components(&self, view: &WidgetView<'_>, _hooks: &HookContext<'_>) -> Vec<ComponentRequest> {
        let Some(request) = request(view) else {
            return Vec::new();
        };
        let id = graph_id(view);
        let mut lines = vec![
            format!("  - id: {id}"),
            format!("    sensor: {}", request.id),
            format!("    duration: {}", view.str("duration").trim()),
            format!("    width: {}", view.widget.width),
            format!("    height: {}", view.widget.height),
            format!("    border: {}", view.bool("border")),
        ];
        if let Some(min) = bound(view, "min_value") {
            lines.push(format!("    min_value: {min}"));
        }
        if let Some(max) = bound(view, "max_value") {
            lines.push(format!("    max_value: {max}"));
        }
        vec![ComponentRequest::new("graph", id, lines)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Widget;

    #[test]
    fn blank_bounds_are_omitted() {
        let widget = Widget::new("g", "graph", 0, 0, 10, 10).with_prop("max_value", "40.5");
        let view = WidgetView::new(&widget, PROPS);
        assert_eq!(bound(&view, "min_value"), None);
        assert_eq!(bound(&view, "max_value"), Some(40.5));
    }
}
