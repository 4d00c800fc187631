//! Cross-widget aggregation of sensor, component and global declarations.
//!
//! Widget hooks return requests; this pass walks every widget of every page
//! once, claims identifiers in the sensor ledger before anything is emitted
//! and renders one declaration per identifier.

#![allow(missing_docs)]

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::condition::{is_binary_domain, Condition};
use crate::context::GenerationContext;
use crate::mode::TargetMode;
use crate::model::Project;
use crate::registry::{entity_identifier, TIME_SOURCE_ID};
use crate::widgets::{self, WidgetView};

/// Domains whose state is a string.
const TEXT_DOMAINS: &[&str] = &[
    "text_sensor.",
    "weather.",
    "calendar.",
    "input_text.",
    "input_select.",
    "select.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Numeric,
    Text,
    Binary,
}

impl SensorKind {
    /// Declaration section of this kind.
    #[must_use]
    pub fn section(self) -> &'static str {
        match self {
            Self::Numeric => "sensor",
            Self::Text => "text_sensor",
            Self::Binary => "binary_sensor",
        }
    }

    fn trigger_key(self) -> &'static str {
        match self {
            Self::Binary => "on_state",
            Self::Numeric | Self::Text => "on_value",
        }
    }
}

/// Kind implied by an entity's domain, `None` for plain numeric domains.
#[must_use]
pub fn domain_kind(entity_id: &str) -> Option<SensorKind> {
    if is_binary_domain(entity_id) {
        Some(SensorKind::Binary)
    } else if TEXT_DOMAINS.iter().any(|domain| entity_id.starts_with(domain)) {
        Some(SensorKind::Text)
    } else {
        None
    }
}

/// A Home Assistant sensor a widget reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRequest {
    pub kind: SensorKind,
    pub entity_id: String,
    pub attribute: Option<String>,
    /// Sanitised declaration id.
    pub id: String,
    /// Refresh directives registered in retained mode.
    pub refresh: Vec<String>,
}

impl SensorRequest {
    /// Bare numeric entity names get the `sensor.` domain.
    #[must_use]
    pub fn new(kind: SensorKind, entity_id: &str) -> Self {
        let entity_id = entity_id.trim();
        let entity_id = if kind == SensorKind::Numeric && !entity_id.contains('.') {
            format!("sensor.{entity_id}")
        } else {
            entity_id.to_string()
        };
        let suffix = if kind == SensorKind::Text { "_txt" } else { "" };
        Self {
            kind,
            id: entity_identifier(&entity_id, suffix),
            entity_id,
            attribute: None,
            refresh: Vec::new(),
        }
    }

    #[must_use]
    pub fn numeric(entity_id: &str) -> Self {
        Self::new(SensorKind::Numeric, entity_id)
    }

    #[must_use]
    pub fn text(entity_id: &str) -> Self {
        Self::new(SensorKind::Text, entity_id)
    }

    #[must_use]
    pub fn binary(entity_id: &str) -> Self {
        Self::new(SensorKind::Binary, entity_id)
    }

    /// Reads an attribute instead of the state; the id gains the attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: &str) -> Self {
        let suffix = if self.kind == SensorKind::Text { "_txt" } else { "" };
        self.id = entity_identifier(&format!("{}_{attribute}", self.entity_id), suffix);
        self.attribute = Some(attribute.to_string());
        self
    }

    #[must_use]
    pub fn refresh(mut self, directive: impl Into<String>) -> Self {
        self.refresh.push(directive.into());
        self
    }

    /// `- lvgl.widget.refresh: <id>`
    #[must_use]
    pub fn refreshing(self, widget_ident: &str) -> Self {
        self.refresh(format!("- lvgl.widget.refresh: {widget_ident}"))
    }
}

/// A block in a component section, declared once per `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRequest {
    pub section: SmolStr,
    pub key: String,
    /// Lines relative to the section, starting at two spaces.
    pub lines: Vec<String>,
}

impl ComponentRequest {
    #[must_use]
    pub fn new(section: &str, key: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            section: SmolStr::new(section),
            key: key.into(),
            lines,
        }
    }
}

/// An entry of the `globals:` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalRequest {
    pub id: String,
    pub value_type: String,
    pub restore_value: bool,
    pub initial_value: String,
}

impl GlobalRequest {
    #[must_use]
    pub fn int(id: &str, restore_value: bool, initial_value: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            value_type: "int".to_string(),
            restore_value,
            initial_value: initial_value.to_string(),
        }
    }

    fn lines(&self) -> Vec<String> {
        vec![
            format!("  - id: {}", self.id),
            format!("    type: {}", self.value_type),
            format!("    restore_value: {}", self.restore_value),
            format!("    initial_value: '{}'", self.initial_value),
        ]
    }
}

/// Read-only project facts available to hooks.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub mode: TargetMode,
    pub page_count: usize,
    /// Page of the widget being asked.
    pub page_index: usize,
    pub profile: &'a crate::profile::DeviceProfile,
}

/// One named top-level section of a generated config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: SmolStr,
    pub lines: Vec<String>,
}

impl Section {
    #[must_use]
    pub fn new(name: &str, lines: Vec<String>) -> Self {
        Self {
            name: SmolStr::new(name),
            lines,
        }
    }

    /// `name:` followed by the body lines.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + 1);
        out.push(format!("{}:", self.name));
        out.extend(self.lines.iter().cloned());
        out
    }
}

/// Fixed position of the well-known component sections.
const COMPONENT_ORDER: &[&str] = &["http_request", "image", "online_image", "graph", "qr_code"];

/// Declarations gathered by one aggregation pass.
#[derive(Debug, Default, Clone)]
pub struct Aggregated {
    sensors: Vec<SensorRequest>,
    components: IndexMap<SmolStr, Vec<ComponentRequest>>,
    globals: Vec<GlobalRequest>,
}

impl Aggregated {
    #[must_use]
    pub fn sensors(&self) -> &[SensorRequest] {
        &self.sensors
    }

    #[must_use]
    pub fn sensor_count(&self, kind: SensorKind) -> usize {
        self.sensors.iter().filter(|request| request.kind == kind).count()
    }

    /// Rendered sections in artifact order, without `font` and the display.
    #[must_use]
    pub fn sections(&self, ctx: &GenerationContext<'_>) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut globals = Vec::new();
        for global in &self.globals {
            globals.extend(global.lines());
        }
        sections.push(Section::new("globals", globals));
        sections.push(Section::new(
            "time",
            vec![
                "  - platform: homeassistant".to_string(),
                format!("    id: {TIME_SOURCE_ID}"),
            ],
        ));

        let mut attached: Vec<&str> = Vec::new();
        for kind in [SensorKind::Numeric, SensorKind::Text, SensorKind::Binary] {
            let mut lines = Vec::new();
            for request in self.sensors.iter().filter(|request| request.kind == kind) {
                lines.extend(sensor_block(request, ctx, &mut attached));
            }
            if let Some(extra) = self.components.get(kind.section()) {
                lines.extend(extra.iter().flat_map(|request| request.lines.iter().cloned()));
            }
            if !lines.is_empty() {
                sections.push(Section::new(kind.section(), lines));
            }
        }

        let mut names: Vec<&SmolStr> = self
            .components
            .keys()
            .filter(|name| !matches!(name.as_str(), "sensor" | "text_sensor" | "binary_sensor"))
            .collect();
        names.sort_by_key(|name| {
            let rank = COMPONENT_ORDER
                .iter()
                .position(|known| *known == name.as_str())
                .unwrap_or(COMPONENT_ORDER.len());
            (rank, name.to_string())
        });
        for name in names {
            let lines = self.components[name]
                .iter()
                .flat_map(|request| request.lines.iter().cloned())
                .collect();
            sections.push(Section::new(name, lines));
        }
        sections
    }
}

fn sensor_block<'r>(
    request: &'r SensorRequest,
    ctx: &GenerationContext<'_>,
    attached: &mut Vec<&'r str>,
) -> Vec<String> {
    let mut lines = vec![
        "  - platform: homeassistant".to_string(),
        format!("    id: {}", request.id),
        format!("    entity_id: {}", request.entity_id),
    ];
    if let Some(attribute) = &request.attribute {
        lines.push(format!("    attribute: {attribute}"));
    }
    lines.push("    internal: true".to_string());
    if ctx.mode() != TargetMode::Retained || attached.contains(&request.entity_id.as_str()) {
        return lines;
    }
    if let Some(directives) = ctx.triggers.directives(&request.entity_id) {
        attached.push(&request.entity_id);
        lines.push(format!("    {}:", request.kind.trigger_key()));
        lines.push("      then:".to_string());
        for directive in directives {
            for line in directive.lines() {
                lines.push(format!("        {line}"));
            }
        }
    }
    lines
}

/// Walks every widget once and collects its declarations.
///
/// Sensor ids are claimed in the ledger before their block is kept, so N
/// widgets bound to one entity yield one declaration. In retained mode each
/// request's refresh directives go into the trigger map.
pub fn aggregate(project: &Project, ctx: &mut GenerationContext<'_>) -> Aggregated {
    let mut hooks = HookContext {
        mode: ctx.mode(),
        page_count: project.pages.len(),
        page_index: 0,
        profile: ctx.profile(),
    };

    let mut out = Aggregated {
        globals: vec![
            GlobalRequest::int("display_page", true, 0),
            GlobalRequest::int("page_refresh_default_s", false, 60),
        ],
        ..Aggregated::default()
    };
    for global in &out.globals {
        ctx.ledger.claim(&global.id);
    }
    for (page_index, widget) in project
        .pages
        .iter()
        .enumerate()
        .flat_map(|(index, page)| page.widgets.iter().map(move |widget| (index, widget)))
    {
        hooks.page_index = page_index;
        let Some(handler) = widgets::lookup(&widget.widget_type) else {
            continue;
        };
        if !handler.supported_modes().contains(hooks.mode) {
            continue;
        }
        let view = WidgetView::new(widget, handler.props());
        let mut requests = handler.sensors(&view, &hooks);
        if hooks.mode == TargetMode::Direct {
            if let Some(condition) = Condition::from_widget(widget) {
                requests.push(condition.sensor_request());
            }
        }
        for request in requests {
            if request.kind == SensorKind::Numeric
                && domain_kind(&request.entity_id).is_some()
            {
                debug!(widget = %widget.id, entity = %request.entity_id, "numeric request for non-numeric domain dropped");
                continue;
            }
            if hooks.mode == TargetMode::Retained {
                for directive in &request.refresh {
                    ctx.triggers.register(&request.entity_id, directive.clone());
                }
            }
            if ctx.ledger.claim(&request.id) {
                out.sensors.push(request);
            }
        }
        for component in handler.components(&view, &hooks) {
            if ctx.ledger.claim(&component.key) {
                out.components
                    .entry(component.section.clone())
                    .or_default()
                    .push(component);
            }
        }
        for global in handler.globals(&view, &hooks) {
            if ctx.ledger.claim(&global.id) {
                out.globals.push(global);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numeric_names_get_sensor_domain() {
        let request = SensorRequest::numeric("outdoor_temp");
        assert_eq!(request.entity_id, "sensor.outdoor_temp");
        assert_eq!(request.id, "sensor_outdoor_temp");
    }

    #[test]
    fn text_ids_carry_suffix() {
        assert_eq!(SensorRequest::text("weather.home").id, "weather_home_txt");
        assert_eq!(
            SensorRequest::text("calendar.family").with_attribute("entries").id,
            "calendar_family_entries_txt"
        );
    }
}
