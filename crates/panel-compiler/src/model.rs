//! Project, page and widget model.
//!
//! The compiler consumes these read-only; `Project::from_json` is the only
//! place that normalises them (type aliases, geometry clamps, missing ids).

#![allow(missing_docs)]

use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use smol_str::SmolStr;
use tracing::warn;

use crate::error::CompileError;
use crate::widgets;

/// A complete layout: ordered pages of widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Global dark-mode setting, overridden per page.
    #[serde(default, alias = "darkMode")]
    pub dark_mode: bool,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_dark_mode")]
    pub dark_mode: DarkMode,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub refresh_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub refresh_time: Option<String>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// Page-level dark-mode override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    #[default]
    Inherit,
    Dark,
    Light,
}

impl DarkMode {
    /// Lenient parse: unknown values inherit.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "dark" | "true" | "on" => Self::Dark,
            "light" | "false" | "off" => Self::Light,
            _ => Self::Inherit,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inherit => "inherit",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl Page {
    /// Explicit page override wins over the global setting.
    #[must_use]
    pub fn effective_dark(&self, global_dark: bool) -> bool {
        match self.dark_mode {
            DarkMode::Dark => true,
            DarkMode::Light => false,
            DarkMode::Inherit => global_dark,
        }
    }
}

/// One placed widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(default)]
    pub id: SmolStr,
    #[serde(rename = "type")]
    pub widget_type: SmolStr,
    #[serde(default, deserialize_with = "de_pixel")]
    pub x: i32,
    #[serde(default, deserialize_with = "de_pixel")]
    pub y: i32,
    #[serde(default, deserialize_with = "de_pixel")]
    pub width: i32,
    #[serde(default, deserialize_with = "de_pixel")]
    pub height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub condition_entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub condition_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub condition_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub condition_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de_opt_string")]
    pub condition_max: Option<String>,
    #[serde(default)]
    pub props: Props,
}

impl Widget {
    /// A widget with geometry and no props.
    #[must_use]
    pub fn new(
        id: impl Into<SmolStr>,
        widget_type: impl Into<SmolStr>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            x,
            y,
            width,
            height,
            entity_id: None,
            title: None,
            condition_entity: None,
            condition_operator: None,
            condition_state: None,
            condition_min: None,
            condition_max: None,
            props: Props::default(),
        }
    }

    /// Builder: set one prop.
    #[must_use]
    pub fn with_prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key, value.into());
        self
    }

    /// Builder: bind an entity.
    #[must_use]
    pub fn with_entity(mut self, entity_id: &str) -> Self {
        self.entity_id = Some(entity_id.to_string());
        self
    }

    /// Trimmed entity id, `None` when unset or blank.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        self.entity_id
            .as_deref()
            .map(str::trim)
            .filter(|entity| !entity.is_empty())
    }

    /// Trimmed title, `None` when unset or blank.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// Variant-specific widget properties in their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Project {
    /// Parses and normalises a project document.
    ///
    /// A document without a `pages` array is rejected as a whole.
    pub fn from_json(text: &str) -> Result<Self, CompileError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| CompileError::InvalidProject(err.to_string().into()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, CompileError> {
        if !value.get("pages").is_some_and(Value::is_array) {
            return Err(CompileError::MissingPages);
        }
        let mut project: Project = serde_json::from_value(value)
            .map_err(|err| CompileError::InvalidProject(err.to_string().into()))?;
        project.normalize();
        Ok(project)
    }

    /// Pretty JSON form of the project.
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Widgets of all pages, in page order then widget order.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.pages.iter().flat_map(|page| page.widgets.iter())
    }

    /// Resolves type aliases, fills missing ids and clamps geometry.
    pub fn normalize(&mut self) {
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        for (page_index, page) in self.pages.iter_mut().enumerate() {
            if page.id.is_empty() {
                page.id = format!("page_{page_index}");
            }
            if page.name.is_empty() {
                page.name = format!("Page {}", page_index + 1);
            }
            for (widget_index, widget) in page.widgets.iter_mut().enumerate() {
                widgets::normalize_alias(widget);
                if widget.id.is_empty() {
                    widget.id = SmolStr::new(format!("w_{page_index}_{widget_index}"));
                }
                if widget.width < 1 || widget.height < 1 {
                    warn!(
                        widget = %widget.id,
                        width = widget.width,
                        height = widget.height,
                        "non-positive widget size clamped to 1"
                    );
                    widget.width = widget.width.max(1);
                    widget.height = widget.height.max(1);
                }
                if !seen.insert(widget.id.clone()) {
                    warn!(widget = %widget.id, "duplicate widget id");
                }
            }
        }
    }
}

fn de_pixel<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_i64(&value).map_or(0, clamp_i32))
}

fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }))
}

fn de_dark_mode<'de, D>(deserializer: D) -> Result<DarkMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => DarkMode::parse(&text),
        Some(Value::Bool(true)) => DarkMode::Dark,
        Some(Value::Bool(false)) => DarkMode::Light,
        _ => DarkMode::Inherit,
    })
}

/// Integer view of a JSON scalar; floats are floored.
#[must_use]
pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(float_to_i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(float_to_i64))
        }
        Value::Bool(flag) => Some(i64::from(*flag)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_i64(value: f64) -> i64 {
    if value.is_finite() {
        value.floor().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    } else {
        0
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_accept_floats_and_strings() {
        let widget: Widget = serde_json::from_str(
            r#"{"id":"a","type":"text","x":10.7,"y":"4","width":20,"height":5}"#,
        )
        .unwrap();
        assert_eq!((widget.x, widget.y, widget.width, widget.height), (10, 4, 20, 5));
    }

    #[test]
    fn dark_mode_precedence() {
        let mut page = Page {
            id: String::new(),
            name: String::new(),
            dark_mode: DarkMode::Inherit,
            refresh_type: None,
            refresh_time: None,
            widgets: Vec::new(),
        };
        assert!(page.effective_dark(true));
        page.dark_mode = DarkMode::Light;
        assert!(!page.effective_dark(true));
        page.dark_mode = DarkMode::Dark;
        assert!(page.effective_dark(false));
    }
}
