//! Per-type property tables.
//!
//! One table per widget type drives prop defaults, the marker fields written
//! on export and the fields read back on import, so the two directions cannot
//! drift apart.

use panel_syntax::MarkerRecord;
use serde_json::Value;

use crate::condition::Condition;
use crate::layout::TextAlign;
use crate::model::{value_to_i64, Widget};
use crate::registry::sanitize_identifier;

/// Default of one prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropDefault {
    Str(&'static str),
    Int(i64),
    Bool(bool),
    /// Same resolved value as another prop of the widget.
    SameAs(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSpec {
    pub key: &'static str,
    pub default: PropDefault,
}

impl PropSpec {
    #[must_use]
    pub const fn str(key: &'static str, default: &'static str) -> Self {
        Self { key, default: PropDefault::Str(default) }
    }

    #[must_use]
    pub const fn int(key: &'static str, default: i64) -> Self {
        Self { key, default: PropDefault::Int(default) }
    }

    #[must_use]
    pub const fn bool(key: &'static str, default: bool) -> Self {
        Self { key, default: PropDefault::Bool(default) }
    }

    #[must_use]
    pub const fn same_as(key: &'static str, other: &'static str) -> Self {
        Self { key, default: PropDefault::SameAs(other) }
    }
}

/// Typed, defaulting read access to one widget.
#[derive(Debug, Clone, Copy)]
pub struct WidgetView<'w> {
    pub widget: &'w Widget,
    specs: &'static [PropSpec],
}

impl<'w> WidgetView<'w> {
    #[must_use]
    pub fn new(widget: &'w Widget, specs: &'static [PropSpec]) -> Self {
        Self { widget, specs }
    }

    fn spec(&self, key: &str) -> Option<&'static PropSpec> {
        self.specs.iter().find(|spec| spec.key == key)
    }

    fn default_text(&self, key: &str, depth: u8) -> String {
        match self.spec(key).map(|spec| spec.default) {
            Some(PropDefault::Str(text)) => text.to_string(),
            Some(PropDefault::Int(value)) => value.to_string(),
            Some(PropDefault::Bool(flag)) => flag.to_string(),
            Some(PropDefault::SameAs(other)) if depth < 4 => self.str_at(other, depth + 1),
            _ => String::new(),
        }
    }

    fn str_at(&self, key: &str, depth: u8) -> String {
        match self.widget.props.get(key) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => self.default_text(key, depth),
        }
    }

    /// Resolved text value of a prop.
    #[must_use]
    pub fn str(&self, key: &str) -> String {
        self.str_at(key, 0)
    }

    /// Resolved integer value; wrong shapes fall back to the default.
    #[must_use]
    pub fn int(&self, key: &str) -> i64 {
        self.widget
            .props
            .get(key)
            .and_then(value_to_i64)
            .or_else(|| self.default_text(key, 0).trim().parse().ok())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn int32(&self, key: &str) -> i32 {
        crate::model::clamp_i32(self.int(key))
    }

    /// Non-negative size-like value, at least `min`.
    #[must_use]
    pub fn size(&self, key: &str, min: u32) -> u32 {
        u32::try_from(self.int(key).max(i64::from(min))).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn bool(&self, key: &str) -> bool {
        match self.widget.props.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().is_some_and(|value| value != 0.0),
            Some(Value::String(text)) => parse_flag(text)
                .unwrap_or_else(|| parse_flag(&self.default_text(key, 0)).unwrap_or(false)),
            _ => parse_flag(&self.default_text(key, 0)).unwrap_or(false),
        }
    }

    #[must_use]
    pub fn align(&self, key: &str) -> TextAlign {
        TextAlign::parse(&self.str(key))
    }

    /// Backend-safe identifier derived from the widget id.
    #[must_use]
    pub fn ident(&self) -> String {
        ident_of(self.widget, "")
    }

    #[must_use]
    pub fn ident_with(&self, suffix: &str) -> String {
        ident_of(self.widget, suffix)
    }

    #[must_use]
    pub fn entity(&self) -> Option<&'w str> {
        self.widget.entity()
    }

    #[must_use]
    pub fn title(&self) -> Option<&'w str> {
        self.widget.title()
    }

    /// Marker for this widget: geometry, entity, title, the prop table and
    /// the visibility condition.
    #[must_use]
    pub fn marker(&self) -> MarkerRecord {
        let widget = self.widget;
        let mut marker = MarkerRecord::new(widget.widget_type.clone())
            .with("id", widget.id.to_string())
            .with("type", widget.widget_type.to_string())
            .with("x", widget.x.to_string())
            .with("y", widget.y.to_string())
            .with("w", widget.width.to_string())
            .with("h", widget.height.to_string());
        if let Some(entity) = widget.entity() {
            marker.push("ent", entity);
        }
        if let Some(title) = widget.title() {
            marker.push("title", title);
        }
        for spec in self.specs {
            let value = match spec.default {
                PropDefault::Int(_) => self.int(spec.key).to_string(),
                PropDefault::Bool(_) => self.bool(spec.key).to_string(),
                PropDefault::Str(_) | PropDefault::SameAs(_) => self.str(spec.key),
            };
            marker.push(spec.key, value);
        }
        if let Some(condition) = Condition::from_widget(widget) {
            condition.write_marker(&mut marker);
        }
        marker
    }
}

fn ident_of(widget: &Widget, suffix: &str) -> String {
    let ident = sanitize_identifier(&widget.id, suffix);
    if ident.starts_with(|ch: char| ch.is_ascii_digit()) || ident == suffix {
        sanitize_identifier(&format!("w_{}", widget.id), suffix)
    } else {
        ident
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Reads a prop table's fields from a marker into typed JSON props.
pub fn read_marker_props(marker: &MarkerRecord, specs: &[PropSpec], widget: &mut Widget) {
    for spec in specs {
        let Some(raw) = marker.get(spec.key) else {
            continue;
        };
        let value = match spec.default {
            PropDefault::Int(default) => {
                Value::from(value_to_i64(&Value::String(raw.to_string())).unwrap_or(default))
            }
            PropDefault::Bool(default) => Value::Bool(parse_flag(raw).unwrap_or(default)),
            PropDefault::Str(_) | PropDefault::SameAs(_) => Value::String(raw.to_string()),
        };
        widget.props.insert(spec.key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[PropSpec] = &[
        PropSpec::str("color", "theme_auto"),
        PropSpec::same_as("border_color", "color"),
        PropSpec::int("border_width", 1),
        PropSpec::bool("fill", false),
    ];

    #[test]
    fn defaults_and_same_as() {
        let widget = Widget::new("r1", "shape_rect", 0, 0, 10, 10).with_prop("color", "red");
        let view = WidgetView::new(&widget, SPECS);
        assert_eq!(view.str("border_color"), "red");
        assert_eq!(view.int("border_width"), 1);
        assert!(!view.bool("fill"));
    }

    #[test]
    fn wrong_shapes_fall_back() {
        let widget = Widget::new("r1", "shape_rect", 0, 0, 10, 10)
            .with_prop("border_width", "wide")
            .with_prop("fill", "sometimes");
        let view = WidgetView::new(&widget, SPECS);
        assert_eq!(view.int("border_width"), 1);
        assert!(!view.bool("fill"));
    }

    #[test]
    fn numeric_ids_get_a_prefix() {
        let widget = Widget::new("42", "text", 0, 0, 10, 10);
        assert_eq!(WidgetView::new(&widget, SPECS).ident(), "w_42");
    }
}
