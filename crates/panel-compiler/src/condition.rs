//! Widget visibility conditions for the display lambda.

#![allow(missing_docs)]

use panel_syntax::MarkerRecord;

use crate::aggregate::{SensorKind, SensorRequest};
use crate::model::Widget;

const BINARY_DOMAINS: &[&str] = &[
    "binary_sensor.",
    "switch.",
    "light.",
    "input_boolean.",
    "fan.",
    "cover.",
    "vacuum.",
    "lock.",
];

const POSITIVE_STATES: &[&str] = &[
    "on", "true", "1", "open", "locked", "home", "occupied", "active", "detected",
];

const NEGATIVE_STATES: &[&str] = &[
    "off", "false", "0", "closed", "unlocked", "not_home", "away", "clear", "inactive",
];

#[must_use]
pub fn is_binary_domain(entity_id: &str) -> bool {
    BINARY_DOMAINS.iter().any(|domain| entity_id.starts_with(domain))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Range,
}

impl Operator {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "!=" => Self::Ne,
            ">" => Self::Gt,
            "<" => Self::Lt,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            "range" => Self::Range,
            _ => Self::Eq,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Range => "range",
        }
    }
}

/// A widget's visibility condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub entity_id: String,
    pub operator: Operator,
    pub state: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl Condition {
    /// `None` when the widget has no condition entity.
    #[must_use]
    pub fn from_widget(widget: &Widget) -> Option<Self> {
        let entity_id = widget
            .condition_entity
            .as_deref()
            .map(str::trim)
            .filter(|entity| !entity.is_empty())?;
        Some(Self {
            entity_id: entity_id.to_string(),
            operator: widget
                .condition_operator
                .as_deref()
                .map_or(Operator::Eq, Operator::parse),
            state: widget.condition_state.clone(),
            min: widget.condition_min.clone(),
            max: widget.condition_max.clone(),
        })
    }

    fn state_text(&self) -> &str {
        self.state.as_deref().map_or("", str::trim)
    }

    fn compares_as_string(&self) -> bool {
        if self.operator == Operator::Range {
            return false;
        }
        if self.entity_id.starts_with("text_sensor.") {
            return true;
        }
        let state = self.state_text().to_ascii_lowercase();
        state.parse::<f64>().is_err() && !is_boolean_keyword(&state)
    }

    #[must_use]
    pub fn sensor_kind(&self) -> SensorKind {
        if is_binary_domain(&self.entity_id) {
            SensorKind::Binary
        } else if self.compares_as_string() {
            SensorKind::Text
        } else {
            SensorKind::Numeric
        }
    }

    /// Declaration the condition's C++ check reads from.
    #[must_use]
    pub fn sensor_request(&self) -> SensorRequest {
        SensorRequest::new(self.sensor_kind(), &self.entity_id)
    }

    /// C++ boolean expression for the `if (...)` guard.
    #[must_use]
    pub fn check_expression(&self) -> String {
        let request = self.sensor_request();
        let state = format!("id({}).state", request.id);
        let op = self.operator;
        match request.kind {
            SensorKind::Binary => {
                let truthy = is_positive(self.state_text());
                match op {
                    Operator::Eq | Operator::Range if truthy => state,
                    Operator::Eq | Operator::Range => format!("!{state}"),
                    Operator::Ne if truthy => format!("!{state}"),
                    Operator::Ne => state,
                    _ => format!(
                        "(int) {state} {} {}",
                        op.as_str(),
                        i32::from(truthy)
                    ),
                }
            }
            SensorKind::Text => {
                let cmp = if op == Operator::Ne { "!=" } else { "==" };
                format!("{state} {cmp} \"{}\"", cpp_escape(self.state_text()))
            }
            SensorKind::Numeric => match op {
                Operator::Range => format!(
                    "{state} >= {} && {state} <= {}",
                    numeric_literal(self.min.as_deref().unwrap_or("0")),
                    numeric_literal(self.max.as_deref().unwrap_or("100")),
                ),
                _ => format!("{state} {} {}", op.as_str(), numeric_literal(self.state_text())),
            },
        }
    }

    /// Appends `cond_*` fields, each only when present.
    pub fn write_marker(&self, marker: &mut MarkerRecord) {
        marker.push("cond_ent", self.entity_id.clone());
        marker.push("cond_op", self.operator.as_str());
        if self.operator == Operator::Range {
            if let Some(min) = &self.min {
                marker.push("cond_min", min.clone());
            }
            if let Some(max) = &self.max {
                marker.push("cond_max", max.clone());
            }
        } else if let Some(state) = &self.state {
            marker.push("cond_state", state.clone());
        }
    }

    /// Copies marker `cond_*` fields back onto a widget.
    pub fn read_marker(marker: &MarkerRecord, widget: &mut Widget) {
        let field = |key: &str| marker.get(key).map(str::to_string);
        widget.condition_entity = field("cond_ent");
        if widget.condition_entity.is_some() {
            widget.condition_operator = field("cond_op");
            widget.condition_state = field("cond_state");
            widget.condition_min = field("cond_min");
            widget.condition_max = field("cond_max");
        }
    }
}

fn is_boolean_keyword(state: &str) -> bool {
    POSITIVE_STATES.contains(&state) || NEGATIVE_STATES.contains(&state)
}

fn is_positive(state: &str) -> bool {
    POSITIVE_STATES.contains(&state.to_ascii_lowercase().as_str())
}

/// Numeric C++ literal; boolean keywords map to 1/0, garbage to 0.
fn numeric_literal(text: &str) -> String {
    let text = text.trim();
    let lower = text.to_ascii_lowercase();
    if POSITIVE_STATES.contains(&lower.as_str()) {
        return "1".to_string();
    }
    if NEGATIVE_STATES.contains(&lower.as_str()) {
        return "0".to_string();
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if value.fract() == 0.0 && value.abs() < 1e15 {
                format!("{value:.0}")
            } else {
                value.to_string()
            }
        }
        _ => "0".to_string(),
    }
}

/// Escapes a string for a C++ double-quoted literal.
#[must_use]
pub fn cpp_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(entity: &str, op: &str, state: &str) -> Condition {
        Condition {
            entity_id: entity.to_string(),
            operator: Operator::parse(op),
            state: Some(state.to_string()),
            min: None,
            max: None,
        }
    }

    #[test]
    fn binary_domains_compare_truthiness() {
        assert_eq!(
            condition("binary_sensor.door", "==", "on").check_expression(),
            "id(binary_sensor_door).state"
        );
        assert_eq!(
            condition("light.kitchen", "==", "off").check_expression(),
            "!id(light_kitchen).state"
        );
        assert_eq!(
            condition("switch.fan", ">", "on").check_expression(),
            "(int) id(switch_fan).state > 1"
        );
    }

    #[test]
    fn numeric_and_string_comparisons() {
        assert_eq!(
            condition("sensor.temp", ">", "21.5").check_expression(),
            "id(sensor_temp).state > 21.5"
        );
        assert_eq!(
            condition("sensor.mode", "==", "eco").check_expression(),
            "id(sensor_mode_txt).state == \"eco\""
        );
        let range = Condition {
            operator: Operator::Range,
            min: Some("10".into()),
            ..condition("sensor.temp", "range", "")
        };
        assert_eq!(
            range.check_expression(),
            "id(sensor_temp).state >= 10 && id(sensor_temp).state <= 100"
        );
    }
}
