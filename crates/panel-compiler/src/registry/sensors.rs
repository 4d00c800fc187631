//! Sensor ledger and refresh-trigger map.

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

/// Id of the time source every generated config declares.
pub const TIME_SOURCE_ID: &str = "ha_time";

/// Declared backend identifiers for one generation pass.
#[derive(Debug, Clone)]
pub struct SensorLedger {
    seen: IndexSet<SmolStr>,
}

impl Default for SensorLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorLedger {
    /// A ledger seeded with the time source id.
    #[must_use]
    pub fn new() -> Self {
        let mut seen = IndexSet::new();
        seen.insert(SmolStr::new_inline(TIME_SOURCE_ID));
        Self { seen }
    }

    /// Claims an identifier. Returns `false` if it was already declared, in
    /// which case the caller must not emit a second declaration.
    pub fn claim(&mut self, id: &str) -> bool {
        self.seen.insert(SmolStr::new(id))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// One flattened trigger block: every directive for an entity, once each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerBlock {
    pub entity_id: SmolStr,
    pub directives: Vec<String>,
}

/// `entity_id -> directives`, both in first-registration order.
#[derive(Debug, Default, Clone)]
pub struct TriggerMap {
    entries: IndexMap<SmolStr, IndexSet<String>>,
}

impl TriggerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entity_id: &str, directive: impl Into<String>) {
        self.entries
            .entry(SmolStr::new(entity_id.trim()))
            .or_default()
            .insert(directive.into());
    }

    #[must_use]
    pub fn directives(&self, entity_id: &str) -> Option<&IndexSet<String>> {
        self.entries.get(entity_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn flatten(&self) -> Vec<TriggerBlock> {
        self.entries
            .iter()
            .map(|(entity_id, directives)| TriggerBlock {
                entity_id: entity_id.clone(),
                directives: directives.iter().cloned().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_is_seeded_with_time_source() {
        let mut ledger = SensorLedger::new();
        assert!(!ledger.claim(TIME_SOURCE_ID));
        assert!(ledger.claim("sensor_temp"));
        assert!(!ledger.claim("sensor_temp"));
    }

    #[test]
    fn trigger_directives_deduplicate() {
        let mut triggers = TriggerMap::new();
        triggers.register("sensor.temp", "- lvgl.widget.refresh: a");
        triggers.register("sensor.temp", "- lvgl.widget.refresh: b");
        triggers.register("sensor.temp", "- lvgl.widget.refresh: a");
        let blocks = triggers.flatten();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].directives.len(), 2);
    }
}
