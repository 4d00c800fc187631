use panel_compiler::registry::{
    entity_identifier, sanitize_identifier, FontRegistry, IconRegistry, SensorLedger, TriggerMap,
    MAX_IDENTIFIER_LEN,
};
use panel_compiler::widgets::{self, WidgetExport};

#[test]
fn identifiers_never_exceed_the_firmware_limit() {
    let entity = format!("sensor.{}", "very_long_room_name_".repeat(6));
    for suffix in ["", "_txt", "_entries_txt"] {
        let id = entity_identifier(&entity, suffix);
        assert!(id.len() <= MAX_IDENTIFIER_LEN, "{id}");
        assert!(id.ends_with(suffix));
    }
    assert_eq!(sanitize_identifier("ab", "_graph"), "ab_graph");
}

#[test]
fn font_registration_is_idempotent() {
    let mut fonts = FontRegistry::new();
    let first = fonts.add_font("Roboto", 400, 20, false);
    let again = fonts.add_font(" Roboto ", 400, 20, false);
    fonts.add_font("Roboto", 700, 20, false);
    assert_eq!(first, again);
    assert_eq!(fonts.len(), 2);
    let lines = fonts.manifest_lines(&IconRegistry::new());
    assert_eq!(lines.iter().filter(|line| line.starts_with("    id: ")).count(), 2);
}

#[test]
fn icons_group_by_size() {
    let mut icons = IconRegistry::new();
    assert_eq!(icons.track_icon("mdi:f0595", 48).as_deref(), Some("F0595"));
    icons.track_icon("F0595", 48);
    icons.track_icon("F0599", 48);
    icons.track_icon("F0595", 24);
    assert_eq!(icons.track_icon("sunny", 24), None);
    assert_eq!(icons.len(), 3);
    let lines = FontRegistry::new().manifest_lines(&icons);
    let ids: Vec<&String> = lines.iter().filter(|line| line.starts_with("    id: ")).collect();
    assert_eq!(ids, vec!["    id: font_mdi_24", "    id: font_mdi_48"]);
}

#[test]
fn ledger_claims_each_id_once() {
    let mut ledger = SensorLedger::new();
    assert!(ledger.claim("sensor_temp"));
    assert!(!ledger.claim("sensor_temp"));
    assert!(ledger.contains("sensor_temp"));
    assert!(!ledger.claim("ha_time"));
    assert_eq!(ledger.len(), 2);
}

#[test]
fn triggers_keep_one_copy_of_each_directive() {
    let mut triggers = TriggerMap::new();
    triggers.register("sensor.temp", "- lvgl.widget.refresh: a");
    triggers.register("sensor.temp", "- lvgl.widget.refresh: b");
    triggers.register("sensor.temp", "- lvgl.widget.refresh: a");
    let directives: Vec<&String> = triggers.directives("sensor.temp").expect("entry").iter().collect();
    assert_eq!(directives, vec!["- lvgl.widget.refresh: a", "- lvgl.widget.refresh: b"]);
}

#[test]
fn catalogue_has_unique_tags_and_resolvable_aliases() {
    let tags: Vec<&str> = widgets::registered().map(|handler| handler.type_tag()).collect();
    let mut unique = tags.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), tags.len());
    for tag in &tags {
        for alias in widgets::aliases_of(tag) {
            assert!(widgets::lookup(alias).is_none(), "alias {alias} shadows a handler");
        }
    }
    assert_eq!(widgets::aliases_of("touch_area").len(), 3);
}
