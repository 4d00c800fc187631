mod common;

use common::*;
use serde_json::{json, Value};

fn readout(id: &str, y: i32) -> Value {
    json!({
        "id": id, "type": "sensor_text", "x": 0, "y": y, "width": 120, "height": 30,
        "entity_id": "sensor.temp"
    })
}

#[test]
fn one_declaration_per_entity() {
    let project = pages(vec![
        vec![readout("w1", 0), readout("w2", 40)],
        vec![readout("w3", 0)],
    ]);
    let artifact = compile(&project, TargetMode::Direct);
    assert_eq!(occurrences(&artifact.text, "    entity_id: sensor.temp\n"), 1);
    assert_eq!(occurrences(&artifact.text, "    id: sensor_temp\n"), 1);
    assert_eq!(artifact.stats.sensors, 1);
    assert!(!artifact.text.contains("on_value:"));
}

#[test]
fn retained_trigger_holds_every_refresh() {
    let project = project(vec![readout("w1", 0), readout("w2", 40)]);
    let artifact = compile(&project, TargetMode::Retained);
    assert_eq!(occurrences(&artifact.text, "    entity_id: sensor.temp\n"), 1);
    assert_eq!(occurrences(&artifact.text, "    on_value:\n"), 1);
    assert!(artifact.text.contains(
        "    on_value:\n      then:\n        - lvgl.widget.refresh: w1\n        - lvgl.widget.refresh: w2\n"
    ));
}

#[test]
fn domains_pick_the_declaration_section() {
    let project = project(vec![
        json!({"id": "a", "type": "sensor_text", "x": 0, "y": 0, "width": 100, "height": 20,
               "entity_id": "weather.home"}),
        json!({"id": "b", "type": "sensor_text", "x": 0, "y": 30, "width": 100, "height": 20,
               "entity_id": "binary_sensor.door"}),
        json!({"id": "c", "type": "sensor_text", "x": 0, "y": 60, "width": 100, "height": 20,
               "entity_id": "outdoor_temp"}),
    ]);
    let artifact = compile(&project, TargetMode::Direct);
    let text = &artifact.text;
    let sensor = text.find("\nsensor:\n").expect("sensor section");
    let text_sensor = text.find("\ntext_sensor:\n").expect("text_sensor section");
    let binary = text.find("\nbinary_sensor:\n").expect("binary_sensor section");
    assert!(sensor < text_sensor && text_sensor < binary);
    assert!(text.contains("    id: weather_home_txt\n"));
    assert!(text.contains("    entity_id: sensor.outdoor_temp\n"));
    assert_eq!(artifact.stats.sensors, 3);
}

#[test]
fn fixed_sections_lead_the_artifact() {
    let artifact = compile(&project(vec![readout("w1", 0)]), TargetMode::Direct);
    assert!(artifact.text.starts_with("globals:\n  - id: display_page\n"));
    let time = artifact.text.find("\ntime:\n  - platform: homeassistant\n    id: ha_time\n");
    let sensor = artifact.text.find("\nsensor:\n");
    assert!(time.is_some() && time < sensor);
}

#[test]
fn conditions_declare_their_sensor_in_direct_mode() {
    let mut widget = readout("w1", 0);
    widget["condition_entity"] = json!("binary_sensor.door");
    widget["condition_state"] = json!("on");
    let artifact = compile(&project(vec![widget]), TargetMode::Direct);
    assert!(artifact.text.contains("    id: binary_sensor_door\n"));
    assert!(artifact.text.contains("if (id(binary_sensor_door).state) {"));
}

#[test]
fn protocol_modes_declare_nothing() {
    let artifact = compile(&project(vec![readout("w1", 0)]), TargetMode::ProtocolA);
    assert_eq!(artifact.stats.sensors, 0);
    assert!(!artifact.text.contains("platform: homeassistant"));
}
