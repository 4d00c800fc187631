mod common;

use common::*;
use serde_json::{json, Value};

fn mixed() -> Project {
    pages(vec![
        vec![
            json!({"id": "a", "type": "text", "x": 0, "y": 0, "width": 100, "height": 30,
                   "props": {"font_family": "Open Sans", "font_size": 24}}),
            json!({"id": "b", "type": "sensor_text", "x": 0, "y": 40, "width": 100, "height": 30,
                   "entity_id": "sensor.humidity"}),
            json!({"id": "c", "type": "weather_icon", "x": 120, "y": 0, "width": 64, "height": 64,
                   "entity_id": "weather.home"}),
            json!({"id": "d", "type": "qr_code", "x": 200, "y": 0, "width": 100, "height": 100,
                   "props": {"value": "https://example.com"}}),
        ],
        vec![
            json!({"id": "e", "type": "text", "x": 0, "y": 0, "width": 100, "height": 30,
                   "props": {"font_size": 12}}),
            json!({"id": "f", "type": "wifi_signal", "x": 0, "y": 40, "width": 60, "height": 40}),
        ],
    ])
}

#[test]
fn repeated_compiles_are_byte_identical() {
    for mode in TargetMode::ALL {
        let first = compile(&mixed(), mode);
        let second = compile(&mixed(), mode);
        assert_eq!(first, second, "{mode:?}");
    }
}

#[test]
fn a_compiler_keeps_no_state_between_passes() {
    let compiler = Compiler::new(config(TargetMode::Direct));
    let before = compiler.compile(&mixed());
    let other = project(vec![json!({
        "id": "z", "type": "sensor_text", "x": 0, "y": 0, "width": 50, "height": 20,
        "entity_id": "sensor.other"
    })]);
    let _ = compiler.compile(&other);
    let after = compiler.compile(&mixed());
    assert_eq!(before.text, after.text);
    assert!(!after.text.contains("sensor_other"));
}

#[test]
fn fonts_are_declared_in_first_use_order() {
    let artifact = compile(&mixed(), TargetMode::Direct);
    let text = &artifact.text;
    let open_sans = text.find("    id: font_open_sans_400_24\n").expect("open sans");
    let small = text.find("    id: font_roboto_400_12\n").expect("roboto 12");
    assert!(open_sans < small);
    assert_eq!(occurrences(text, "    id: font_open_sans_400_24\n"), 1);
}

#[test]
fn document_mirrors_the_payload_per_page() {
    let artifact = compile(&mixed(), TargetMode::ProtocolA);
    let calls = artifact.document.as_array().expect("array of calls");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["service"], "open_epaper_link.drawcustom");
    let parsed: Value = serde_json::from_str(&artifact.text).expect("valid json");
    assert_eq!(parsed, artifact.document);
}
