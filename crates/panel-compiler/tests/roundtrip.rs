mod common;

use common::*;
use panel_compiler::import::marker_fields;
use panel_compiler::widgets::{self, PropDefault, WidgetExport};
use panel_compiler::{import_project, DarkMode};
use serde_json::{json, Map, Value};

fn screen_widgets() -> Vec<Value> {
    vec![
        json!({"id": "title", "type": "text", "x": 10, "y": 10, "width": 300, "height": 40,
               "props": {"text": "Living room: \"cozy\"\nsecond line", "font_size": 28, "font_weight": 700}}),
        json!({"id": "temp", "type": "sensor_text", "x": 10, "y": 60, "width": 200, "height": 50,
               "entity_id": "sensor.living_temp", "title": "Temp now",
               "props": {"unit": "°C", "value_format": "label_newline_value"}}),
        json!({"id": "frame", "type": "shape_rect", "x": 0, "y": 0, "width": 400, "height": 300,
               "props": {"border_width": 3, "color": "red"}}),
        json!({"id": "bat", "type": "battery_icon", "x": 320, "y": 10, "width": 60, "height": 60,
               "entity_id": "sensor.phone_battery"}),
        json!({"id": "clock", "type": "datetime", "x": 200, "y": 200, "width": 180, "height": 60}),
        json!({"id": "door_warn", "type": "icon", "x": 0, "y": 200, "width": 48, "height": 48,
               "props": {"code": "F0026"},
               "condition_entity": "binary_sensor.door", "condition_state": "on"}),
    ]
}

fn assert_same_widgets(original: &Project, imported: &Project) {
    assert_eq!(original.pages.len(), imported.pages.len());
    for (left, right) in original.pages.iter().zip(&imported.pages) {
        assert_eq!(left.name, right.name);
        assert_eq!(left.dark_mode, right.dark_mode);
        assert_eq!(left.widgets.len(), right.widgets.len(), "page {}", left.name);
        for (a, b) in left.widgets.iter().zip(&right.widgets) {
            assert_eq!(marker_fields(a), marker_fields(b), "widget {}", a.id);
        }
    }
}

fn two_page_project(second: Vec<Value>) -> Project {
    let mut project = Project::from_value(json!({"pages": [
        {"name": "Main", "widgets": screen_widgets()},
        {"name": "Night \"mode\"", "dark_mode": "dark", "refresh_time": "300", "widgets": second},
    ]}))
    .expect("project");
    project.normalize();
    project
}

#[test]
fn direct_output_reimports_to_the_same_project() {
    let original = two_page_project(vec![
        json!({"id": "dot", "type": "shape_circle", "x": 40, "y": 40, "width": 30, "height": 30,
               "props": {"fill": true}}),
    ]);
    let artifact = compile(&original, TargetMode::Direct);
    let imported = import_project(&artifact.text).expect("import");
    assert_same_widgets(&original, &imported);
    assert_eq!(imported.pages[1].dark_mode, DarkMode::Dark);
    assert_eq!(imported.pages[1].refresh_time.as_deref(), Some("300"));
}

#[test]
fn retained_output_reimports_to_the_same_project() {
    let original = two_page_project(vec![
        json!({"id": "lamp", "type": "lvgl_switch", "x": 10, "y": 10, "width": 80, "height": 40,
               "entity_id": "light.kitchen"}),
    ]);
    let artifact = compile(&original, TargetMode::Retained);
    let imported = import_project(&artifact.text).expect("import");
    assert_same_widgets(&original, &imported);
}

#[test]
fn compiling_an_import_reproduces_the_artifact() {
    let original = two_page_project(Vec::new());
    let first = compile(&original, TargetMode::Direct);
    let imported = import_project(&first.text).expect("import");
    let second = compile(&imported, TargetMode::Direct);
    assert_eq!(first.text, second.text);
}

#[test]
fn unsupported_widgets_leave_no_marker() {
    let original = project(vec![
        json!({"id": "t", "type": "text", "x": 0, "y": 0, "width": 50, "height": 20}),
        json!({"id": "oval", "type": "ellipse", "x": 0, "y": 40, "width": 50, "height": 20}),
    ]);
    let artifact = compile(&original, TargetMode::Direct);
    assert_eq!(artifact.stats.skipped, 1);
    let imported = import_project(&artifact.text).expect("import");
    let ids: Vec<&str> = imported.widgets().map(|widget| widget.id.as_str()).collect();
    assert_eq!(ids, vec!["t"]);
}

#[test]
fn page_header_lookalikes_inside_text_stay_on_their_page() {
    let original = project(vec![
        json!({"id": "a", "type": "text", "x": 0, "y": 0, "width": 200, "height": 20,
               "props": {"text": "if (page == 3) go"}}),
        json!({"id": "b", "type": "text", "x": 0, "y": 40, "width": 200, "height": 20,
               "props": {"text": "} else if (currentPage == 2) {"}}),
        json!({"id": "c", "type": "shape_rect", "x": 0, "y": 80, "width": 20, "height": 20}),
    ]);
    for mode in [TargetMode::Direct, TargetMode::Retained] {
        let artifact = compile(&original, mode);
        let imported = import_project(&artifact.text).expect("import");
        assert_eq!(imported.pages.len(), 1, "{mode:?}");
        assert_same_widgets(&original, &imported);
    }
}

#[test]
fn carriage_returns_survive_the_round_trip() {
    let original = project(vec![
        json!({"id": "cr", "type": "text", "x": 0, "y": 0, "width": 200, "height": 40,
               "props": {"text": "a\rb\r\nc", "color": "red"}}),
    ]);
    for mode in [TargetMode::Direct, TargetMode::Retained] {
        let artifact = compile(&original, mode);
        let imported = import_project(&artifact.text).expect("import");
        assert_same_widgets(&original, &imported);
        assert_eq!(
            imported.pages[0].widgets[0].props.get("text"),
            Some(&Value::from("a\rb\r\nc"))
        );
    }
}

/// Widget of `handler`'s type with every table prop moved off its default.
fn off_default_widget(handler: &dyn WidgetExport) -> Value {
    let mut props = Map::new();
    for spec in handler.props() {
        let value = match spec.default {
            PropDefault::Int(default) => Value::from(default + 3),
            PropDefault::Bool(default) => Value::Bool(!default),
            PropDefault::Str(_) | PropDefault::SameAs(_) => Value::from(format!("{} \"v\": 1", spec.key)),
        };
        props.insert(spec.key.to_string(), value);
    }
    json!({
        "id": format!("w_{}", handler.type_tag()),
        "type": handler.type_tag(),
        "x": 12, "y": 34, "width": 120, "height": 90,
        "entity_id": "sensor.catalogue",
        "title": "Catalogue entry",
        "condition_entity": "binary_sensor.door",
        "condition_state": "on",
        "props": props,
    })
}

#[test]
fn every_widget_type_round_trips_with_non_default_props() {
    for mode in [TargetMode::Direct, TargetMode::Retained] {
        let widgets: Vec<Value> = widgets::registered()
            .filter(|handler| handler.supported_modes().contains(mode))
            .map(off_default_widget)
            .collect();
        assert!(!widgets.is_empty());
        let original = project(widgets);
        let artifact = Compiler::new(touch_config(mode)).compile(&original);
        assert_eq!(artifact.stats.skipped, 0, "{mode:?}");
        let imported = import_project(&artifact.text).expect("import");
        assert_same_widgets(&original, &imported);
    }
}

#[test]
fn retained_images_without_a_source_keep_their_marker() {
    let original = project(vec![
        json!({"id": "pic", "type": "image", "x": 0, "y": 0, "width": 64, "height": 64,
               "props": {"path": ""}}),
        json!({"id": "cam", "type": "online_image", "x": 80, "y": 0, "width": 64, "height": 64,
               "props": {"url": "", "interval": 60}}),
    ]);
    let artifact = compile(&original, TargetMode::Retained);
    let imported = import_project(&artifact.text).expect("import");
    assert_same_widgets(&original, &imported);
    assert!(artifact.text.contains("# widget:image id:pic"));
}
