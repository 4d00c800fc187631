mod common;

use common::*;
use serde_json::{json, Value};

fn nav(action: &str) -> Value {
    json!({"id": "next", "type": "touch_area", "x": 700, "y": 380, "width": 100, "height": 100,
           "props": {"action": action}})
}

#[test]
fn touch_areas_need_a_touchscreen() {
    let project = pages(vec![vec![nav("next_page")], Vec::new()]);
    let plain = compile(&project, TargetMode::Direct);
    assert!(!plain.text.contains("platform: touchscreen"));

    let touch = Compiler::new(touch_config(TargetMode::Direct)).compile(&project);
    let text = &touch.text;
    assert!(text.contains("  - platform: touchscreen\n    id: touch_next\n"));
    assert!(text.contains("    x_min: 700\n    x_max: 800\n    y_min: 380\n    y_max: 480\n"));
    assert!(text.contains("            lambda: 'return id(display_page) == 0;'\n"));
    assert!(text.contains("  - id: display_page_count\n    type: int\n    restore_value: false\n    initial_value: '2'\n"));
}

#[test]
fn nav_aliases_imply_their_action() {
    let project = project(vec![json!({
        "id": "back", "type": "nav_previous_page", "x": 0, "y": 0, "width": 80, "height": 80
    })]);
    assert_eq!(project.pages[0].widgets[0].widget_type, "touch_area");
    let artifact = Compiler::new(touch_config(TargetMode::Direct)).compile(&project);
    assert!(artifact
        .text
        .contains("(id(display_page) + id(display_page_count) - 1) % id(display_page_count);"));
}

#[test]
fn protocol_only_shapes_reach_both_payloads() {
    let project = project(vec![json!({
        "id": "oval", "type": "ellipse", "x": 10, "y": 20, "width": 100, "height": 50,
        "props": {"fill": "red"}
    })]);
    for mode in [TargetMode::ProtocolA, TargetMode::ProtocolB] {
        let artifact = compile(&project, mode);
        let elements = payload(&artifact);
        assert_eq!(elements.len(), 1, "{mode:?}");
        assert_eq!(elements[0]["type"], "ellipse");
        assert_eq!(elements[0]["x_end"], 110);
        assert_eq!(elements[0]["y_end"], 70);
        assert_eq!(elements[0]["fill"], "red");
    }
    assert_eq!(compile(&project, TargetMode::Retained).stats.skipped, 1);
}

#[test]
fn polygon_points_are_offset_by_the_widget_origin() {
    let project = project(vec![json!({
        "id": "tri", "type": "polygon", "x": 100, "y": 50, "width": 60, "height": 50,
        "props": {"points": "0,0;60,0;30,bad;30,50"}
    })]);
    let artifact = compile(&project, TargetMode::ProtocolA);
    assert_eq!(payload(&artifact)[0]["points"], json!([[100, 50], [160, 50], [130, 100]]));
}

#[test]
fn retained_controls_call_home_assistant() {
    let project = project(vec![json!({
        "id": "lamp", "type": "lvgl_button", "x": 0, "y": 0, "width": 120, "height": 50,
        "entity_id": "script.good_night"
    })]);
    let artifact = compile(&project, TargetMode::Retained);
    let button = &artifact.document["lvgl"]["pages"][0]["widgets"][0]["button"];
    assert_eq!(
        button["on_click"][0]["homeassistant.service"]["service"],
        "script.turn_on"
    );
}

#[test]
fn icon_glyphs_are_declared_at_their_size() {
    let project = project(vec![json!({
        "id": "sun", "type": "icon", "x": 0, "y": 0, "width": 48, "height": 48,
        "props": {"code": "mdi:F0599", "size": 40}
    })]);
    let artifact = compile(&project, TargetMode::Direct);
    assert!(artifact.text.contains("    id: font_mdi_40\n    size: 40\n    glyphs:\n      - \"\\U000F0599\"\n"));
    assert_eq!(artifact.stats.icons, 1);
}

#[test]
fn wifi_without_dbm_declares_no_text_font() {
    let project = project(vec![json!({
        "id": "wifi", "type": "wifi_signal", "x": 0, "y": 0, "width": 60, "height": 60,
        "props": {"show_dbm": false}
    })]);
    for mode in [TargetMode::Direct, TargetMode::Retained] {
        let artifact = compile(&project, mode);
        assert_eq!(artifact.stats.fonts, 0, "{mode:?}");
        assert!(!artifact.text.contains("font_roboto"), "{mode:?}");
        assert!(artifact.text.contains("id: font_mdi_24"), "{mode:?}");
    }
}

#[test]
fn meter_needle_follows_its_sensor() {
    let project = project(vec![json!({
        "id": "cpu", "type": "lvgl_meter", "x": 0, "y": 0, "width": 140, "height": 140,
        "entity_id": "sensor.cpu_load", "props": {"tick_count": 21}
    })]);
    let artifact = compile(&project, TargetMode::Retained);
    let meter = &artifact.document["lvgl"]["pages"][0]["widgets"][0]["meter"];
    let scale = &meter["scales"][0];
    assert_eq!(scale["ticks"]["major"]["stride"], 4);
    assert_eq!(scale["indicators"][0]["line"]["id"], "cpu_ind");
    assert_eq!(
        scale["indicators"][0]["line"]["value"],
        "!lambda return id(sensor_cpu_load).state;"
    );
    assert!(artifact.text.contains("- lvgl.indicator.update:\n"));
    assert!(artifact.text.contains("    id: cpu_ind\n"));
    assert!(artifact.text.contains("value: !lambda \"return x;\""));
    assert!(!artifact.text.contains("lvgl.widget.refresh: cpu"));
}

#[test]
fn dropdown_options_split_per_line_and_follow_the_entity() {
    let project = project(vec![json!({
        "id": "mode", "type": "lvgl_dropdown", "x": 0, "y": 0, "width": 150, "height": 40,
        "entity_id": "sensor.hvac_mode_index",
        "props": {"options": "Off\n\nHeat\nCool ", "direction": "UP"}
    })]);
    let artifact = compile(&project, TargetMode::Retained);
    let dropdown = &artifact.document["lvgl"]["pages"][0]["widgets"][0]["dropdown"];
    assert_eq!(dropdown["options"], json!(["Off", "Heat", "Cool"]));
    assert_eq!(dropdown["dir"], "TOP");
    assert_eq!(
        dropdown["selected_index"],
        "!lambda return (int)id(sensor_hvac_mode_index).state;"
    );
    assert!(artifact.text.contains("- lvgl.widget.refresh: mode"));
}

#[test]
fn button_matrix_rows_and_styled_objects() {
    let project = project(vec![
        json!({"id": "pad", "type": "lvgl_buttonmatrix", "x": 0, "y": 0, "width": 200, "height": 200,
               "props": {"rows": "1,2;3"}}),
        json!({"id": "card", "type": "lvgl_obj", "x": 0, "y": 0, "width": 100, "height": 100,
               "props": {"color": "red", "fill": false, "opa": 128}}),
    ]);
    let artifact = compile(&project, TargetMode::Retained);
    let widgets = &artifact.document["lvgl"]["pages"][0]["widgets"];
    assert_eq!(
        widgets[0]["buttonmatrix"]["rows"],
        json!([{"buttons": [{"text": "1"}, {"text": "2"}]}, {"buttons": [{"text": "3"}]}])
    );
    let card = &widgets[1]["obj"];
    assert_eq!(card["bg_color"], "0xFF0000");
    assert_eq!(card["bg_opa"], "TRANSP");
    assert_eq!(card["opa"], "50%");
}

#[test]
fn lvgl_qrcode_reads_a_text_sensor() {
    let project = project(vec![json!({
        "id": "guest", "type": "lvgl_qrcode", "x": 0, "y": 0, "width": 120, "height": 100,
        "entity_id": "input_text.guest_wifi"
    })]);
    let artifact = compile(&project, TargetMode::Retained);
    let qr = &artifact.document["lvgl"]["pages"][0]["widgets"][0]["qrcode"];
    assert_eq!(qr["size"], 100);
    assert_eq!(qr["text"], "!lambda return id(input_text_guest_wifi_txt).state.c_str();");
    assert!(artifact.text.contains("platform: homeassistant\n    id: input_text_guest_wifi_txt\n"));
}

#[test]
fn pattern_plot_and_icon_sequences_reach_both_payloads() {
    let project = project(vec![
        json!({"id": "bricks", "type": "odp_rectangle_pattern", "x": 10, "y": 10, "width": 120, "height": 80,
               "props": {"x_repeat": 4, "x_offset": -2}}),
        json!({"id": "history", "type": "odp_plot", "x": 0, "y": 100, "width": 200, "height": 100,
               "entity_id": "sensor.outdoor_temp"}),
        json!({"id": "route", "type": "odp_icon_sequence", "x": 5, "y": 220, "width": 120, "height": 30,
               "props": {"icons": "mdi:home, mdi:train"}}),
    ]);
    for mode in [TargetMode::ProtocolA, TargetMode::ProtocolB] {
        let elements = payload(&compile(&project, mode));
        assert_eq!(elements.len(), 3, "{mode:?}");
        assert_eq!(elements[0]["type"], "rectangle_pattern");
        assert_eq!(elements[0]["x_repeat"], 4);
        assert_eq!(elements[0]["x_offset"], 0);
        assert_eq!(elements[0]["x_end"], 130);
        assert_eq!(elements[1]["data"][0]["entity"], "sensor.outdoor_temp");
        assert_eq!(elements[1]["y_end"], 200);
        assert_eq!(elements[2]["icons"], json!(["mdi:home", "mdi:train"]));
        assert_eq!(elements[2]["visible"].as_bool(), (mode == TargetMode::ProtocolB).then_some(true));
    }
}
