mod common;

use common::*;
use expect_test::expect;
use panel_compiler::backend::PAGE_RULE;
use serde_json::{json, Value};

fn hello() -> Project {
    project(vec![json!({
        "id": "w1", "type": "text", "x": 10, "y": 10, "width": 100, "height": 30,
        "props": { "text": "Hello" }
    })])
}

#[test]
fn direct_artifact_snapshot() {
    let artifact = compile(&hello(), TargetMode::Direct);
    expect![[r#"
        globals:
          - id: display_page
            type: int
            restore_value: true
            initial_value: '0'
          - id: page_refresh_default_s
            type: int
            restore_value: false
            initial_value: '60'

        time:
          - platform: homeassistant
            id: ha_time

        font:
          - file:
              type: gfonts
              family: Roboto
              weight: 400
            id: font_roboto_400_20
            size: 20
            glyphsets:
              - GF_Latin_Core

        display:
          - id: main_display
            lambda: |-
              const auto COLOR_WHITE = Color(255, 255, 255);
              const auto COLOR_BLACK = Color(0, 0, 0);
              const auto COLOR_RED = Color(255, 0, 0);
              const auto COLOR_GREEN = Color(0, 255, 0);
              const auto COLOR_BLUE = Color(0, 0, 255);
              const auto COLOR_YELLOW = Color(255, 255, 0);
              const auto COLOR_ORANGE = Color(255, 165, 0);
              const auto COLOR_GRAY = Color(160, 160, 160);
              int currentPage = id(display_page);
              if (currentPage == 0) {
                // page:name "Page 1"
                // page:dark_mode "inherit"
                it.fill(COLOR_WHITE);
                // widget:text id:w1 type:text x:10 y:10 w:100 h:30 text:Hello font_family:Roboto font_size:20 font_weight:400 italic:false color:theme_auto text_align:TOP_LEFT bg_color:transparent
                it.print(10, 10, id(font_roboto_400_20), COLOR_BLACK, TextAlign::TOP_LEFT, "Hello");
              }
    "#]]
    .assert_eq(&artifact.text);
}

#[test]
fn protocol_a_artifact_snapshot() {
    let artifact = compile(&hello(), TargetMode::ProtocolA);
    expect![[r#"
        [
          {
            "service": "open_epaper_link.drawcustom",
            "target": {
              "entity_id": "open_epaper_link.tag"
            },
            "data": {
              "background": "white",
              "rotate": 0,
              "dither": 2,
              "ttl": 60,
              "payload": [
                {
                  "type": "text",
                  "value": "Hello",
                  "x": 10,
                  "y": 10,
                  "size": 20,
                  "color": "black",
                  "anchor": "lt",
                  "font": "ppb.ttf",
                  "max_width": 100,
                  "spacing": 4,
                  "align": "left"
                }
              ]
            }
          }
        ]
    "#]]
    .assert_eq(&artifact.text);
}

#[test]
fn protocol_b_uses_its_own_service_and_keys() {
    let artifact = compile(&hello(), TargetMode::ProtocolB);
    assert!(artifact.text.starts_with("# page:name \"Page 1\"\n"));
    assert!(artifact.text.contains("- service: opendisplay.drawcustom\n"));
    let call = &artifact.document[0];
    assert!(call["data"].get("dither").is_none());
    let element = &call["data"]["payload"][0];
    assert_eq!(element["type"], "text");
    assert!(element.get("max_width").is_none());
}

#[test]
fn widgets_on_one_page_are_separated_by_a_rule() {
    let project = project(vec![
        json!({"id": "a", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10}),
        json!({"id": "b", "type": "text", "x": 0, "y": 20, "width": 10, "height": 10}),
        json!({"id": "c", "type": "text", "x": 0, "y": 40, "width": 10, "height": 10}),
    ]);
    let artifact = compile(&project, TargetMode::Direct);
    assert_eq!(occurrences(&artifact.text, PAGE_RULE), 2);
}

#[test]
fn unknown_and_unsupported_widgets_are_counted_as_skipped() {
    let project = project(vec![
        json!({"id": "a", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10}),
        json!({"id": "b", "type": "hologram", "x": 0, "y": 0, "width": 10, "height": 10}),
        json!({"id": "c", "type": "lvgl_button", "x": 0, "y": 0, "width": 10, "height": 10}),
        json!({"id": "d", "type": "graph", "x": 0, "y": 0, "width": 10, "height": 10}),
    ]);
    let direct = compile(&project, TargetMode::Direct);
    assert_eq!((direct.stats.widgets, direct.stats.skipped), (2, 2));
    assert!(!direct.text.contains("widget:hologram"));

    let retained = compile(&project, TargetMode::Retained);
    assert_eq!((retained.stats.widgets, retained.stats.skipped), (2, 2));
    assert!(retained.text.contains("# widget:lvgl_button id:c"));
    assert!(!retained.text.contains("widget:graph"));
}

#[test]
fn retained_pages_carry_background_and_markers() {
    let mut project = hello();
    project.pages[0].dark_mode = panel_compiler::DarkMode::Dark;
    let artifact = compile(&project, TargetMode::Retained);
    assert!(artifact.text.contains(
        "lvgl:\n  displays:\n    - main_display\n  pages:\n    - id: page_0\n"
    ));
    assert!(artifact.text.contains("      # page:dark_mode \"dark\"\n"));
    assert!(artifact.text.contains("      bg_color: \"0x000000\"\n"));
    assert!(artifact.text.contains("        # widget:text id:w1 type:text x:10 y:10"));
    let pages = artifact.document["lvgl"]["pages"].as_array().expect("pages");
    assert_eq!(pages[0]["widgets"][0]["label"]["text_font"], "font_roboto_400_20");
}

#[test]
fn empty_pages_still_render() {
    let project = pages(vec![Vec::new(), Vec::new()]);
    let direct = compile(&project, TargetMode::Direct);
    assert!(direct.text.contains("if (currentPage == 1) {"));
    let retained = compile(&project, TargetMode::Retained);
    assert_eq!(occurrences(&retained.text, "      widgets: []\n"), 2);
    let protocol = compile(&project, TargetMode::ProtocolA);
    let calls: &Vec<Value> = protocol.document.as_array().expect("calls");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1]["data"]["payload"], json!([]));
}

#[test]
fn compile_json_rejects_documents_without_pages() {
    let compiler = Compiler::new(config(TargetMode::Direct));
    assert_eq!(compiler.compile_json("{}").unwrap_err(), CompileError::MissingPages);
    assert!(matches!(
        compiler.compile_json("{"),
        Err(CompileError::InvalidProject(_))
    ));
    assert!(compiler.compile_json(r#"{"pages": []}"#).is_ok());
}
