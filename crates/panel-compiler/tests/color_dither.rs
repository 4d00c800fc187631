mod common;

use common::*;
use serde_json::json;

fn gray_rect() -> Project {
    project(vec![json!({
        "id": "box", "type": "shape_rect", "x": 10, "y": 10, "width": 40, "height": 20,
        "props": { "fill": true, "color": "gray", "border_width": 1 }
    })])
}

#[test]
fn gray_fill_on_binary_panel_is_dithered_instead_of_drawn() {
    let artifact = compile(&gray_rect(), TargetMode::Direct);
    let text = &artifact.text;
    assert_eq!(occurrences(text, "apply_grey_dither_mask(10, 10, 40, 20);"), 1);
    assert!(!text.contains("it.filled_rectangle(10, 10, 40, 20"));
    assert!(text.contains("auto apply_grey_dither_mask = [&](int x0, int y0, int w, int h) {"));
}

#[test]
fn gray_border_is_masked_as_four_strips() {
    let artifact = compile(&gray_rect(), TargetMode::Direct);
    for strip in [
        "apply_grey_dither_mask(10, 10, 40, 1);",
        "apply_grey_dither_mask(10, 29, 40, 1);",
        "apply_grey_dither_mask(10, 11, 1, 18);",
        "apply_grey_dither_mask(49, 11, 1, 18);",
    ] {
        assert!(artifact.text.contains(strip), "missing {strip}");
    }
    assert!(!artifact.text.contains("it.rectangle(10, 10, 40, 20"));
}

#[test]
fn color_panels_draw_gray_solid() {
    let mut config = config(TargetMode::Direct);
    config.device.display_type = DisplayType::Color;
    let artifact = Compiler::new(config).compile(&gray_rect());
    assert!(artifact
        .text
        .contains("it.filled_rectangle(10, 10, 40, 20, COLOR_GRAY);"));
    assert!(artifact.text.contains("it.rectangle(10, 10, 40, 20, COLOR_GRAY);"));
    assert!(!artifact.text.contains("apply_grey_dither_mask"));
}

#[test]
fn helper_is_only_emitted_when_needed() {
    let black = project(vec![json!({
        "id": "box", "type": "shape_rect", "x": 0, "y": 0, "width": 10, "height": 10,
        "props": { "fill": true, "color": "black" }
    })]);
    let artifact = compile(&black, TargetMode::Direct);
    assert!(artifact.text.contains("it.filled_rectangle(0, 0, 10, 10, COLOR_BLACK);"));
    assert!(!artifact.text.contains("apply_grey_dither_mask"));
}

#[test]
fn dark_pages_flip_theme_colors() {
    let mut project = project(vec![json!({
        "id": "t", "type": "text", "x": 0, "y": 0, "width": 50, "height": 20,
        "props": { "text": "Hi" }
    })]);
    project.dark_mode = true;
    let artifact = compile(&project, TargetMode::Direct);
    assert!(artifact.text.contains("it.fill(COLOR_BLACK);"));
    assert!(artifact.text.contains("COLOR_WHITE, TextAlign::TOP_LEFT, \"Hi\");"));
}
