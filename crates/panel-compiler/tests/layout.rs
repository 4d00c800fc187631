mod common;

use common::*;
use panel_compiler::layout::{center_stack, line_offsets, StackBlock, TextAlign};
use serde_json::json;

#[test]
fn odd_spare_rounds_up() {
    let layout = center_stack(&[StackBlock::new(30), StackBlock::new(20)], 61);
    assert_eq!(layout.top_padding, 6);
    assert_eq!(layout.offsets, vec![6, 36]);
}

#[test]
fn gaps_shift_following_blocks_only() {
    let layout = center_stack(
        &[StackBlock::with_gap(32, 2), StackBlock::new(2), StackBlock::new(16)],
        60,
    );
    assert_eq!(layout.offsets, vec![5, 39, 41]);
}

#[test]
fn middle_aligned_lines_straddle_the_anchor() {
    assert_eq!(line_offsets(TextAlign::CENTER, 100, 3, 24), vec![76, 100, 124]);
    assert_eq!(line_offsets(TextAlign::TOP_LEFT, 10, 2, 24), vec![10, 34]);
}

#[test]
fn battery_meter_centers_icon_and_value() {
    let project = project(vec![json!({
        "id": "bat", "type": "battery_icon", "x": 0, "y": 100, "width": 60, "height": 60,
        "entity_id": "sensor.phone_battery",
        "props": { "size": 32, "font_size": 16 }
    })]);
    let artifact = compile(&project, TargetMode::Direct);
    assert!(artifact.text.contains(
        "it.print(30, 105, id(font_mdi_32), COLOR_BLACK, TextAlign::TOP_CENTER, battery_level_glyph);"
    ));
    assert!(artifact.text.contains(
        "it.printf(30, 139, id(font_roboto_400_16), COLOR_BLACK, TextAlign::TOP_CENTER, \"%.0f%%\", battery_level);"
    ));
}

#[test]
fn multiline_text_steps_by_font_pitch() {
    let project = project(vec![json!({
        "id": "t", "type": "text", "x": 5, "y": 10, "width": 100, "height": 60,
        "props": { "text": "one\ntwo", "font_size": 16 }
    })]);
    let artifact = compile(&project, TargetMode::Direct);
    assert!(artifact
        .text
        .contains("it.print(5, 10, id(font_roboto_400_16), COLOR_BLACK, TextAlign::TOP_LEFT, \"one\");"));
    assert!(artifact
        .text
        .contains("it.print(5, 30, id(font_roboto_400_16), COLOR_BLACK, TextAlign::TOP_LEFT, \"two\");"));
}
