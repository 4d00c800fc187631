//! Every backend must pick the same battery tier for the same reading.

mod common;

use common::*;
use serde_json::{json, Value};

const READING: i32 = 84;

fn battery_project() -> Project {
    project(vec![json!({
        "id": "bat", "type": "battery_icon", "x": 0, "y": 0, "width": 60, "height": 60,
        "entity_id": "sensor.phone_battery"
    })])
}

/// Runs a C++ `if (battery_level >= N) ... "\U000Fxxxx"` chain for `READING`.
fn evaluate_cpp_chain(text: &str) -> String {
    let mut fallback = None;
    for line in text.lines().map(str::trim) {
        let Some(glyph) = line.split('"').nth(1) else {
            continue;
        };
        if let Some(rest) = line.split("battery_level >= ").nth(1) {
            let threshold: i32 = rest
                .split(')')
                .next()
                .and_then(|n| n.parse().ok())
                .expect("numeric threshold");
            if READING >= threshold {
                return glyph.to_string();
            }
        } else if line.starts_with("else battery_level_glyph") || line.starts_with("return \"") {
            fallback.get_or_insert_with(|| glyph.to_string());
        }
    }
    fallback.expect("chain fallback")
}

/// Runs the `{% if v >= N %}name{% elif ... %}` template for `READING`.
fn evaluate_jinja(template: &str) -> String {
    for segment in template.split("{% ").skip(1) {
        let (head, name) = segment.split_once(" %}").expect("closed tag");
        if let Some(threshold) = head
            .strip_prefix("if v >= ")
            .or_else(|| head.strip_prefix("elif v >= "))
        {
            if READING >= threshold.parse::<i32>().expect("numeric threshold") {
                return name.to_string();
            }
        } else if head == "else" {
            return name.to_string();
        }
    }
    panic!("template without else branch: {template}");
}

fn protocol_icon(artifact: &Artifact) -> String {
    payload(artifact)
        .into_iter()
        .find(|element| element["type"] == "icon")
        .and_then(|element| element["value"].as_str().map(str::to_string))
        .expect("icon element")
}

#[test]
fn direct_chain_selects_battery_80() {
    let artifact = compile(&battery_project(), TargetMode::Direct);
    assert_eq!(evaluate_cpp_chain(&artifact.text), "\\U000F0081");
}

#[test]
fn retained_lambda_selects_battery_80() {
    let artifact = compile(&battery_project(), TargetMode::Retained);
    assert_eq!(evaluate_cpp_chain(&artifact.text), "\\U000F0081");
}

#[test]
fn both_protocols_select_battery_80() {
    for mode in [TargetMode::ProtocolA, TargetMode::ProtocolB] {
        let artifact = compile(&battery_project(), mode);
        assert_eq!(evaluate_jinja(&protocol_icon(&artifact)), "battery-80", "{mode:?}");
    }
}

#[test]
fn every_selectable_glyph_is_in_the_font_manifest() {
    let artifact = compile(&battery_project(), TargetMode::Direct);
    for glyph in ["\\U000F0079", "\\U000F0081", "\\U000F0083"] {
        assert!(
            artifact.text.contains(&format!("      - \"{glyph}\"")),
            "glyph {glyph} not declared"
        );
    }
}

#[test]
fn protocol_payload_reads_the_bound_entity() {
    let artifact = compile(&battery_project(), TargetMode::ProtocolA);
    let template = protocol_icon(&artifact);
    assert!(template.starts_with("{% set v = states('sensor.phone_battery') | float(0) %}"));
    let texts: Vec<Value> = payload(&artifact)
        .into_iter()
        .filter(|element| element["type"] == "text")
        .collect();
    assert_eq!(texts.len(), 1);
}
