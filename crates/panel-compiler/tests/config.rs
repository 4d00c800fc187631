mod common;

use common::*;
use serde_json::json;

#[test]
fn empty_config_is_the_default() {
    let config = CompilerConfig::from_toml("").expect("config");
    assert_eq!(config, CompilerConfig::default());
    assert_eq!(config.mode, TargetMode::Direct);
    assert_eq!(config.device.display_id, "main_display");
    assert_eq!(config.protocol.entity_id, "open_epaper_link.tag");
}

#[test]
fn sections_override_defaults() {
    let config = CompilerConfig::from_toml(
        r#"
[compiler]
mode = "lvgl"

[device]
name = "lilygo-t5"
display_type = "color"
width = 960
height = 540
display_id = "epd"

[device.features]
touch = true
lvgl = true

[protocol]
entity_id = "open_epaper_link.0000021f"
rotate = 90
ttl = 120
"#,
    )
    .expect("config");
    assert_eq!(config.mode, TargetMode::Retained);
    assert_eq!(config.device.display_type, DisplayType::Color);
    assert_eq!((config.device.width, config.device.height), (960, 540));
    assert!(config.device.has_feature("touch"));
    assert!(!config.device.has_feature("psram"));
    assert_eq!(config.protocol.rotate, 90);
    assert_eq!(config.protocol.ttl, 120);
    assert_eq!(config.protocol.dither, 2);
}

#[test]
fn invalid_values_are_config_errors() {
    for text in [
        "[compiler]\nmode = \"svg\"\n",
        "[device]\ndisplay_type = \"hologram\"\n",
        "[device]\ndisplay_id = \" \"\n",
        "[protocol]\nrotate = 45\n",
        "[device\n",
    ] {
        let err = CompilerConfig::from_toml(text).unwrap_err();
        assert!(matches!(err, CompileError::InvalidConfig(_)), "{text:?}: {err:?}");
    }
}

#[test]
fn display_id_names_the_display_block() {
    let mut config = config(TargetMode::Direct);
    config.device.display_id = "epd".into();
    let project = project(vec![json!({"id": "t", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10})]);
    let artifact = Compiler::new(config).compile(&project);
    assert!(artifact.text.contains("display:\n  - id: epd\n    lambda: |-\n"));
}

#[test]
fn protocol_envelope_follows_config() {
    let mut config = config(TargetMode::ProtocolA);
    config.protocol.entity_id = "open_epaper_link.kitchen".into();
    config.protocol.background = "black".into();
    let artifact = Compiler::new(config).compile(&pages(vec![Vec::new()]));
    let call = &artifact.document[0];
    assert_eq!(call["target"]["entity_id"], "open_epaper_link.kitchen");
    assert_eq!(call["data"]["background"], "black");
}

#[test]
fn inverted_panels_swap_black_and_white() {
    let mut config = config(TargetMode::Direct);
    config.device.inverted_colors = true;
    let artifact = Compiler::new(config).compile(&pages(vec![Vec::new()]));
    assert!(artifact.text.contains("it.fill(COLOR_BLACK);"));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = CompilerConfig::load("/nonexistent/panel.toml").unwrap_err();
    assert!(matches!(err, CompileError::Io(_)), "{err:?}");
}
