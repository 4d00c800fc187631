//! Shared helpers for compiler integration tests.
#![allow(dead_code, unused_imports)]

pub use panel_compiler::{
    Artifact, CompileError, Compiler, CompilerConfig, DeviceProfile, DisplayType, Page, Project,
    TargetMode, Widget,
};
use serde_json::{json, Value};

/// One-page project holding `widgets`.
pub fn project(widgets: Vec<Value>) -> Project {
    pages(vec![widgets])
}

/// Project with one page per entry.
pub fn pages(pages: Vec<Vec<Value>>) -> Project {
    let pages: Vec<Value> = pages
        .into_iter()
        .map(|widgets| json!({ "widgets": widgets }))
        .collect();
    Project::from_value(json!({ "pages": pages })).expect("valid project")
}

pub fn config(mode: TargetMode) -> CompilerConfig {
    CompilerConfig::default().with_mode(mode)
}

/// Config for a color touch screen.
pub fn touch_config(mode: TargetMode) -> CompilerConfig {
    let mut config = config(mode);
    config.device.display_type = DisplayType::Color;
    config.device.features.insert("touch".into(), true);
    config
}

pub fn compile(project: &Project, mode: TargetMode) -> Artifact {
    Compiler::new(config(mode)).compile(project)
}

/// Every payload element of every protocol service call.
pub fn payload(artifact: &Artifact) -> Vec<Value> {
    artifact
        .document
        .as_array()
        .map(|calls| {
            calls
                .iter()
                .flat_map(|call| call["data"]["payload"].as_array().cloned().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

/// Number of non-overlapping occurrences of `needle` in `text`.
pub fn occurrences(text: &str, needle: &str) -> usize {
    text.matches(needle).count()
}
