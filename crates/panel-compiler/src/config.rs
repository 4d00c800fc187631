//! Compiler configuration loading (`panel.toml`).

#![allow(missing_docs)]

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::CompileError;
use crate::mode::TargetMode;
use crate::profile::{DeviceProfile, DisplayType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerConfig {
    pub mode: TargetMode,
    pub device: DeviceProfile,
    pub protocol: ProtocolConfig,
}

/// Service-call envelope settings for the two protocol backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub entity_id: SmolStr,
    pub background: SmolStr,
    pub rotate: u32,
    pub dither: u32,
    pub ttl: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            entity_id: SmolStr::new_inline("open_epaper_link.tag"),
            background: SmolStr::new_inline("white"),
            rotate: 0,
            dither: 2,
            ttl: 60,
        }
    }
}

impl CompilerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| CompileError::Io(format!("{}: {err}", path.display()).into()))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, CompileError> {
        let raw: PanelToml = toml::from_str(text)
            .map_err(|err| CompileError::InvalidConfig(format!("panel.toml: {err}").into()))?;
        raw.into_config()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TargetMode) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct PanelToml {
    compiler: Option<CompilerSection>,
    device: Option<DeviceSection>,
    protocol: Option<ProtocolSection>,
}

#[derive(Debug, Deserialize)]
struct CompilerSection {
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeviceSection {
    name: Option<String>,
    display_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    inverted_colors: Option<bool>,
    display_id: Option<String>,
    features: Option<IndexMap<String, bool>>,
}

#[derive(Debug, Deserialize)]
struct ProtocolSection {
    entity_id: Option<String>,
    background: Option<String>,
    rotate: Option<u32>,
    dither: Option<u32>,
    ttl: Option<u32>,
}

impl PanelToml {
    fn into_config(self) -> Result<CompilerConfig, CompileError> {
        let mut config = CompilerConfig::default();
        if let Some(mode) = self.compiler.and_then(|section| section.mode) {
            config.mode = TargetMode::parse(&mode)?;
        }
        if let Some(device) = self.device {
            let profile = &mut config.device;
            if let Some(name) = device.name {
                profile.name = name.into();
            }
            if let Some(display_type) = device.display_type {
                profile.display_type = DisplayType::parse(&display_type)?;
            }
            if let Some(width) = device.width {
                profile.width = width;
            }
            if let Some(height) = device.height {
                profile.height = height;
            }
            if let Some(inverted) = device.inverted_colors {
                profile.inverted_colors = inverted;
            }
            if let Some(display_id) = device.display_id {
                if display_id.trim().is_empty() {
                    return Err(CompileError::InvalidConfig(
                        "device.display_id must not be empty".into(),
                    ));
                }
                profile.display_id = display_id.into();
            }
            if let Some(features) = device.features {
                profile.features = features
                    .into_iter()
                    .map(|(name, enabled)| (SmolStr::new(name), enabled))
                    .collect();
            }
        }
        if let Some(protocol) = self.protocol {
            let target = &mut config.protocol;
            if let Some(entity_id) = protocol.entity_id {
                target.entity_id = entity_id.into();
            }
            if let Some(background) = protocol.background {
                target.background = background.into();
            }
            if let Some(rotate) = protocol.rotate {
                if !matches!(rotate, 0 | 90 | 180 | 270) {
                    return Err(CompileError::InvalidConfig(
                        format!("invalid protocol.rotate '{rotate}'").into(),
                    ));
                }
                target.rotate = rotate;
            }
            if let Some(dither) = protocol.dither {
                target.dither = dither;
            }
            if let Some(ttl) = protocol.ttl {
                target.ttl = ttl;
            }
        }
        Ok(config)
    }
}
