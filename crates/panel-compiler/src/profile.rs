//! Device profile consumed read-only by the compiler.

#![allow(missing_docs)]

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    /// 1-bit monochrome, typically e-paper.
    Binary,
    Grayscale,
    Color,
}

impl DisplayType {
    pub fn parse(text: &str) -> Result<Self, CompileError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "binary" | "monochrome" | "bw" => Ok(Self::Binary),
            "grayscale" | "greyscale" => Ok(Self::Grayscale),
            "color" | "colour" | "rgb" => Ok(Self::Color),
            _ => Err(CompileError::InvalidConfig(
                format!("invalid device.display_type '{text}'").into(),
            )),
        }
    }

    /// ESPHome image asset type for this display.
    #[must_use]
    pub fn image_type(self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Grayscale => "GRAYSCALE",
            Self::Color => "RGB565",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub name: SmolStr,
    pub display_type: DisplayType,
    pub width: u32,
    pub height: u32,
    pub inverted_colors: bool,
    pub display_id: SmolStr,
    pub features: IndexMap<SmolStr, bool>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            name: SmolStr::new_inline("generic"),
            display_type: DisplayType::Binary,
            width: 800,
            height: 480,
            inverted_colors: false,
            display_id: SmolStr::new_inline("main_display"),
            features: IndexMap::new(),
        }
    }
}

impl DeviceProfile {
    /// Pure 1-bit palettes cannot show gray and need dither masks.
    #[must_use]
    pub fn palette_limited(&self) -> bool {
        self.display_type == DisplayType::Binary
    }

    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }
}
