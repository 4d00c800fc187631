//! Backend target modes and per-widget capability sets.

use std::fmt;

use crate::error::CompileError;

/// The four output representations. Selected once per generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetMode {
    /// Imperative draw statements inside a display lambda.
    #[default]
    Direct,
    /// Declarative LVGL object tree.
    Retained,
    /// OpenEPaperLink `drawcustom` payload.
    ProtocolA,
    /// OpenDisplay `drawcustom` payload.
    ProtocolB,
}

impl TargetMode {
    /// All modes in declaration order.
    pub const ALL: [TargetMode; 4] = [
        TargetMode::Direct,
        TargetMode::Retained,
        TargetMode::ProtocolA,
        TargetMode::ProtocolB,
    ];

    /// Parses a mode name or one of its backend aliases.
    pub fn parse(text: &str) -> Result<Self, CompileError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "direct" | "esphome" => Ok(Self::Direct),
            "retained" | "lvgl" => Ok(Self::Retained),
            "protocol_a" | "protocola" | "oepl" => Ok(Self::ProtocolA),
            "protocol_b" | "protocolb" | "opendisplay" | "odp" => Ok(Self::ProtocolB),
            _ => Err(CompileError::InvalidConfig(
                format!("invalid compiler.mode '{text}'").into(),
            )),
        }
    }

    /// Canonical config name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Retained => "retained",
            Self::ProtocolA => "protocol_a",
            Self::ProtocolB => "protocol_b",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Direct => 1,
            Self::Retained => 2,
            Self::ProtocolA => 4,
            Self::ProtocolB => 8,
        }
    }

    /// `true` for the two remote-rendering protocols.
    #[must_use]
    pub fn is_protocol(self) -> bool {
        matches!(self, Self::ProtocolA | Self::ProtocolB)
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of modes a widget type can be emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SupportedModes(u8);

impl SupportedModes {
    /// Every backend.
    pub const ALL: Self = Self(0b1111);
    /// Display lambda only.
    pub const DIRECT: Self = Self(1);
    /// LVGL only.
    pub const RETAINED: Self = Self(2);
    /// Both remote-rendering protocols.
    pub const PROTOCOLS: Self = Self(4 | 8);
    /// Both on-device backends.
    pub const SCREEN: Self = Self(1 | 2);

    /// Modes in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if `mode` is in the set.
    #[must_use]
    pub fn contains(self, mode: TargetMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Short `DRAB` string for listings.
    #[must_use]
    pub fn letters(self) -> String {
        TargetMode::ALL
            .iter()
            .zip(['D', 'R', 'A', 'B'])
            .filter(|(mode, _)| self.contains(**mode))
            .map(|(_, letter)| letter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_parse() {
        assert_eq!(TargetMode::parse("LVGL").unwrap(), TargetMode::Retained);
        assert_eq!(TargetMode::parse("oepl").unwrap(), TargetMode::ProtocolA);
        assert_eq!(TargetMode::parse(" odp ").unwrap(), TargetMode::ProtocolB);
        assert!(TargetMode::parse("svg").is_err());
    }

    #[test]
    fn mode_sets() {
        assert!(SupportedModes::SCREEN.contains(TargetMode::Retained));
        assert!(!SupportedModes::SCREEN.contains(TargetMode::ProtocolA));
        assert_eq!(SupportedModes::ALL.letters(), "DRAB");
        assert_eq!(SupportedModes::PROTOCOLS.letters(), "AB");
    }
}
