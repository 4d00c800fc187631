//! Per-pass generation state.

#![allow(missing_docs)]

use smol_str::SmolStr;

use crate::color::{needs_dither, resolve_color, Color, DitherShape, Paint};
use crate::mode::TargetMode;
use crate::profile::DeviceProfile;
use crate::registry::{
    DrawHelper, FontRegistry, HelperSet, IconRegistry, SensorLedger, TriggerMap,
};

/// Services and accumulators of one generation pass.
///
/// Created by the dispatcher at the start of a pass and dropped at its end.
/// Widget emitters borrow it mutably and only ever add to it.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    mode: TargetMode,
    profile: &'a DeviceProfile,
    pub fonts: FontRegistry,
    pub icons: IconRegistry,
    pub ledger: SensorLedger,
    pub triggers: TriggerMap,
    pub helpers: HelperSet,
    lines: Vec<String>,
    dark: bool,
}

impl<'a> GenerationContext<'a> {
    #[must_use]
    pub fn new(mode: TargetMode, profile: &'a DeviceProfile) -> Self {
        Self {
            mode,
            profile,
            fonts: FontRegistry::new(),
            icons: IconRegistry::new(),
            ledger: SensorLedger::new(),
            triggers: TriggerMap::new(),
            helpers: HelperSet::new(),
            lines: Vec::new(),
            dark: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    #[must_use]
    pub fn profile(&self) -> &'a DeviceProfile {
        self.profile
    }

    pub fn set_page_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    /// Effective dark-mode flag of the page being emitted.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    #[must_use]
    pub fn is_palette_limited(&self) -> bool {
        self.profile.palette_limited()
    }

    /// Appends one statement to the line buffer.
    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend_lines(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    /// Takes the statements emitted since the last call.
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    pub fn font(&mut self, family: &str, weight: u16, size: u32, italic: bool) -> SmolStr {
        self.fonts.add_font(family, weight, size, italic)
    }

    pub fn color(&self, token: &str) -> Color {
        resolve_color(token, self.dark)
    }

    /// Display-lambda color; transparent maps to the page background.
    pub fn direct_color(&self, token: &str) -> String {
        self.color(token)
            .or_background(self.dark)
            .direct(self.profile.inverted_colors)
    }

    pub fn retained_color(&self, token: &str) -> String {
        self.color(token).retained()
    }

    pub fn protocol_color(&self, token: &str) -> String {
        self.color(token).or_background(self.dark).protocol()
    }

    /// Page background in display-lambda notation.
    pub fn direct_background(&self) -> String {
        self.direct_color(if self.dark { "black" } else { "white" })
    }

    /// Decides how a fill or border in `token` is painted on this device.
    pub fn paint(&self, token: &str) -> Paint {
        let color = self.color(token);
        if needs_dither(color, self.is_palette_limited()) {
            Paint::Dither
        } else {
            Paint::Solid(color.or_background(self.dark).direct(self.profile.inverted_colors))
        }
    }

    /// Emits a dither mask and requests its helper.
    pub fn dither(&mut self, shape: DitherShape) {
        self.helpers.require(shape.helper());
        let statements = shape.statements();
        self.lines.extend(statements);
    }

    pub fn require_helper(&mut self, helper: DrawHelper) {
        self.helpers.require(helper);
    }
}
