//! Font registry: one manifest entry per distinct font requirement.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ident::slug;
use super::icons::IconRegistry;

/// Family used when a widget leaves it blank.
pub const DEFAULT_FAMILY: &str = "Roboto";

/// Font identity tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontRequirement {
    pub family: SmolStr,
    pub weight: u16,
    pub size: u32,
    pub italic: bool,
}

impl FontRequirement {
    #[must_use]
    pub fn new(family: &str, weight: u16, size: u32, italic: bool) -> Self {
        let family = family.trim();
        Self {
            family: SmolStr::new(if family.is_empty() { DEFAULT_FAMILY } else { family }),
            weight: if weight == 0 { 400 } else { weight },
            size: size.max(1),
            italic,
        }
    }

    /// `font_<family>_<weight>_<size>[_italic]`
    #[must_use]
    pub fn id(&self) -> SmolStr {
        let mut id = format!("font_{}_{}_{}", slug(&self.family), self.weight, self.size);
        if self.italic {
            id.push_str("_italic");
        }
        SmolStr::new(id)
    }
}

/// Registered text fonts in registration order, keyed by font id.
#[derive(Debug, Default, Clone)]
pub struct FontRegistry {
    fonts: IndexMap<SmolStr, FontRequirement>,
}

impl FontRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a font and returns its id. Repeated requests return the
    /// same id and leave the manifest unchanged.
    pub fn add_font(&mut self, family: &str, weight: u16, size: u32, italic: bool) -> SmolStr {
        self.add(FontRequirement::new(family, weight, size, italic))
    }

    pub fn add(&mut self, requirement: FontRequirement) -> SmolStr {
        let id = requirement.id();
        self.fonts.entry(id.clone()).or_insert(requirement);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &FontRequirement)> {
        self.fonts.iter()
    }

    /// Entries of the `font:` section: text fonts followed by one icon font
    /// per size.
    #[must_use]
    pub fn manifest_lines(&self, icons: &IconRegistry) -> Vec<String> {
        let mut lines = Vec::new();
        if self.fonts.is_empty() && icons.is_empty() {
            push_text_font(&mut lines, &FontRequirement::new(DEFAULT_FAMILY, 400, 20, false));
        }
        for requirement in self.fonts.values() {
            push_text_font(&mut lines, requirement);
        }
        for (size, glyphs) in icons.iter() {
            lines.push("  - file: \"fonts/materialdesignicons-webfont.ttf\"".to_string());
            lines.push(format!("    id: {}", IconRegistry::font_id(size)));
            lines.push(format!("    size: {size}"));
            lines.push("    glyphs:".to_string());
            for glyph in glyphs {
                lines.push(format!("      - \"{}\"", IconRegistry::escape(glyph)));
            }
        }
        lines
    }
}

fn push_text_font(lines: &mut Vec<String>, requirement: &FontRequirement) {
    lines.push("  - file:".to_string());
    lines.push("      type: gfonts".to_string());
    lines.push(format!("      family: {}", requirement.family));
    lines.push(format!("      weight: {}", requirement.weight));
    if requirement.italic {
        lines.push("      italic: true".to_string());
    }
    lines.push(format!("    id: {}", requirement.id()));
    lines.push(format!("    size: {}", requirement.size));
    lines.push("    glyphsets:".to_string());
    lines.push("      - GF_Latin_Core".to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_family_weight_size() {
        let mut fonts = FontRegistry::new();
        assert_eq!(fonts.add_font("Open Sans", 700, 28, true), "font_open_sans_700_28_italic");
        assert_eq!(fonts.add_font("", 0, 20, false), "font_roboto_400_20");
    }

    #[test]
    fn empty_registry_falls_back_to_roboto() {
        let lines = FontRegistry::new().manifest_lines(&IconRegistry::new());
        assert!(lines.iter().any(|line| line == "    id: font_roboto_400_20"));
    }
}
