//! Icon glyph registry, grouped by rendered size.

use std::collections::{BTreeMap, BTreeSet};

use smol_str::SmolStr;

#[derive(Debug, Default, Clone)]
pub struct IconRegistry {
    by_size: BTreeMap<u32, BTreeSet<SmolStr>>,
}

impl IconRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a glyph at a size. Returns the normalised codepoint, or
    /// `None` when the code is not a 4-5 digit hex codepoint.
    pub fn track_icon(&mut self, code: &str, size: u32) -> Option<SmolStr> {
        let code = normalize_codepoint(code)?;
        self.by_size
            .entry(size.max(1))
            .or_default()
            .insert(code.clone());
        Some(code)
    }

    #[must_use]
    pub fn contains(&self, code: &str, size: u32) -> bool {
        normalize_codepoint(code)
            .is_some_and(|code| self.by_size.get(&size).is_some_and(|set| set.contains(&code)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }

    /// Total number of (size, glyph) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_size.values().map(BTreeSet::len).sum()
    }

    /// Sizes in ascending order with their sorted glyph sets.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BTreeSet<SmolStr>)> {
        self.by_size.iter().map(|(size, set)| (*size, set))
    }

    /// Id of the icon font for a size.
    #[must_use]
    pub fn font_id(size: u32) -> SmolStr {
        SmolStr::new(format!("font_mdi_{size}"))
    }

    /// C++/YAML escape for a codepoint: `\U000F0595`.
    #[must_use]
    pub fn escape(code: &str) -> String {
        format!("\\U{code:0>8}")
    }
}

/// Accepts `F0595`, `f0595`, `0xF0595`, `U+F0595` and `mdi:F0595`.
#[must_use]
pub fn normalize_codepoint(code: &str) -> Option<SmolStr> {
    let mut code = code.trim();
    for prefix in ["mdi:", "0x", "0X", "U+", "u+"] {
        if let Some(rest) = code.strip_prefix(prefix) {
            code = rest;
        }
    }
    let valid = (4..=5).contains(&code.len()) && code.chars().all(|ch| ch.is_ascii_hexdigit());
    valid.then(|| SmolStr::new(code.to_ascii_uppercase()))
}
