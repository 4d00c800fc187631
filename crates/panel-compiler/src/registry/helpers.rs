//! Draw helper lambdas shared by widget blocks in the display lambda.

use std::collections::BTreeSet;

/// One helper lambda. The derived order is the prelude order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawHelper {
    /// `apply_grey_dither_mask(x, y, w, h)`
    DitherRect,
    /// `apply_grey_dither_rrect(x, y, w, h, r, band)`
    DitherRoundedRect,
    /// `apply_grey_dither_circle(cx, cy, r, band)`
    DitherCircle,
    /// `draw_filled_rrect(x, y, w, h, r, color)`
    FilledRoundedRect,
    /// `draw_rrect_border(x, y, w, h, r, thickness, color)`
    RoundedRectBorder,
}

impl DrawHelper {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DitherRect => "apply_grey_dither_mask",
            Self::DitherRoundedRect => "apply_grey_dither_rrect",
            Self::DitherCircle => "apply_grey_dither_circle",
            Self::FilledRoundedRect => "draw_filled_rrect",
            Self::RoundedRectBorder => "draw_rrect_border",
        }
    }

    /// C++ source of the lambda.
    #[must_use]
    pub fn source(self) -> &'static [&'static str] {
        match self {
            Self::DitherRect => &[
                "auto apply_grey_dither_mask = [&](int x0, int y0, int w, int h) {",
                "  for (int py = y0; py < y0 + h; py++) {",
                "    for (int px = x0; px < x0 + w; px++) {",
                "      if ((px + py) % 2 == 0) it.draw_pixel_at(px, py, COLOR_BLACK);",
                "    }",
                "  }",
                "};",
            ],
            Self::DitherRoundedRect => &[
                "auto apply_grey_dither_rrect = [&](int x0, int y0, int w, int h, int r, int band) {",
                "  auto inside = [&](int px, int py, int inset) -> bool {",
                "    int ix = x0 + inset, iy = y0 + inset, iw = w - 2 * inset, ih = h - 2 * inset;",
                "    if (iw <= 0 || ih <= 0) return false;",
                "    if (px < ix || py < iy || px >= ix + iw || py >= iy + ih) return false;",
                "    int ir = std::max(0, std::min(r - inset, std::min(iw, ih) / 2));",
                "    int cx = px < ix + ir ? ix + ir : (px >= ix + iw - ir ? ix + iw - ir - 1 : px);",
                "    int cy = py < iy + ir ? iy + ir : (py >= iy + ih - ir ? iy + ih - ir - 1 : py);",
                "    return (px - cx) * (px - cx) + (py - cy) * (py - cy) <= ir * ir;",
                "  };",
                "  for (int py = y0; py < y0 + h; py++) {",
                "    for (int px = x0; px < x0 + w; px++) {",
                "      if ((px + py) % 2 != 0 || !inside(px, py, 0)) continue;",
                "      if (band > 0 && inside(px, py, band)) continue;",
                "      it.draw_pixel_at(px, py, COLOR_BLACK);",
                "    }",
                "  }",
                "};",
            ],
            Self::DitherCircle => &[
                "auto apply_grey_dither_circle = [&](int cx, int cy, int r, int band) {",
                "  int inner = band > 0 ? r - band : -1;",
                "  for (int py = cy - r; py <= cy + r; py++) {",
                "    for (int px = cx - r; px <= cx + r; px++) {",
                "      int d = (px - cx) * (px - cx) + (py - cy) * (py - cy);",
                "      if ((px + py) % 2 != 0 || d > r * r) continue;",
                "      if (inner >= 0 && d <= inner * inner) continue;",
                "      it.draw_pixel_at(px, py, COLOR_BLACK);",
                "    }",
                "  }",
                "};",
            ],
            Self::FilledRoundedRect => &[
                "auto draw_filled_rrect = [&](int x0, int y0, int w, int h, int r, Color c) {",
                "  r = std::max(0, std::min(r, std::min(w, h) / 2));",
                "  it.filled_rectangle(x0 + r, y0, w - 2 * r, h, c);",
                "  it.filled_rectangle(x0, y0 + r, r, h - 2 * r, c);",
                "  it.filled_rectangle(x0 + w - r, y0 + r, r, h - 2 * r, c);",
                "  it.filled_circle(x0 + r, y0 + r, r, c);",
                "  it.filled_circle(x0 + w - r - 1, y0 + r, r, c);",
                "  it.filled_circle(x0 + r, y0 + h - r - 1, r, c);",
                "  it.filled_circle(x0 + w - r - 1, y0 + h - r - 1, r, c);",
                "};",
            ],
            Self::RoundedRectBorder => &[
                "auto draw_rrect_border = [&](int x0, int y0, int w, int h, int r, int t, Color c) {",
                "  auto inside = [&](int px, int py, int inset) -> bool {",
                "    int ix = x0 + inset, iy = y0 + inset, iw = w - 2 * inset, ih = h - 2 * inset;",
                "    if (iw <= 0 || ih <= 0) return false;",
                "    if (px < ix || py < iy || px >= ix + iw || py >= iy + ih) return false;",
                "    int ir = std::max(0, std::min(r - inset, std::min(iw, ih) / 2));",
                "    int cx = px < ix + ir ? ix + ir : (px >= ix + iw - ir ? ix + iw - ir - 1 : px);",
                "    int cy = py < iy + ir ? iy + ir : (py >= iy + ih - ir ? iy + ih - ir - 1 : py);",
                "    return (px - cx) * (px - cx) + (py - cy) * (py - cy) <= ir * ir;",
                "  };",
                "  for (int py = y0; py < y0 + h; py++) {",
                "    for (int px = x0; px < x0 + w; px++) {",
                "      if (inside(px, py, 0) && !inside(px, py, t)) it.draw_pixel_at(px, py, c);",
                "    }",
                "  }",
                "};",
            ],
        }
    }
}

/// Helpers requested during one pass, emitted once each.
#[derive(Debug, Default, Clone)]
pub struct HelperSet {
    helpers: BTreeSet<DrawHelper>,
}

impl HelperSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, helper: DrawHelper) {
        self.helpers.insert(helper);
    }

    #[must_use]
    pub fn contains(&self, helper: DrawHelper) -> bool {
        self.helpers.contains(&helper)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Prelude lines in fixed helper order.
    #[must_use]
    pub fn prelude(&self) -> Vec<String> {
        self.helpers
            .iter()
            .flat_map(|helper| helper.source().iter().map(|line| (*line).to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_order_is_fixed() {
        let mut set = HelperSet::new();
        set.require(DrawHelper::RoundedRectBorder);
        set.require(DrawHelper::DitherRect);
        set.require(DrawHelper::DitherRect);
        let prelude = set.prelude();
        let first = prelude.iter().position(|line| line.contains("apply_grey_dither_mask ="));
        let second = prelude.iter().position(|line| line.contains("draw_rrect_border ="));
        assert!(first < second);
        assert_eq!(
            prelude.iter().filter(|line| line.starts_with("auto ")).count(),
            2
        );
    }
}
