//! Vertical stack centering and text anchors.

#![allow(missing_docs)]

use crate::model::Widget;

/// One block of a vertical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackBlock {
    pub height: i32,
    /// Extra offset before the next block. Not part of the centered total;
    /// use a spacer block for spacing that should be centered.
    pub gap_after: i32,
}

impl StackBlock {
    #[must_use]
    pub const fn new(height: i32) -> Self {
        Self { height, gap_after: 0 }
    }

    #[must_use]
    pub const fn with_gap(height: i32, gap_after: i32) -> Self {
        Self { height, gap_after }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackLayout {
    pub top_padding: i32,
    /// Offsets from the widget's top edge, one per block.
    pub offsets: Vec<i32>,
}

/// Centers a stack of blocks inside `widget_height`.
#[must_use]
pub fn center_stack(blocks: &[StackBlock], widget_height: i32) -> StackLayout {
    let total: i32 = blocks.iter().map(|block| block.height).sum();
    let spare = widget_height - total;
    // round(spare / 2) with halves away from zero, floored at 0
    let top_padding = if spare > 0 { (spare + 1) / 2 } else { 0 };
    let mut cursor = top_padding;
    let offsets = blocks
        .iter()
        .map(|block| {
            let offset = cursor;
            cursor += block.height + block.gap_after;
            offset
        })
        .collect();
    StackLayout { top_padding, offsets }
}

#[must_use]
pub fn center_x(widget: &Widget) -> i32 {
    widget.x + widget.width / 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// `TOP_LEFT` ... `BOTTOM_RIGHT`, plus `CENTER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAlign {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

impl TextAlign {
    pub const TOP_LEFT: Self = Self { horizontal: HAlign::Left, vertical: VAlign::Top };
    pub const TOP_CENTER: Self = Self { horizontal: HAlign::Center, vertical: VAlign::Top };
    pub const CENTER: Self = Self { horizontal: HAlign::Center, vertical: VAlign::Middle };

    /// Lenient parse; unknown values are top-left.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_ascii_uppercase().replace('-', "_");
        if text == "CENTER" || text == "MIDDLE" {
            return Self::CENTER;
        }
        let (vertical, horizontal) = text.split_once('_').unwrap_or(("TOP", text.as_str()));
        let vertical = match vertical {
            "CENTER" | "MIDDLE" => VAlign::Middle,
            "BOTTOM" => VAlign::Bottom,
            _ => VAlign::Top,
        };
        let horizontal = match horizontal {
            "CENTER" | "MIDDLE" => HAlign::Center,
            "RIGHT" => HAlign::Right,
            _ => HAlign::Left,
        };
        Self { horizontal, vertical }
    }

    /// Anchor point inside the widget box.
    #[must_use]
    pub fn anchor(self, widget: &Widget) -> (i32, i32) {
        let x = match self.horizontal {
            HAlign::Left => widget.x,
            HAlign::Center => widget.x + widget.width / 2,
            HAlign::Right => widget.x + widget.width,
        };
        let y = match self.vertical {
            VAlign::Top => widget.y,
            VAlign::Middle => widget.y + widget.height / 2,
            VAlign::Bottom => widget.y + widget.height,
        };
        (x, y)
    }

    /// `TextAlign::TOP_LEFT`, `TextAlign::CENTER`, ...
    #[must_use]
    pub fn esphome(self) -> String {
        if self == Self::CENTER {
            return "TextAlign::CENTER".to_string();
        }
        let vertical = match self.vertical {
            VAlign::Top => "TOP",
            VAlign::Middle => "CENTER",
            VAlign::Bottom => "BOTTOM",
        };
        let horizontal = match self.horizontal {
            HAlign::Left => "LEFT",
            HAlign::Center => "CENTER",
            HAlign::Right => "RIGHT",
        };
        format!("TextAlign::{vertical}_{horizontal}")
    }

    /// Marker and config spelling; inverse of [`TextAlign::parse`].
    #[must_use]
    pub fn as_token(self) -> String {
        self.esphome().trim_start_matches("TextAlign::").to_string()
    }

    /// Two-letter anchor of the drawing protocols: `lt`, `mm`, `rb`, ...
    #[must_use]
    pub fn protocol_anchor(self) -> &'static str {
        match (self.horizontal, self.vertical) {
            (HAlign::Left, VAlign::Top) => "lt",
            (HAlign::Left, VAlign::Middle) => "lm",
            (HAlign::Left, VAlign::Bottom) => "lb",
            (HAlign::Center, VAlign::Top) => "mt",
            (HAlign::Center, VAlign::Middle) => "mm",
            (HAlign::Center, VAlign::Bottom) => "mb",
            (HAlign::Right, VAlign::Top) => "rt",
            (HAlign::Right, VAlign::Middle) => "rm",
            (HAlign::Right, VAlign::Bottom) => "rb",
        }
    }

    #[must_use]
    pub fn horizontal_name(self) -> &'static str {
        match self.horizontal {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        }
    }

    /// LVGL `text_align` value.
    #[must_use]
    pub fn lvgl(self) -> &'static str {
        match self.horizontal {
            HAlign::Left => "LEFT",
            HAlign::Center => "CENTER",
            HAlign::Right => "RIGHT",
        }
    }
}

/// Baselines for `lines` text lines at `pitch`, anchored like `align` at `anchor_y`.
#[must_use]
pub fn line_offsets(align: TextAlign, anchor_y: i32, lines: usize, pitch: i32) -> Vec<i32> {
    let count = i32::try_from(lines).unwrap_or(i32::MAX);
    let first = match align.vertical {
        VAlign::Top => anchor_y,
        VAlign::Middle => anchor_y - (count - 1) * pitch / 2,
        VAlign::Bottom => anchor_y - (count - 1) * pitch,
    };
    (0..count).map(|index| first + index * pitch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_stack_with_spacer() {
        let layout = center_stack(
            &[StackBlock::with_gap(32, 2), StackBlock::new(2), StackBlock::new(16)],
            60,
        );
        assert_eq!(layout.top_padding, 5);
        assert_eq!(layout.offsets, vec![5, 39, 41]);
    }

    #[test]
    fn overfull_stack_has_no_padding() {
        let layout = center_stack(&[StackBlock::new(80)], 60);
        assert_eq!(layout.top_padding, 0);
    }

    #[test]
    fn align_parse_and_render() {
        assert_eq!(TextAlign::parse("center").esphome(), "TextAlign::CENTER");
        assert_eq!(TextAlign::parse("BOTTOM_RIGHT").as_token(), "BOTTOM_RIGHT");
        assert_eq!(TextAlign::parse("TOP_CENTER").protocol_anchor(), "mt");
        assert_eq!(TextAlign::parse("CENTER_LEFT").esphome(), "TextAlign::CENTER_LEFT");
        assert_eq!(TextAlign::parse("garbage"), TextAlign::TOP_LEFT);
    }
}
