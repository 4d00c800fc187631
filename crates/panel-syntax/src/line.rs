//! Classification of generated display text, one line at a time.
//!
//! Recognises widget markers, page headers, page metadata comments and bare
//! draw primitives. Everything else is [`LineKind::Other`].

#![allow(missing_docs)]

use smol_str::SmolStr;

use crate::marker::{unquote, MarkerRecord, MARKER_KEY};

/// Prefix of page metadata comments: `// page:name "Main"`.
pub const PAGE_META_KEY: &str = "page";

/// What a single line of generated text contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A widget marker comment.
    Marker(MarkerRecord),
    /// Start of the page with the given index.
    PageHeader(u32),
    /// `page:<key> "<value>"` comment.
    PageMeta { key: SmolStr, value: String },
    /// A draw call without a marker.
    Primitive(DrawPrimitive),
    /// Anything else.
    Other,
}

/// Draw calls recovered without a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPrimitive {
    Rectangle {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        filled: bool,
    },
    Circle {
        cx: i32,
        cy: i32,
        r: i32,
        filled: bool,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
}

/// Classifies one line.
#[must_use]
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Other;
    }
    if let Some(body) = comment_body(trimmed) {
        return classify_comment(body);
    }
    if let Some(index) = page_header(trimmed) {
        return LineKind::PageHeader(index);
    }
    if let Some(primitive) = primitive(trimmed) {
        return LineKind::Primitive(primitive);
    }
    LineKind::Other
}

/// Classifies every line of a text, keeping 1-based line numbers.
#[must_use]
pub fn classify(text: &str) -> Vec<(usize, LineKind)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, classify_line(line)))
        .collect()
}

fn comment_body(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("//")
        .or_else(|| trimmed.strip_prefix('#'))
        .map(str::trim_start)
}

fn classify_comment(body: &str) -> LineKind {
    if body
        .strip_prefix(MARKER_KEY)
        .is_some_and(|rest| rest.starts_with(':'))
    {
        return match MarkerRecord::parse(body) {
            Some(record) => LineKind::Marker(record),
            None => LineKind::Other,
        };
    }
    if let Some(rest) = body
        .strip_prefix(PAGE_META_KEY)
        .and_then(|rest| rest.strip_prefix(':'))
    {
        let (key, value) = match rest.find(char::is_whitespace) {
            Some(split) => (&rest[..split], rest[split..].trim()),
            None => (rest, ""),
        };
        if key.is_empty() || !key.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return LineKind::Other;
        }
        let value = if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
            unquote(value)
        } else {
            value.to_string()
        };
        return LineKind::PageMeta {
            key: SmolStr::new(key),
            value,
        };
    }
    LineKind::Other
}

/// `if (currentPage == 2) {`, `} else if (id(display_page) == 2) {`,
/// `if (page == 2)` or the retained form `- id: page_2`.
fn page_header(trimmed: &str) -> Option<u32> {
    if let Some(rest) = trimmed.strip_prefix("- id:") {
        return rest.trim().strip_prefix("page_")?.parse().ok();
    }
    if trimmed.starts_with("it.") {
        return None;
    }
    let compact: String = trimmed.chars().filter(|ch| !ch.is_whitespace()).collect();
    let rest = compact
        .strip_prefix("if(")
        .or_else(|| compact.strip_prefix("}elseif("))?;
    let rest = ["currentPage==", "id(display_page)==", "page=="]
        .iter()
        .find_map(|lead| rest.strip_prefix(lead))?;
    let digits_end = rest.find(|ch: char| !ch.is_ascii_digit())?;
    if digits_end == 0 || !rest[digits_end..].starts_with(')') {
        return None;
    }
    rest[..digits_end].parse().ok()
}

fn primitive(trimmed: &str) -> Option<DrawPrimitive> {
    let call = trimmed.strip_prefix("it.")?;
    let open = call.find('(')?;
    let close = call.rfind(')')?;
    if close < open {
        return None;
    }
    let name = &call[..open];
    let args: Vec<&str> = call[open + 1..close].split(',').map(str::trim).collect();
    let ints = |count: usize| -> Option<Vec<i32>> {
        if args.len() < count {
            return None;
        }
        args[..count].iter().map(|arg| arg.parse().ok()).collect()
    };
    match name {
        "rectangle" | "filled_rectangle" => {
            let v = ints(4)?;
            Some(DrawPrimitive::Rectangle {
                x: v[0],
                y: v[1],
                w: v[2],
                h: v[3],
                filled: name == "filled_rectangle",
            })
        }
        "circle" | "filled_circle" => {
            let v = ints(3)?;
            Some(DrawPrimitive::Circle {
                cx: v[0],
                cy: v[1],
                r: v[2],
                filled: name == "filled_circle",
            })
        }
        "line" => {
            let v = ints(4)?;
            Some(DrawPrimitive::Line {
                x1: v[0],
                y1: v[1],
                x2: v[2],
                y2: v[3],
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_header_forms() {
        assert_eq!(page_header("if (currentPage == 3) {"), Some(3));
        assert_eq!(page_header("} else if (id(display_page) == 1) {"), Some(1));
        assert_eq!(page_header("if(page==0)"), Some(0));
        assert_eq!(page_header("- id: page_4"), Some(4));
        assert_eq!(page_header("if (currentPage == x) {"), None);
        assert_eq!(page_header("if (currentPage == 12"), None);
        assert_eq!(page_header("it.printf(0, 0, id(f), \"if (page == 3) go\");"), None);
        assert_eq!(page_header("x = 1; if (page == 3) {"), None);
    }

    #[test]
    fn primitive_requires_integer_args() {
        assert_eq!(
            primitive("it.rectangle(1, 2, 3, 4, COLOR_BLACK);"),
            Some(DrawPrimitive::Rectangle {
                x: 1,
                y: 2,
                w: 3,
                h: 4,
                filled: false
            })
        );
        assert_eq!(primitive("it.rectangle(x + i, 2, 3, 4);"), None);
        assert_eq!(primitive("it.print(1, 2, id(f), \"x\");"), None);
    }
}
