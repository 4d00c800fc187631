use panel_syntax::{classify, classify_line, DrawPrimitive, LineKind};

#[test]
fn markers_in_both_comment_styles() {
    for line in [
        "        // widget:icon id:w1 type:icon x:1 y:2 w:3 h:4",
        "        # widget:icon id:w1 type:icon x:1 y:2 w:3 h:4",
    ] {
        let LineKind::Marker(marker) = classify_line(line) else {
            panic!("expected marker for {line}");
        };
        assert_eq!(marker.widget_type(), "icon");
        assert_eq!(marker.get("h"), Some("4"));
    }
}

#[test]
fn malformed_marker_is_other() {
    assert_eq!(classify_line("// widget:"), LineKind::Other);
    assert_eq!(classify_line("// widgets are nice"), LineKind::Other);
}

#[test]
fn page_meta_comments() {
    assert_eq!(
        classify_line(r#"  // page:name "Living \"room\"""#),
        LineKind::PageMeta {
            key: "name".into(),
            value: "Living \"room\"".to_string()
        }
    );
    assert_eq!(
        classify_line("# page:refresh_time 60"),
        LineKind::PageMeta {
            key: "refresh_time".into(),
            value: "60".to_string()
        }
    );
}

#[test]
fn primitives_and_headers() {
    let text = "int currentPage = id(display_page);\n\
                if (currentPage == 1) {\n\
                it.filled_circle(50, 60, 10, COLOR_BLACK);\n\
                it.line(0, 0, 5, 40);\n\
                }";
    let kinds: Vec<LineKind> = classify(text).into_iter().map(|(_, kind)| kind).collect();
    assert_eq!(
        kinds,
        vec![
            LineKind::Other,
            LineKind::PageHeader(1),
            LineKind::Primitive(DrawPrimitive::Circle {
                cx: 50,
                cy: 60,
                r: 10,
                filled: true
            }),
            LineKind::Primitive(DrawPrimitive::Line {
                x1: 0,
                y1: 0,
                x2: 5,
                y2: 40
            }),
            LineKind::Other,
        ]
    );
}

#[test]
fn line_numbers_are_one_based() {
    let lines = classify("a\nb\nif (currentPage == 0) {");
    assert_eq!(lines[2], (3, LineKind::PageHeader(0)));
}

#[test]
fn plain_comments_are_other() {
    assert_eq!(classify_line("// draw the header"), LineKind::Other);
    assert_eq!(classify_line("# page:bad-key x"), LineKind::Other);
    assert_eq!(classify_line(""), LineKind::Other);
}

#[test]
fn sections_with_page_like_ids_are_not_headers() {
    assert_eq!(classify_line("  - id: display_page"), LineKind::Other);
    assert_eq!(classify_line("  - id: page_refresh_default_s"), LineKind::Other);
    assert_eq!(classify_line("    - id: page_2"), LineKind::PageHeader(2));
}
