mod common;

use common::*;
use panel_compiler::{import_project, parse_generated};
use serde_json::Value;

fn geometry(widget: &Widget) -> (&str, &str, i32, i32, i32, i32) {
    (
        widget.id.as_str(),
        widget.widget_type.as_str(),
        widget.x,
        widget.y,
        widget.width,
        widget.height,
    )
}

#[test]
fn project_json_without_pages_is_rejected() {
    assert_eq!(import_project("{}").unwrap_err(), CompileError::MissingPages);
    assert_eq!(
        import_project(r#"{"pages": "none"}"#).unwrap_err(),
        CompileError::MissingPages
    );
}

#[test]
fn text_without_anything_recoverable_is_rejected() {
    assert_eq!(
        parse_generated("// just a comment\nint x = 1;\n").unwrap_err(),
        CompileError::MissingPages
    );
    assert_eq!(import_project("").unwrap_err(), CompileError::MissingPages);
}

#[test]
fn bare_draw_calls_become_shapes() {
    let text = "\
if (currentPage == 0) {
  it.rectangle(10, 20, 30, 40, COLOR_BLACK);
  it.filled_circle(50, 50, 5, COLOR_BLACK);
  it.line(0, 7, 100, 7, COLOR_BLACK);
  it.rectangle(1, 1, 2, 2);
}
";
    let project = parse_generated(text).expect("project");
    let widgets: Vec<_> = project.widgets().map(geometry).collect();
    assert_eq!(
        widgets,
        vec![
            ("w_rect_0", "shape_rect", 10, 20, 30, 40),
            ("w_fcircle_0", "shape_circle", 45, 45, 10, 10),
            ("w_line_0", "line", 0, 7, 100, 1),
            ("w_rect_1", "shape_rect", 1, 1, 2, 2),
        ]
    );
    let filled = &project.pages[0].widgets[1];
    assert_eq!(filled.props.get("fill"), Some(&Value::Bool(true)));
}

#[test]
fn draw_calls_inside_a_marked_widget_are_not_duplicated() {
    let text = "\
if (currentPage == 0) {
  // widget:shape_rect id:box type:shape_rect x:0 y:0 w:20 h:20 fill:true
  it.filled_rectangle(0, 0, 20, 20, COLOR_BLACK);
}
if (currentPage == 1) {
  it.rectangle(5, 5, 10, 10, COLOR_BLACK);
}
";
    let project = parse_generated(text).expect("project");
    assert_eq!(project.pages.len(), 2);
    assert_eq!(project.pages[0].widgets.len(), 1);
    assert_eq!(project.pages[0].widgets[0].id, "box");
    assert_eq!(project.pages[1].widgets[0].id, "w_rect_0");
}

#[test]
fn markers_resolve_aliases_and_default_sizes() {
    let text = "\
// widget:label id:greeting text:\"Hi there\"
// widget:battery_icon id:bat x:4 y:5
";
    let project = parse_generated(text).expect("project");
    let widgets = &project.pages[0].widgets;
    assert_eq!(widgets[0].widget_type, "text");
    assert_eq!(widgets[0].props.get("text"), Some(&Value::from("Hi there")));
    assert_eq!(geometry(&widgets[1]), ("bat", "battery_icon", 4, 5, 60, 60));
}

#[test]
fn unknown_markers_are_skipped() {
    let text = "\
if (currentPage == 0) {
  // widget:hologram id:h x:0 y:0
  it.rectangle(1, 2, 3, 4, COLOR_BLACK);
}
";
    let project = parse_generated(text).expect("project");
    let ids: Vec<&str> = project.widgets().map(|widget| widget.id.as_str()).collect();
    assert_eq!(ids, vec!["w_rect_0"]);
}

#[test]
fn page_metadata_is_restored() {
    let text = "\
if (currentPage == 3) {
  // page:name \"Kitchen\"
  // page:dark_mode \"light\"
  // page:refresh_type \"interval\"
}
";
    let project = parse_generated(text).expect("project");
    let page = &project.pages[0];
    assert_eq!(page.name, "Kitchen");
    assert_eq!(page.dark_mode, panel_compiler::DarkMode::Light);
    assert_eq!(page.refresh_type.as_deref(), Some("interval"));
    assert_eq!(page.id, "page_3");
}

#[test]
fn missing_ids_are_filled_on_import() {
    let project = parse_generated("// widget:text x:1 y:2 w:3 h:4\n").expect("project");
    assert_eq!(project.pages[0].widgets[0].id, "w_0_0");
    assert_eq!(project.pages[0].name, "Page 1");
}

#[test]
fn oversized_primitives_are_clamped_instead_of_overflowing() {
    let project = parse_generated(
        "if (currentPage == 0) {\n\
         it.circle(0, 0, 2000000000);\n\
         it.line(-2000000000, 0, 2000000000, 0);\n\
         }",
    )
    .expect("import");
    let widgets = &project.pages[0].widgets;
    assert_eq!(geometry(&widgets[0]), ("w_circle_0", "shape_circle", -2_000_000_000, -2_000_000_000, i32::MAX, i32::MAX));
    assert_eq!(geometry(&widgets[1]), ("w_line_0", "line", -2_000_000_000, 0, i32::MAX, 1));
}
