use expect_test::expect;
use panel_syntax::lexer::{lex, lex_with_text, TokenKind};
use panel_syntax::MarkerRecord;

fn non_trivia_kinds(source: &str) -> Vec<TokenKind> {
    lex_with_text(source)
        .into_iter()
        .filter(|(token, _)| !token.kind.is_trivia())
        .map(|(token, _)| token.kind)
        .collect()
}

#[test]
fn marker_body_tokens() {
    assert_eq!(
        non_trivia_kinds(r#"widget:text id:w1 text:"Hi there" x:10"#),
        vec![
            TokenKind::Key,
            TokenKind::Word,
            TokenKind::Key,
            TokenKind::Word,
            TokenKind::Key,
            TokenKind::Quoted,
            TokenKind::Key,
            TokenKind::Word
        ]
    );
}

#[test]
fn render_quotes_only_when_needed() {
    let marker = MarkerRecord::new("sensor_text")
        .with("id", "w_temp")
        .with("type", "sensor_text")
        .with("x", "10")
        .with("ent", "sensor.living_room")
        .with("title", "Living room")
        .with("unit", "")
        .with("color", "#a0a0a0");
    expect![[r#"widget:sensor_text id:w_temp type:sensor_text x:10 ent:sensor.living_room title:"Living room" unit:"" color:#a0a0a0"#]]
        .assert_eq(&marker.render());
}

#[test]
fn render_then_parse_preserves_awkward_values() {
    let marker = MarkerRecord::new("text")
        .with("id", "w1")
        .with("text", "Say \"hi\": C:\\temp\nnext line")
        .with("empty", "")
        .with("spaced", "  padded  ");
    let parsed = MarkerRecord::parse(&marker.render()).expect("marker");
    assert_eq!(parsed, marker);
}

#[test]
fn legacy_bare_values_with_spaces() {
    let parsed = MarkerRecord::parse("widget:text id:w9 type:text text:Hello big world align:CENTER")
        .expect("marker");
    assert_eq!(parsed.get("text"), Some("Hello big world"));
    assert_eq!(parsed.get("align"), Some("CENTER"));
}

#[test]
fn legacy_quoted_values_without_escapes() {
    let parsed = MarkerRecord::parse(r#"widget:image id:img type:image path:"/config/www/my photo.png""#)
        .expect("marker");
    assert_eq!(parsed.get("path"), Some("/config/www/my photo.png"));
}

#[test]
fn body_without_widget_lead_is_rejected() {
    assert!(MarkerRecord::parse("id:w1 type:text").is_none());
    assert!(MarkerRecord::parse("widget: id:w1").is_none());
    assert!(MarkerRecord::parse(r#"widget:"bad type" id:w1"#).is_none());
}

#[test]
fn first_occurrence_of_a_key_wins_when_parsing() {
    let parsed = MarkerRecord::parse("widget:line id:a x:1 x:2").expect("marker");
    assert_eq!(parsed.get("x"), Some("1"));
    assert_eq!(parsed.len(), 2);
}

#[test]
fn lexer_covers_unterminated_quotes() {
    let body = "id:w1 text:\"open";
    let tokens = lex(body);
    let covered: usize = tokens.iter().map(|token| token.text(body).len()).sum();
    assert_eq!(covered, body.len());
    assert_eq!(tokens[0].kind, TokenKind::Key);
}

#[test]
fn carriage_returns_are_escaped() {
    let marker = MarkerRecord::new("text")
        .with("id", "w1")
        .with("text", "a\rb\r\nc")
        .with("color", "black");
    let rendered = marker.render();
    assert!(!rendered.contains('\r'));
    assert!(rendered.contains(r#"text:"a\rb\r\nc""#));
    assert_eq!(MarkerRecord::parse(&rendered), Some(marker));
}
