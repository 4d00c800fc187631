//! `panel-syntax` - Marker lexer and line classifier for generated display code.
//!
//! Generated display code carries one comment per widget that records the
//! widget's reconstructable state:
//!
//! ```text
//! // widget:text id:w1 type:text x:10 y:10 w:100 h:30 text:"Hello world"
//! ```
//!
//! This crate provides the low-level syntax for that protocol:
//!
//! - **Lexer**: Tokenizes marker bodies into keys, quoted values and words
//! - **Marker**: Renders and parses `widget:` records with one value encoding
//! - **Line**: Classifies lines as markers, page headers, page metadata or
//!   bare draw primitives
//!
//! # Example
//!
//! ```
//! use panel_syntax::{classify_line, LineKind};
//!
//! let kind = classify_line(r#"// widget:icon id:w2 type:icon x:0 y:0 w:48 h:48 code:F0595"#);
//! let LineKind::Marker(marker) = kind else { panic!("not a marker") };
//! assert_eq!(marker.widget_type(), "icon");
//! assert_eq!(marker.get("code"), Some("F0595"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod lexer;
pub mod line;
pub mod marker;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use line::{classify, classify_line, DrawPrimitive, LineKind};
pub use marker::{encode_value, quote, unquote, MarkerRecord};
