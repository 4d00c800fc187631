//! `panel-compiler` - Multi-backend layout-to-code compiler.
//!
//! Turns a project of pages and widgets into one of four artifacts:
//!
//! - **Direct**: an ESPHome display lambda of imperative draw calls
//! - **Retained**: an LVGL page and widget tree
//! - **Protocol A**: OpenEPaperLink `drawcustom` JSON payloads
//! - **Protocol B**: OpenDisplay `drawcustom` payloads
//!
//! Direct and retained output embed one marker comment per widget, and
//! [`import_project`] rebuilds the project from that text.
//!
//! # Example
//!
//! ```
//! use panel_compiler::{Compiler, CompilerConfig, Project};
//!
//! let project = Project::from_json(r#"{"pages": [{"widgets": [
//!     {"id": "w1", "type": "text", "x": 10, "y": 10, "width": 100, "height": 30,
//!      "props": {"text": "Hello"}}
//! ]}]}"#).unwrap();
//! let artifact = Compiler::new(CompilerConfig::default()).compile(&project);
//! assert!(artifact.text.contains("// widget:text id:w1"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod backend;
pub mod color;
pub mod condition;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod import;
pub mod layout;
pub mod mode;
pub mod model;
pub mod profile;
pub mod registry;
pub mod widgets;

pub use config::{CompilerConfig, ProtocolConfig};
pub use context::GenerationContext;
pub use dispatch::{Artifact, CompileStats, Compiler};
pub use error::CompileError;
pub use import::{import_project, parse_generated};
pub use mode::{SupportedModes, TargetMode};
pub use model::{DarkMode, Page, Project, Widget};
pub use profile::{DeviceProfile, DisplayType};
