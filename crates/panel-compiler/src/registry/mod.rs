//! Identifier and resource registries.
//!
//! All registries are write-once-visible within one generation pass and are
//! owned by its [`GenerationContext`](crate::context::GenerationContext).

#![allow(missing_docs)]

pub mod fonts;
pub mod helpers;
pub mod icons;
pub mod ident;
pub mod sensors;

pub use fonts::{FontRegistry, FontRequirement, DEFAULT_FAMILY};
pub use helpers::{DrawHelper, HelperSet};
pub use icons::{normalize_codepoint, IconRegistry};
pub use ident::{entity_identifier, sanitize_identifier, slug, MAX_IDENTIFIER_LEN};
pub use sensors::{SensorLedger, TriggerBlock, TriggerMap, TIME_SOURCE_ID};
