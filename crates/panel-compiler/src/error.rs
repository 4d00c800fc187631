//! Compiler errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while loading or compiling a project.
///
/// Widget-level problems never surface here: missing properties fall back to
/// defaults and unsupported widget/backend pairs are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Project JSON without a `pages` array.
    #[error("invalid project: missing pages array")]
    MissingPages,

    /// Project JSON that cannot be decoded.
    #[error("invalid project: {0}")]
    InvalidProject(SmolStr),

    /// Invalid compiler configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(SmolStr),

    /// File system failure while reading inputs.
    #[error("io error: {0}")]
    Io(SmolStr),
}
