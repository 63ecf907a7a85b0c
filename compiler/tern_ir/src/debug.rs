//! Source-debug information attached to emitted instructions.

use std::fmt;
use std::sync::Arc;

/// Source location carried by instructions for debugger support.
///
/// Cheap to clone: the file path is shared. Every instruction emitted
/// for one synthesized operator carries the location of the `default`
/// declaration that triggered synthesis.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DebugInfo {
    /// Source file the triggering declaration came from.
    pub source: Arc<str>,
    /// 1-based line of the declaration.
    pub line: u32,
    /// 1-based column of the declaration.
    pub column: u32,
}

impl DebugInfo {
    /// Create debug info for a source location.
    pub fn new(source: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            source: source.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for DebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}
