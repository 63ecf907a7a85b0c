//! Packaging of a synthesized body for later phases and backends.

use std::fmt;

use crate::{DebugInfo, Instr, SyntheticOp};

/// A labelled straight-line instruction sequence.
///
/// Synthesized operators produce exactly one entry block; internal
/// control flow uses labels and branches within it rather than a block
/// graph, which keeps the backend contract minimal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicBlock {
    pub label: String,
    pub instructions: Vec<Instr>,
}

impl BasicBlock {
    pub fn new(label: impl Into<String>, instructions: Vec<Instr>) -> Self {
        Self {
            label: label.into(),
            instructions,
        }
    }
}

/// One synthesized entry point: a single aggregate's single operator.
///
/// This is the unit handed to later compiler phases; backends translate
/// the body without re-deriving any semantics.
#[derive(Clone, Debug)]
pub struct Operation {
    /// Fully-qualified name of the owning aggregate.
    pub type_name: String,
    /// The operator this body implements.
    pub op: SyntheticOp,
    /// Declared return type of the body.
    pub return_type: String,
    /// The full instruction sequence.
    pub body: BasicBlock,
    /// Location of the triggering declaration.
    pub debug: Option<DebugInfo>,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "operation {}.{} -> {}",
            self.type_name,
            self.op.method_name(),
            self.return_type
        )?;
        writeln!(f, "{}:", self.body.label)?;
        for instr in &self.body.instructions {
            writeln!(f, "  {instr}")?;
        }
        Ok(())
    }
}
