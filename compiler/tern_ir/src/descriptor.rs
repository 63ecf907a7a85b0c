//! Finalized aggregate descriptors and the per-synthesis request.
//!
//! Descriptors are produced by the resolution phases and owned by the
//! symbol table; synthesis only reads them. Field order is an
//! invariant: it fixes traversal order for every generated algorithm
//! and bit position in the field-set-status digest.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::{DebugInfo, SyntheticOp};

/// One declared field of an aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: String,
    /// Fully-qualified declared type.
    pub type_name: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Reference to a resolved supertype, with the operators it
/// implements in its own scope (not inherited ones).
///
/// Generators delegate to the supertype only for operators it actually
/// implements; a supertype that chose not to participate in, say,
/// equality is respected rather than second-guessed.
#[derive(Clone, Debug)]
pub struct SuperRef {
    pub descriptor: Arc<TypeDescriptor>,
    pub implements: FxHashSet<SyntheticOp>,
}

/// A finalized nominal aggregate type.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    supertype: Option<SuperRef>,
}

impl TypeDescriptor {
    /// Create a descriptor with no supertype.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
            supertype: None,
        }
    }

    /// Attach a resolved supertype and the set of operators it
    /// implements.
    pub fn with_supertype(
        mut self,
        descriptor: Arc<TypeDescriptor>,
        implements: impl IntoIterator<Item = SyntheticOp>,
    ) -> Self {
        self.supertype = Some(SuperRef {
            descriptor,
            implements: implements.into_iter().collect(),
        });
        self
    }

    /// Fully-qualified name (`module::Type`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The simple type name used by string rendering.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// Own fields in declaration order. Inherited fields are never
    /// listed here; supertype delegation covers them.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The resolved supertype, if any.
    pub fn supertype(&self) -> Option<&SuperRef> {
        self.supertype.as_ref()
    }

    /// Whether the supertype exists and implements `op` itself.
    pub fn super_implements(&self, op: SyntheticOp) -> bool {
        self.supertype
            .as_ref()
            .is_some_and(|s| s.implements.contains(&op))
    }
}

/// One synthesis request: which operator to generate for which type.
///
/// Created by the per-construct processing step, consumed by exactly
/// one generator, then discarded.
#[derive(Clone, Debug)]
pub struct OperatorRequest {
    /// The operator or method to synthesize.
    pub op: SyntheticOp,
    /// Declared return type of the synthesized body.
    pub return_type: String,
    /// Location of the `default` declaration that triggered synthesis.
    pub debug: Option<DebugInfo>,
    /// The owning aggregate.
    pub descriptor: Arc<TypeDescriptor>,
    /// Set by the phase that created the defaulted method symbol.
    pub is_synthetic: bool,
    /// Set when the method was declared with an operator symbol.
    pub is_operator: bool,
}
