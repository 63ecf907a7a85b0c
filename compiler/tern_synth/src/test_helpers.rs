//! Shared fixtures and assertion helpers for generator tests.

use std::sync::Arc;

use tern_ir::{
    BuiltinTypes, FieldDescriptor, Instr, InstrKind, OperatorRequest, SyntheticOp, TypeDescriptor,
};

use crate::context::GenContext;
use crate::{
    compare, copy, equality, hashcode, inequality, is_set, json_form, ordering, set_status,
    string_form,
};

pub(crate) fn synth_context() -> GenContext {
    GenContext::new(BuiltinTypes::default(), None)
}

/// Two-field aggregate used by most generator tests.
pub(crate) fn point_descriptor() -> TypeDescriptor {
    TypeDescriptor::new(
        "geom::Point",
        vec![
            FieldDescriptor::new("x", "tern.lang::Integer"),
            FieldDescriptor::new("y", "tern.lang::Integer"),
        ],
    )
}

/// The same aggregate under a supertype implementing `ops`.
pub(crate) fn point_with_super(
    ops: impl IntoIterator<Item = SyntheticOp>,
) -> TypeDescriptor {
    let base = Arc::new(TypeDescriptor::new(
        "geom::Shape",
        vec![FieldDescriptor::new("id", "tern.lang::Integer")],
    ));
    point_descriptor().with_supertype(base, ops)
}

/// The declared return type the resolution phases would attach.
pub(crate) fn return_type_of(op: SyntheticOp, builtins: &BuiltinTypes) -> String {
    match op {
        SyntheticOp::Equals
        | SyntheticOp::NotEquals
        | SyntheticOp::LessThan
        | SyntheticOp::LessThanOrEqual
        | SyntheticOp::GreaterThan
        | SyntheticOp::GreaterThanOrEqual
        | SyntheticOp::IsSet => builtins.boolean().to_string(),
        SyntheticOp::Compare | SyntheticOp::HashCode => builtins.integer().to_string(),
        SyntheticOp::FieldSetStatus => builtins.bits().to_string(),
        SyntheticOp::StringForm => builtins.string().to_string(),
        SyntheticOp::JsonForm => builtins.json().to_string(),
        SyntheticOp::Copy => builtins.void().to_string(),
    }
}

pub(crate) fn request_for(op: SyntheticOp, descriptor: TypeDescriptor) -> OperatorRequest {
    let builtins = BuiltinTypes::default();
    OperatorRequest {
        op,
        return_type: return_type_of(op, &builtins),
        debug: None,
        descriptor: Arc::new(descriptor),
        is_synthetic: true,
        is_operator: op.is_operator(),
    }
}

/// Run one generator directly, without the dispatcher's packaging, so
/// tests see deterministic temp and label numbering from 1.
pub(crate) fn generate_for(op: SyntheticOp, descriptor: TypeDescriptor) -> Vec<Instr> {
    let request = request_for(op, descriptor);
    let mut ctx = synth_context();
    match op {
        SyntheticOp::Equals => equality::generate(&mut ctx, &request),
        SyntheticOp::NotEquals => inequality::generate(&mut ctx, &request),
        SyntheticOp::Compare => compare::generate(&mut ctx, &request),
        SyntheticOp::LessThan
        | SyntheticOp::LessThanOrEqual
        | SyntheticOp::GreaterThan
        | SyntheticOp::GreaterThanOrEqual => ordering::generate(&mut ctx, &request),
        SyntheticOp::IsSet => is_set::generate(&mut ctx, &request),
        SyntheticOp::FieldSetStatus => set_status::generate(&mut ctx, &request),
        SyntheticOp::HashCode => hashcode::generate(&mut ctx, &request),
        SyntheticOp::StringForm => string_form::generate(&mut ctx, &request),
        SyntheticOp::JsonForm => json_form::generate(&mut ctx, &request),
        SyntheticOp::Copy => copy::generate(&mut ctx, &request),
    }
}

/// Render each instruction to its display form for line assertions.
pub(crate) fn rendered(body: &[Instr]) -> Vec<String> {
    body.iter().map(ToString::to_string).collect()
}

/// Count calls to `method`, whatever the target.
pub(crate) fn count_calls(body: &[Instr], method: &str) -> usize {
    body.iter()
        .filter(|instr| {
            matches!(&instr.kind, InstrKind::Call { details, .. } if details.method == method)
        })
        .count()
}
