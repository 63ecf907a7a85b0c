//! `<`, `<=`, `>`, `>=` body generation.
//!
//! All four derive from `_cmp` on the same type: compare once, then
//! apply the matching Integer predicate against zero. An unset
//! comparison result propagates as an unset Boolean, so the orderings
//! agree with `<=>` about which operand pairs are orderable at all.

use tern_ir::{Instr, OperatorRequest, SyntheticOp};

use crate::context::GenContext;
use crate::emit::{
    emit_is_set_guard, emit_literal, emit_object_call, emit_store_return,
};
use crate::names::{PARAM, RETURN_SLOT, THIS};
use crate::ret::unset_return;

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let method = match request.op {
        SyntheticOp::LessThan => "_lt",
        SyntheticOp::LessThanOrEqual => "_lteq",
        SyntheticOp::GreaterThan => "_gt",
        SyntheticOp::GreaterThanOrEqual => "_gteq",
        other => unreachable!("not a derived ordering operator: {other:?}"),
    };
    let type_name = request.descriptor.name().to_string();
    let integer_type = ctx.builtins().integer().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();

    let scope = ctx.fresh_scope("ord");
    let return_unset = ctx.fresh_label("return_unset");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    let cmp_result = emit_object_call(
        ctx,
        &mut out,
        Some(THIS),
        &type_name,
        "_cmp",
        &[PARAM],
        &[&type_name],
        &integer_type,
        &scope,
        true,
    );
    emit_is_set_guard(ctx, &mut out, &cmp_result, &integer_type, &return_unset, &scope);

    let zero = emit_literal(ctx, &mut out, "0", &integer_type, &scope);
    let predicate = emit_object_call(
        ctx,
        &mut out,
        Some(&cmp_result),
        &integer_type,
        method,
        &[&zero],
        &[&integer_type],
        &boolean_type,
        &scope,
        true,
    );
    emit_store_return(ctx, &mut out, RETURN_SLOT, &predicate);
    out.push(Instr::scope_exit(&scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));

    unset_return(ctx, &mut out, &return_unset, &request.return_type, &scope);

    out
}
