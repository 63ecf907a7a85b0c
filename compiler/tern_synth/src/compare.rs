//! `<=>` (`_cmp`) body generation.
//!
//! Lexicographic comparison in field declaration order, supertype
//! first: the first non-zero partial result wins, all-zero means the
//! operands are equal. Unset operands or mismatched field-set patterns
//! produce an unset Integer.

use tern_ir::{Instr, OperatorRequest, SyntheticOp};

use crate::context::GenContext;
use crate::emit::{
    emit_digest_mismatch_guard, emit_field_load, emit_is_set_guard, emit_literal,
    emit_object_call, emit_store_return, emit_unboxed_true,
};
use crate::names::{PARAM, RETURN_SLOT, SUPER, THIS};
use crate::ret::{int_literal_return, unset_return, value_return};

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;
    let type_name = descriptor.name().to_string();
    let integer_type = ctx.builtins().integer().to_string();

    let scope = ctx.fresh_scope("cmp");
    let return_unset = ctx.fresh_label("return_unset");
    let return_zero = ctx.fresh_label("return_zero");
    let return_result = ctx.fresh_label("return_result");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    emit_is_set_guard(ctx, &mut out, THIS, &type_name, &return_unset, &scope);
    emit_is_set_guard(ctx, &mut out, PARAM, &type_name, &return_unset, &scope);

    if !descriptor.fields().is_empty() {
        emit_digest_mismatch_guard(
            ctx,
            &mut out,
            &type_name,
            THIS,
            PARAM,
            &return_unset,
            &scope,
        );
    }

    if descriptor.super_implements(SyntheticOp::Compare) {
        if let Some(super_ref) = descriptor.supertype() {
            let super_type = super_ref.descriptor.name().to_string();
            let super_cmp = emit_object_call(
                ctx,
                &mut out,
                Some(SUPER),
                &super_type,
                "_cmp",
                &[PARAM],
                &[&super_type],
                &integer_type,
                &scope,
                true,
            );
            emit_is_set_guard(ctx, &mut out, &super_cmp, &integer_type, &return_unset, &scope);
            emit_nonzero_escape(ctx, &mut out, &super_cmp, &return_result, &scope);
        }
    }

    for field in descriptor.fields() {
        let lhs = emit_field_load(ctx, &mut out, THIS, &field.name, &scope);
        let rhs = emit_field_load(ctx, &mut out, PARAM, &field.name, &scope);
        let field_cmp = emit_object_call(
            ctx,
            &mut out,
            Some(&lhs),
            &field.type_name,
            "_cmp",
            &[&rhs],
            &[&field.type_name],
            &integer_type,
            &scope,
            true,
        );
        emit_is_set_guard(ctx, &mut out, &field_cmp, &integer_type, &return_unset, &scope);
        emit_nonzero_escape(ctx, &mut out, &field_cmp, &return_result, &scope);
    }

    out.push(Instr::branch(&return_zero, ctx.debug()));

    int_literal_return(ctx, &mut out, &return_zero, 0, &scope);
    value_return(ctx, &mut out, &return_result, &scope);
    unset_return(ctx, &mut out, &return_unset, &request.return_type, &scope);

    out
}

/// If `cmp_var` is non-zero, store it in the return slot and jump to
/// the shared result terminal; otherwise fall through to the next
/// comparison.
fn emit_nonzero_escape(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    cmp_var: &str,
    return_result: &str,
    scope: &str,
) {
    let integer_type = ctx.builtins().integer().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();
    let next = ctx.fresh_label("cmp_next");

    let zero = emit_literal(ctx, out, "0", &integer_type, scope);
    let is_zero = emit_object_call(
        ctx,
        out,
        Some(cmp_var),
        &integer_type,
        "_eq",
        &[&zero],
        &[&integer_type],
        &boolean_type,
        scope,
        true,
    );
    let unboxed = emit_unboxed_true(ctx, out, &is_zero);
    out.push(Instr::branch_if_true(unboxed, &next, ctx.debug()));
    emit_store_return(ctx, out, RETURN_SLOT, cmp_var);
    out.push(Instr::branch(return_result, ctx.debug()));
    out.push(Instr::label(next));
}
