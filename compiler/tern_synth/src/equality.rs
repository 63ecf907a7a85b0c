//! `==` (`_eq`) body generation.
//!
//! Result is tri-state: a set `true` / `false` when both operands are
//! comparable, unset when either operand is unset, when the operands'
//! field-set patterns differ, or when any delegated comparison is
//! itself unset.

use tern_ir::{Instr, OperatorRequest, SyntheticOp};

use crate::context::GenContext;
use crate::emit::{
    emit_digest_mismatch_guard, emit_field_load, emit_is_set_guard, emit_object_call,
    emit_unboxed_true,
};
use crate::names::{PARAM, RETURN_SLOT, SUPER, THIS};
use crate::ret::{bool_return, unset_return};

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;
    let type_name = descriptor.name().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();

    let scope = ctx.fresh_scope("eq");
    let return_unset = ctx.fresh_label("return_unset");
    let return_false = ctx.fresh_label("return_false");
    let return_true = ctx.fresh_label("return_true");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    emit_is_set_guard(ctx, &mut out, THIS, &type_name, &return_unset, &scope);
    emit_is_set_guard(ctx, &mut out, PARAM, &type_name, &return_unset, &scope);

    // Differing set/unset patterns can never compare equal; checking
    // the digests once up front replaces a per-field fork.
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

    if descriptor.super_implements(SyntheticOp::Equals) {
        if let Some(super_ref) = descriptor.supertype() {
            let super_type = super_ref.descriptor.name().to_string();
            let super_eq = emit_object_call(
                ctx,
                &mut out,
                Some(SUPER),
                &super_type,
                "_eq",
                &[PARAM],
                &[&super_type],
                &boolean_type,
                &scope,
                true,
            );
            emit_is_set_guard(ctx, &mut out, &super_eq, &boolean_type, &return_unset, &scope);
            let unboxed = emit_unboxed_true(ctx, &mut out, &super_eq);
            out.push(Instr::branch_if_false(unboxed, &return_false, ctx.debug()));
        }
    }

    for field in descriptor.fields() {
        let lhs = emit_field_load(ctx, &mut out, THIS, &field.name, &scope);
        let rhs = emit_field_load(ctx, &mut out, PARAM, &field.name, &scope);
        let field_eq = emit_object_call(
            ctx,
            &mut out,
            Some(&lhs),
            &field.type_name,
            "_eq",
            &[&rhs],
            &[&field.type_name],
            &boolean_type,
            &scope,
            true,
        );
        emit_is_set_guard(ctx, &mut out, &field_eq, &boolean_type, &return_unset, &scope);
        let unboxed = emit_unboxed_true(ctx, &mut out, &field_eq);
        out.push(Instr::branch_if_false(unboxed, &return_false, ctx.debug()));
    }

    out.push(Instr::branch(&return_true, ctx.debug()));

    bool_return(ctx, &mut out, &return_true, true, &scope);
    bool_return(ctx, &mut out, &return_false, false, &scope);
    unset_return(ctx, &mut out, &return_unset, &request.return_type, &scope);

    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use tern_ir::SyntheticOp;

    use crate::test_helpers::{
        count_calls, generate_for, point_descriptor, point_with_super, rendered,
    };
    use crate::verify::check_balance;

    #[test]
    fn guards_both_operands_then_compares_each_field() {
        let body = generate_for(SyntheticOp::Equals, point_descriptor());
        let text = rendered(&body);

        // Receiver and operand guards, plus one guard per field result.
        assert_eq!(count_calls(&body, "_isSet"), 4);
        assert_eq!(count_calls(&body, "_fieldSetStatus"), 2);
        // x and y each compared once, plus the digest comparison.
        assert_eq!(count_calls(&body, "_eq"), 3);
        assert!(text.iter().any(|l| l == "_t1 = CALL this._isSet() -> tern.lang::Boolean"));
        assert!(text.iter().any(|l| l.starts_with("return_unset_1:")));
    }

    #[test]
    fn field_mismatch_branches_to_the_false_terminal() {
        let body = generate_for(SyntheticOp::Equals, point_descriptor());
        let text = rendered(&body);

        let false_branches = text
            .iter()
            .filter(|l| l.contains("BRANCH_FALSE") && l.contains("return_false"))
            .count();
        assert_eq!(false_branches, 2);
        assert!(text.iter().any(|l| l == "BRANCH return_true_3"));
    }

    #[test]
    fn delegates_to_super_before_own_fields() {
        let body = generate_for(SyntheticOp::Equals, point_with_super([SyntheticOp::Equals]));
        let text = rendered(&body);

        let super_call = text
            .iter()
            .position(|l| l.contains("CALL super._eq(param)"))
            .unwrap();
        let first_field_load = text.iter().position(|l| l.contains("LOAD this.x")).unwrap();
        assert!(super_call < first_field_load);
    }

    #[test]
    fn super_without_equality_is_not_consulted() {
        let body = generate_for(SyntheticOp::Equals, point_with_super([SyntheticOp::HashCode]));
        let text = rendered(&body);
        assert!(!text.iter().any(|l| l.contains("super._eq")));
    }

    #[test]
    fn body_is_balanced() {
        check_balance(&generate_for(SyntheticOp::Equals, point_descriptor())).unwrap();
        check_balance(&generate_for(
            SyntheticOp::Equals,
            point_with_super([SyntheticOp::Equals]),
        ))
        .unwrap();
    }
}
