//! `<>` (`_neq`) body generation.
//!
//! Defined entirely in terms of `_eq` on the same type: the result is
//! the negation when equality is decidable, and unset when equality
//! itself came back unset. Keeping the field walk in one place means
//! the two operators can never disagree.

use tern_ir::{Instr, OperatorRequest};

use crate::context::GenContext;
use crate::emit::{emit_is_set_guard, emit_object_call, emit_unboxed_true};
use crate::names::{PARAM, RETURN_SLOT, THIS};
use crate::ret::{bool_return, unset_return};

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let type_name = request.descriptor.name().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();

    let scope = ctx.fresh_scope("neq");
    let return_unset = ctx.fresh_label("return_unset");
    let return_false = ctx.fresh_label("return_false");
    let return_true = ctx.fresh_label("return_true");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    let eq = emit_object_call(
        ctx,
        &mut out,
        Some(THIS),
        &type_name,
        "_eq",
        &[PARAM],
        &[&type_name],
        &boolean_type,
        &scope,
        true,
    );
    emit_is_set_guard(ctx, &mut out, &eq, &boolean_type, &return_unset, &scope);
    let unboxed = emit_unboxed_true(ctx, &mut out, &eq);
    out.push(Instr::branch_if_true(unboxed, &return_false, ctx.debug()));
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

    use crate::test_helpers::{count_calls, generate_for, point_descriptor, rendered};
    use crate::verify::check_balance;

    #[test]
    fn negates_equality_rather_than_walking_fields() {
        let body = generate_for(SyntheticOp::NotEquals, point_descriptor());
        let text = rendered(&body);

        assert_eq!(count_calls(&body, "_eq"), 1);
        assert!(text.iter().any(|l| l == "_t1 = CALL this._eq(param) -> tern.lang::Boolean"));
        assert!(!text.iter().any(|l| l.contains("LOAD this.x")));
        // A true equality lands on the false terminal.
        assert!(text
            .iter()
            .any(|l| l.contains("BRANCH_TRUE") && l.contains("return_false")));
    }

    #[test]
    fn unset_equality_yields_unset_inequality() {
        let body = generate_for(SyntheticOp::NotEquals, point_descriptor());
        let text = rendered(&body);
        assert!(text
            .iter()
            .any(|l| l.contains("BRANCH_FALSE") && l.contains("return_unset")));
    }

    #[test]
    fn body_is_balanced() {
        check_balance(&generate_for(SyntheticOp::NotEquals, point_descriptor())).unwrap();
    }
}
