//! `#?` (`_hashcode`) body generation.
//!
//! Classic 31-multiplier fold over the set fields, seeded from the
//! field-set-status digest's own hash so that two values differing
//! only in *which* fields are set still hash apart. Unset fields are
//! skipped rather than guarded into an unset result: hashing must
//! succeed for any value that has at least one set field. Only a value
//! whose digest is empty (nothing set at all) hashes to unset.

use tern_ir::{Instr, OperatorRequest};

use crate::context::GenContext;
use crate::emit::{
    emit_field_load, emit_is_set_guard, emit_literal, emit_object_call, emit_overwrite_return,
    emit_store_return, emit_unboxed_true,
};
use crate::names::{ADD_METHOD, EMPTY_METHOD, MUL_METHOD, RETURN_SLOT, THIS};
use crate::ret::{unset_return, value_return};

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;
    let type_name = descriptor.name().to_string();
    let integer_type = ctx.builtins().integer().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();
    let bits_type = ctx.builtins().bits().to_string();

    let scope = ctx.fresh_scope("hash");
    let return_unset = ctx.fresh_label("return_unset");
    let return_hash = ctx.fresh_label("return_hash");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    let status = emit_object_call(
        ctx,
        &mut out,
        Some(THIS),
        &type_name,
        "_fieldSetStatus",
        &[],
        &[],
        &bits_type,
        &scope,
        true,
    );
    let empty = emit_object_call(
        ctx,
        &mut out,
        Some(&status),
        &bits_type,
        EMPTY_METHOD,
        &[],
        &[],
        &boolean_type,
        &scope,
        true,
    );
    let unboxed = emit_unboxed_true(ctx, &mut out, &empty);
    out.push(Instr::branch_if_true(unboxed, &return_unset, ctx.debug()));

    let seed = emit_object_call(
        ctx,
        &mut out,
        Some(&status),
        &bits_type,
        "_hashcode",
        &[],
        &[],
        &integer_type,
        &scope,
        true,
    );
    emit_store_return(ctx, &mut out, RETURN_SLOT, &seed);

    for field in descriptor.fields() {
        let skip = ctx.fresh_label("skip_field");
        let value = emit_field_load(ctx, &mut out, THIS, &field.name, &scope);
        emit_is_set_guard(ctx, &mut out, &value, &field.type_name, &skip, &scope);

        let field_hash = emit_object_call(
            ctx,
            &mut out,
            Some(&value),
            &field.type_name,
            "_hashcode",
            &[],
            &[],
            &integer_type,
            &scope,
            true,
        );
        let multiplier = emit_literal(ctx, &mut out, "31", &integer_type, &scope);
        let scaled = emit_object_call(
            ctx,
            &mut out,
            Some(RETURN_SLOT),
            &integer_type,
            MUL_METHOD,
            &[&multiplier],
            &[&integer_type],
            &integer_type,
            &scope,
            true,
        );
        let folded = emit_object_call(
            ctx,
            &mut out,
            Some(&scaled),
            &integer_type,
            ADD_METHOD,
            &[&field_hash],
            &[&integer_type],
            &integer_type,
            &scope,
            true,
        );
        emit_overwrite_return(ctx, &mut out, RETURN_SLOT, &folded);
        out.push(Instr::label(skip));
    }

    out.push(Instr::branch(&return_hash, ctx.debug()));

    value_return(ctx, &mut out, &return_hash, &scope);
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
    fn seeds_from_the_digest_hash() {
        let body = generate_for(SyntheticOp::HashCode, point_descriptor());
        let text = rendered(&body);

        assert_eq!(count_calls(&body, "_fieldSetStatus"), 1);
        let seed = text
            .iter()
            .position(|l| l.contains("._hashcode() -> tern.lang::Integer"))
            .unwrap();
        let first_load = text.iter().position(|l| l.contains("LOAD this.x")).unwrap();
        assert!(seed < first_load);
    }

    #[test]
    fn folds_each_set_field_with_the_31_multiplier() {
        let body = generate_for(SyntheticOp::HashCode, point_descriptor());
        let text = rendered(&body);

        // Digest seed plus one per field.
        assert_eq!(count_calls(&body, "_hashcode"), 3);
        assert_eq!(count_calls(&body, "_mul"), 2);
        assert_eq!(count_calls(&body, "_add"), 2);
        let literals = text
            .iter()
            .filter(|l| l.contains("LOAD_LITERAL 31, tern.lang::Integer"))
            .count();
        assert_eq!(literals, 2);
    }

    #[test]
    fn unset_fields_are_skipped_not_fatal() {
        let body = generate_for(SyntheticOp::HashCode, point_descriptor());
        let text = rendered(&body);

        let skips = text
            .iter()
            .filter(|l| l.contains("BRANCH_FALSE") && l.contains("skip_field"))
            .count();
        assert_eq!(skips, 2);
    }

    #[test]
    fn empty_digest_hashes_to_unset() {
        let body = generate_for(SyntheticOp::HashCode, point_descriptor());
        let text = rendered(&body);
        assert_eq!(count_calls(&body, "_empty"), 1);
        assert!(text
            .iter()
            .any(|l| l.contains("BRANCH_TRUE") && l.contains("return_unset")));
    }

    #[test]
    fn body_is_balanced() {
        check_balance(&generate_for(SyntheticOp::HashCode, point_descriptor())).unwrap();
    }
}
