//! `$$` (`_json`) body generation.
//!
//! Builds `{"field": value, ...}` by merging one name/value pair per
//! field into an empty Json object. Field values convert recursively
//! through their own `_json`; an unset field value becomes JSON null
//! inside the pair constructor, so there is no per-field guard. Only
//! a value with nothing set at all (empty field-set-status digest)
//! renders as an unset Json.

use tern_ir::{Instr, OperatorRequest};

use crate::context::GenContext;
use crate::emit::{
    emit_ctor, emit_ctor_with_args, emit_field_load, emit_literal, emit_object_call,
    emit_store_return, emit_unboxed_true, emit_void_call,
};
use crate::names::{EMPTY_METHOD, MERGE_METHOD, OBJECT_METHOD, RETURN_SLOT, THIS};
use crate::ret::unset_return;

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;
    let type_name = descriptor.name().to_string();
    let json_type = ctx.builtins().json().to_string();
    let bits_type = ctx.builtins().bits().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();
    let string_type = ctx.builtins().string().to_string();

    let scope = ctx.fresh_scope("json");
    let return_unset = ctx.fresh_label("return_unset");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    // One digest query replaces a per-field _isSet cascade.
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

    let fresh = emit_ctor(ctx, &mut out, &json_type, &scope);
    let object = emit_object_call(
        ctx,
        &mut out,
        Some(&fresh),
        &json_type,
        OBJECT_METHOD,
        &[],
        &[],
        &json_type,
        &scope,
        true,
    );
    emit_store_return(ctx, &mut out, RETURN_SLOT, &object);

    for field in descriptor.fields() {
        let value = emit_field_load(ctx, &mut out, THIS, &field.name, &scope);
        let field_json = emit_object_call(
            ctx,
            &mut out,
            Some(&value),
            &field.type_name,
            "_json",
            &[],
            &[],
            &json_type,
            &scope,
            true,
        );
        let name_text = format!("\"{}\"", field.name);
        let name = emit_literal(ctx, &mut out, &name_text, &string_type, &scope);
        let pair = emit_ctor_with_args(
            ctx,
            &mut out,
            &json_type,
            &[&name, &field_json],
            &[&string_type, &json_type],
            &scope,
        );
        emit_void_call(
            ctx,
            &mut out,
            RETURN_SLOT,
            &json_type,
            MERGE_METHOD,
            &[&pair],
            &[&json_type],
        );
    }

    out.push(Instr::scope_exit(&scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));

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
    fn empty_digest_renders_unset() {
        let body = generate_for(SyntheticOp::JsonForm, point_descriptor());
        let text = rendered(&body);
        assert_eq!(count_calls(&body, "_fieldSetStatus"), 1);
        assert_eq!(count_calls(&body, "_empty"), 1);
        assert!(text
            .iter()
            .any(|l| l.contains("BRANCH_TRUE") && l.contains("return_unset")));
    }

    #[test]
    fn builds_an_object_then_merges_one_pair_per_field() {
        let body = generate_for(SyntheticOp::JsonForm, point_descriptor());
        let text = rendered(&body);

        assert_eq!(count_calls(&body, "object"), 1);
        assert_eq!(count_calls(&body, "_json"), 2);
        assert_eq!(count_calls(&body, "_merge"), 2);
        // Two pair constructors, the initial empty object, and the
        // unset terminal's construction.
        assert_eq!(count_calls(&body, "<init>"), 4);
        assert!(text.iter().any(|l| l.contains("LOAD_LITERAL \"x\"")));
        assert!(text.iter().any(|l| l.contains("LOAD_LITERAL \"y\"")));
    }

    #[test]
    fn unset_fields_have_no_guard_of_their_own() {
        let body = generate_for(SyntheticOp::JsonForm, point_descriptor());
        assert_eq!(count_calls(&body, "_isSet"), 0);
    }

    #[test]
    fn merge_targets_the_accumulating_object() {
        let body = generate_for(SyntheticOp::JsonForm, point_descriptor());
        let text = rendered(&body);
        assert!(text
            .iter()
            .any(|l| l.contains("CALL rtn._merge") && l.contains("-> tern.lang::Void")));
    }

    #[test]
    fn body_is_balanced() {
        check_balance(&generate_for(SyntheticOp::JsonForm, point_descriptor())).unwrap();
    }
}
