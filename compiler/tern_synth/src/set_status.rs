//! `_fieldSetStatus` body generation.
//!
//! Produces a Bits digest with one bit per own field, in declaration
//! order, bit set when the field is set. The digest is seeded from the
//! `_ofEmpty` factory, so a fieldless aggregate still reports a *set*
//! empty digest rather than an unset one: "no fields" and "cannot
//! tell" stay distinct.
//!
//! The body is branch-free. Appending the field's set-status Boolean
//! records both outcomes through the same instruction sequence, which
//! keeps the digest cheap enough for the comparison guards to call on
//! every `_eq` and `_cmp`.

use tern_ir::{Instr, OperatorRequest};

use crate::context::GenContext;
use crate::emit::{
    emit_field_load, emit_object_call, emit_overwrite_return, emit_store_return,
};
use crate::names::{ADD_METHOD, OF_EMPTY_METHOD, RETURN_SLOT, THIS};

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;
    let bits_type = ctx.builtins().bits().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();

    let scope = ctx.fresh_scope("status");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    let seed = emit_object_call(
        ctx,
        &mut out,
        None,
        &bits_type,
        OF_EMPTY_METHOD,
        &[],
        &[],
        &bits_type,
        &scope,
        true,
    );
    emit_store_return(ctx, &mut out, RETURN_SLOT, &seed);

    for field in descriptor.fields() {
        let value = emit_field_load(ctx, &mut out, THIS, &field.name, &scope);
        let field_set = emit_object_call(
            ctx,
            &mut out,
            Some(&value),
            &field.type_name,
            "_isSet",
            &[],
            &[],
            &boolean_type,
            &scope,
            true,
        );
        let appended = emit_object_call(
            ctx,
            &mut out,
            Some(RETURN_SLOT),
            &bits_type,
            ADD_METHOD,
            &[&field_set],
            &[&boolean_type],
            &bits_type,
            &scope,
            true,
        );
        emit_overwrite_return(ctx, &mut out, RETURN_SLOT, &appended);
    }

    out.push(Instr::scope_exit(&scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));

    out
}
