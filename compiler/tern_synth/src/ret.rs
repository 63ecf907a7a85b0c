//! Shared return-block terminals.
//!
//! Every generator that returns a value closes with one or more of
//! these labelled blocks. Each block writes the return slot, exits the
//! operator's scope (releasing every registered temporary), and
//! returns the slot. The slot itself was retained but never
//! registered, so the value survives the exit and ownership passes to
//! the caller.

use tern_ir::Instr;

use crate::context::GenContext;
use crate::emit::{emit_ctor, emit_literal, emit_object_call, emit_store_return};
use crate::names::{OF_FALSE_METHOD, OF_TRUE_METHOD, RETURN_SLOT};

/// Terminal producing an unset result: default-construct the return
/// type and hand it back.
pub(crate) fn unset_return(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    label: &str,
    return_type: &str,
    scope: &str,
) {
    out.push(Instr::label(label));
    let unset = emit_ctor(ctx, out, return_type, scope);
    emit_store_return(ctx, out, RETURN_SLOT, &unset);
    out.push(Instr::scope_exit(scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));
}

/// Terminal producing a set Boolean via the `_ofTrue` / `_ofFalse`
/// static factories.
pub(crate) fn bool_return(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    label: &str,
    value: bool,
    scope: &str,
) {
    out.push(Instr::label(label));
    let boolean_type = ctx.builtins().boolean().to_string();
    let method = if value { OF_TRUE_METHOD } else { OF_FALSE_METHOD };
    let result = emit_object_call(
        ctx,
        out,
        None,
        &boolean_type,
        method,
        &[],
        &[],
        &boolean_type,
        scope,
        true,
    );
    emit_store_return(ctx, out, RETURN_SLOT, &result);
    out.push(Instr::scope_exit(scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));
}

/// Terminal producing a set Integer literal.
pub(crate) fn int_literal_return(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    label: &str,
    value: i64,
    scope: &str,
) {
    out.push(Instr::label(label));
    let integer_type = ctx.builtins().integer().to_string();
    let result = emit_literal(ctx, out, &value.to_string(), &integer_type, scope);
    emit_store_return(ctx, out, RETURN_SLOT, &result);
    out.push(Instr::scope_exit(scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));
}

/// Terminal returning whatever the body already stored in the slot.
pub(crate) fn value_return(ctx: &GenContext, out: &mut Vec<Instr>, label: &str, scope: &str) {
    out.push(Instr::label(label));
    out.push(Instr::scope_exit(scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));
}
