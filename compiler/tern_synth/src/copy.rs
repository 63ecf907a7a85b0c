//! `:=:` (`_copy`) body generation.
//!
//! Deep-assigns every field of the operand into the receiver, unset
//! fields included, so the receiver ends up an exact replica. The
//! supertype's `_copy` runs first when the supertype implements one,
//! covering inherited state. Void return; the receiver is mutated in
//! place.

use tern_ir::{Instr, OperatorRequest, SyntheticOp};

use crate::context::GenContext;
use crate::emit::{emit_field_load, emit_void_call};
use crate::names::{PARAM, SUPER, THIS};

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;

    let scope = ctx.fresh_scope("copy");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));

    if descriptor.super_implements(SyntheticOp::Copy) {
        if let Some(super_ref) = descriptor.supertype() {
            let super_type = super_ref.descriptor.name().to_string();
            emit_void_call(
                ctx,
                &mut out,
                SUPER,
                &super_type,
                "_copy",
                &[PARAM],
                &[&super_type],
            );
        }
    }

    for field in descriptor.fields() {
        let incoming = emit_field_load(ctx, &mut out, PARAM, &field.name, &scope);
        let slot = format!("{THIS}.{}", field.name);
        // Release the displaced value before overwriting the slot.
        out.push(Instr::release(slot.clone(), ctx.debug()));
        out.push(Instr::store(slot.clone(), incoming, ctx.debug()));
        out.push(Instr::retain(slot, ctx.debug()));
    }

    out.push(Instr::scope_exit(&scope, ctx.debug()));
    out.push(Instr::return_void(ctx.debug()));

    out
}
