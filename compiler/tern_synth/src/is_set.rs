//! `?` (`_isSet`) body generation.
//!
//! An aggregate is set when every one of its own fields is set. The
//! result is always a set Boolean: this operator is the base case the
//! other generators' guards bottom out in, so it can never itself be
//! unset. A fieldless aggregate is vacuously set.
//!
//! Inherited fields are not consulted here; the supertype's own
//! `_isSet` covers them wherever the supertype participates.

use tern_ir::{Instr, OperatorRequest};

use crate::context::GenContext;
use crate::emit::{emit_field_load, emit_is_set_guard};
use crate::names::{RETURN_SLOT, THIS};
use crate::ret::bool_return;

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;

    let scope = ctx.fresh_scope("isset");
    let return_false = ctx.fresh_label("return_false");
    let return_true = ctx.fresh_label("return_true");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    for field in descriptor.fields() {
        let value = emit_field_load(ctx, &mut out, THIS, &field.name, &scope);
        emit_is_set_guard(ctx, &mut out, &value, &field.type_name, &return_false, &scope);
    }

    out.push(Instr::branch(&return_true, ctx.debug()));

    bool_return(ctx, &mut out, &return_true, true, &scope);
    bool_return(ctx, &mut out, &return_false, false, &scope);

    out
}
