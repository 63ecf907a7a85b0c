//! `$` (`_string`) body generation.
//!
//! Renders `TypeName(field=value, other=?)` with `?` standing in for
//! unset fields. Unlike the comparison family there is no receiver
//! guard: diagnostics need a rendering for *any* value, so the result
//! is always a set String even when every field is unset.

use tern_ir::{FieldDescriptor, Instr, OperatorRequest};

use crate::context::GenContext;
use crate::emit::{
    emit_field_load, emit_is_set_guard, emit_literal, emit_object_call, emit_overwrite_return,
    emit_store_return,
};
use crate::names::{ADD_METHOD, RETURN_SLOT, THIS};

pub(crate) fn generate(ctx: &mut GenContext, request: &OperatorRequest) -> Vec<Instr> {
    let descriptor = &request.descriptor;

    let scope = ctx.fresh_scope("str");

    let mut out = Vec::new();
    out.push(Instr::scope_enter(&scope, ctx.debug()));
    out.push(Instr::reference(RETURN_SLOT, &request.return_type, ctx.debug()));

    let string_type = ctx.builtins().string().to_string();
    let opening = format!("\"{}(\"", descriptor.simple_name());
    let seed = emit_literal(ctx, &mut out, &opening, &string_type, &scope);
    emit_store_return(ctx, &mut out, RETURN_SLOT, &seed);

    for (index, field) in descriptor.fields().iter().enumerate() {
        emit_field_render(ctx, &mut out, field, index == 0, &scope);
    }

    let closing = emit_literal(ctx, &mut out, "\")\"", &string_type, &scope);
    emit_append(ctx, &mut out, &closing, &scope);

    out.push(Instr::scope_exit(&scope, ctx.debug()));
    out.push(Instr::return_value(RETURN_SLOT, ctx.debug()));

    out
}

/// Append one field as `name=value` or `name=?`, with a leading
/// separator for every field after the first.
fn emit_field_render(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    field: &FieldDescriptor,
    first: bool,
    scope: &str,
) {
    let string_type = ctx.builtins().string().to_string();
    let field_unset = ctx.fresh_label("field_unset");
    let field_done = ctx.fresh_label("field_done");
    let separator = if first { "" } else { ", " };

    let value = emit_field_load(ctx, out, THIS, &field.name, scope);
    emit_is_set_guard(ctx, out, &value, &field.type_name, &field_unset, scope);

    let prefix_text = format!("\"{separator}{}=\"", field.name);
    let prefix = emit_literal(ctx, out, &prefix_text, &string_type, scope);
    emit_append(ctx, out, &prefix, scope);
    let rendered = emit_object_call(
        ctx,
        out,
        Some(&value),
        &field.type_name,
        "_string",
        &[],
        &[],
        &string_type,
        scope,
        true,
    );
    emit_append(ctx, out, &rendered, scope);
    out.push(Instr::branch(&field_done, ctx.debug()));

    out.push(Instr::label(field_unset));
    let placeholder_text = format!("\"{separator}{}=?\"", field.name);
    let placeholder = emit_literal(ctx, out, &placeholder_text, &string_type, scope);
    emit_append(ctx, out, &placeholder, scope);
    out.push(Instr::label(field_done));
}

fn emit_append(ctx: &mut GenContext, out: &mut Vec<Instr>, piece: &str, scope: &str) {
    let string_type = ctx.builtins().string().to_string();
    let appended = emit_object_call(
        ctx,
        out,
        Some(RETURN_SLOT),
        &string_type,
        ADD_METHOD,
        &[piece],
        &[&string_type],
        &string_type,
        scope,
        true,
    );
    emit_overwrite_return(ctx, out, RETURN_SLOT, &appended);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use tern_ir::SyntheticOp;

    use crate::test_helpers::{count_calls, generate_for, point_descriptor, rendered};
    use crate::verify::check_balance;

    #[test]
    fn opens_with_the_simple_type_name() {
        let body = generate_for(SyntheticOp::StringForm, point_descriptor());
        let text = rendered(&body);
        assert!(text
            .iter()
            .any(|l| l.contains("LOAD_LITERAL \"Point(\", tern.lang::String")));
        assert!(text
            .iter()
            .any(|l| l.contains("LOAD_LITERAL \")\", tern.lang::String")));
    }

    #[test]
    fn unset_fields_render_as_question_mark() {
        let body = generate_for(SyntheticOp::StringForm, point_descriptor());
        let text = rendered(&body);

        assert!(text.iter().any(|l| l.contains("LOAD_LITERAL \"x=?\"")));
        assert!(text.iter().any(|l| l.contains("LOAD_LITERAL \", y=?\"")));
        // The set path renders the field itself.
        assert_eq!(count_calls(&body, "_string"), 2);
    }

    #[test]
    fn separator_appears_only_after_the_first_field() {
        let body = generate_for(SyntheticOp::StringForm, point_descriptor());
        let text = rendered(&body);
        assert!(text.iter().any(|l| l.contains("LOAD_LITERAL \"x=\"")));
        assert!(text.iter().any(|l| l.contains("LOAD_LITERAL \", y=\"")));
    }

    #[test]
    fn result_is_always_set_so_no_receiver_guard() {
        let body = generate_for(SyntheticOp::StringForm, point_descriptor());
        let text = rendered(&body);
        assert!(!text.iter().any(|l| l.contains("return_unset")));
        // Guards exist per field, not on the receiver.
        assert!(!text.iter().any(|l| l.contains("CALL this._isSet")));
    }

    #[test]
    fn body_is_balanced() {
        check_balance(&generate_for(SyntheticOp::StringForm, point_descriptor())).unwrap();
    }
}
