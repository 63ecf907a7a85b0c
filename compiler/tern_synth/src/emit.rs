//! Shared emission patterns used by every generator.
//!
//! These are free functions over [`Instr`] and [`GenContext`] rather
//! than methods on a generator base type: each generator composes
//! exactly the patterns it needs, and nothing couples the nine
//! siblings beyond this module.
//!
//! # Reference-count bookkeeping
//!
//! Every function that introduces an object-valued temporary emits the
//! `RETAIN` / `SCOPE_REGISTER` pair immediately after the defining
//! instruction. Unboxed `bool` results are stack values and get
//! neither. Writes to the return slot retain it but never register it,
//! so the scope exit cannot release the value being handed back.

use smallvec::SmallVec;
use tern_ir::{CallDetails, Instr, PRIMITIVE_BOOL};

use crate::context::GenContext;
use crate::names::{INIT_METHOD, TRUE_METHOD};

fn arg_list(items: &[&str]) -> SmallVec<[String; 2]> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Emit an instance or static call returning an object value; the
/// fresh result temporary is retained and scope-registered.
///
/// `target: None` emits a static call on `type_name`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn emit_object_call(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    target: Option<&str>,
    type_name: &str,
    method: &str,
    args: &[&str],
    arg_types: &[&str],
    return_type: &str,
    scope: &str,
    pure: bool,
) -> String {
    let debug = ctx.debug();
    let dest = ctx.fresh_temp();
    out.push(Instr::call(
        dest.clone(),
        CallDetails {
            target: target.map(str::to_string),
            type_name: type_name.to_string(),
            method: method.to_string(),
            args: arg_list(args),
            arg_types: arg_list(arg_types),
            return_type: return_type.to_string(),
            is_pure: pure,
        },
        debug.clone(),
    ));
    out.push(Instr::retain(dest.clone(), debug.clone()));
    out.push(Instr::scope_register(dest.clone(), scope, debug));
    dest
}

/// Emit a call whose result is discarded (void mutator such as
/// `_merge` or a supertype `_copy`).
pub(crate) fn emit_void_call(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    target: &str,
    type_name: &str,
    method: &str,
    args: &[&str],
    arg_types: &[&str],
) {
    let debug = ctx.debug();
    let void = ctx.builtins().void().to_string();
    out.push(Instr::call_void(
        CallDetails {
            target: Some(target.to_string()),
            type_name: type_name.to_string(),
            method: method.to_string(),
            args: arg_list(args),
            arg_types: arg_list(arg_types),
            return_type: void,
            is_pure: false,
        },
        debug,
    ));
}

/// Emit a default-constructor call; the result is a fresh **unset**
/// instance of `type_name`, retained and registered.
pub(crate) fn emit_ctor(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    type_name: &str,
    scope: &str,
) -> String {
    emit_ctor_with_args(ctx, out, type_name, &[], &[], scope)
}

/// Emit a constructor call with arguments. The target of a
/// constructor call is the type name itself.
pub(crate) fn emit_ctor_with_args(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    type_name: &str,
    args: &[&str],
    arg_types: &[&str],
    scope: &str,
) -> String {
    emit_object_call(
        ctx,
        out,
        Some(type_name),
        type_name,
        INIT_METHOD,
        args,
        arg_types,
        type_name,
        scope,
        false,
    )
}

/// Load `object.field` into a fresh retained, registered temporary.
pub(crate) fn emit_field_load(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    object: &str,
    field: &str,
    scope: &str,
) -> String {
    let debug = ctx.debug();
    let dest = ctx.fresh_temp();
    out.push(Instr::load(dest.clone(), format!("{object}.{field}"), debug.clone()));
    out.push(Instr::retain(dest.clone(), debug.clone()));
    out.push(Instr::scope_register(dest.clone(), scope, debug));
    dest
}

/// Load a literal into a fresh retained, registered temporary.
pub(crate) fn emit_literal(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    value: &str,
    type_name: &str,
    scope: &str,
) -> String {
    let debug = ctx.debug();
    let dest = ctx.fresh_temp();
    out.push(Instr::literal(dest.clone(), value, type_name, debug.clone()));
    out.push(Instr::retain(dest.clone(), debug.clone()));
    out.push(Instr::scope_register(dest.clone(), scope, debug));
    dest
}

/// Unbox a builtin Boolean into a machine `bool` via `_true()`.
///
/// The result is a stack value: no retain, no register.
pub(crate) fn emit_unboxed_true(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    boolean_var: &str,
) -> String {
    let debug = ctx.debug();
    let boolean_type = ctx.builtins().boolean().to_string();
    let dest = ctx.fresh_temp();
    out.push(Instr::call(
        dest.clone(),
        CallDetails {
            target: Some(boolean_var.to_string()),
            type_name: boolean_type,
            method: TRUE_METHOD.to_string(),
            args: SmallVec::new(),
            arg_types: SmallVec::new(),
            return_type: PRIMITIVE_BOOL.to_string(),
            is_pure: true,
        },
        debug,
    ));
    dest
}

/// Emit the unset guard for `var`: call `_isSet()`, unbox, and branch
/// to `unset_label` when false.
pub(crate) fn emit_is_set_guard(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    var: &str,
    type_name: &str,
    unset_label: &str,
    scope: &str,
) {
    let boolean_type = ctx.builtins().boolean().to_string();
    let is_set = emit_object_call(
        ctx,
        out,
        Some(var),
        type_name,
        "_isSet",
        &[],
        &[],
        &boolean_type,
        scope,
        true,
    );
    let unboxed = emit_unboxed_true(ctx, out, &is_set);
    out.push(Instr::branch_if_false(unboxed, unset_label, ctx.debug()));
}

/// Emit the field-set-status mismatch guard used by the comparison
/// family: compute both operands' digests and jump to `unset_label`
/// when they differ. Two values with different set/unset patterns can
/// never be judged equal or orderable.
pub(crate) fn emit_digest_mismatch_guard(
    ctx: &mut GenContext,
    out: &mut Vec<Instr>,
    type_name: &str,
    receiver: &str,
    operand: &str,
    unset_label: &str,
    scope: &str,
) {
    let bits_type = ctx.builtins().bits().to_string();
    let boolean_type = ctx.builtins().boolean().to_string();
    let receiver_digest = emit_object_call(
        ctx,
        out,
        Some(receiver),
        type_name,
        "_fieldSetStatus",
        &[],
        &[],
        &bits_type,
        scope,
        true,
    );
    let operand_digest = emit_object_call(
        ctx,
        out,
        Some(operand),
        type_name,
        "_fieldSetStatus",
        &[],
        &[],
        &bits_type,
        scope,
        true,
    );
    let digests_equal = emit_object_call(
        ctx,
        out,
        Some(&receiver_digest),
        &bits_type,
        "_eq",
        &[&operand_digest],
        &[&bits_type],
        &boolean_type,
        scope,
        true,
    );
    let unboxed = emit_unboxed_true(ctx, out, &digests_equal);
    out.push(Instr::branch_if_false(unboxed, unset_label, ctx.debug()));
}

/// First write to the return slot: store and retain. Never registered,
/// so ownership transfers to the caller at scope exit.
pub(crate) fn emit_store_return(
    ctx: &GenContext,
    out: &mut Vec<Instr>,
    return_slot: &str,
    source: &str,
) {
    let debug = ctx.debug();
    out.push(Instr::store(return_slot, source, debug.clone()));
    out.push(Instr::retain(return_slot, debug));
}

/// Accumulator overwrite of the return slot: release the old value,
/// store the new one, retain.
pub(crate) fn emit_overwrite_return(
    ctx: &GenContext,
    out: &mut Vec<Instr>,
    return_slot: &str,
    source: &str,
) {
    out.push(Instr::release(return_slot, ctx.debug()));
    emit_store_return(ctx, out, return_slot, source);
}
