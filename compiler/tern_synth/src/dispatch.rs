//! Routing from a synthesis request to its generator.

use tern_ir::{BasicBlock, Operation, OperatorRequest, SyntheticOp};

use crate::context::GenContext;
use crate::{
    compare, copy, equality, hashcode, inequality, is_set, json_form, ordering, set_status,
    string_form, verify,
};

/// Generate the body for one defaulted operator or method.
///
/// The request must come from the resolution phases with
/// `is_synthetic` set, and with `is_operator` agreeing with the
/// operator's surface form; anything else is a phase-ordering bug
/// upstream, not an input to tolerate.
pub fn synthesize(ctx: &mut GenContext, request: &OperatorRequest) -> Operation {
    assert!(
        request.is_synthetic,
        "request for {}.{} is not marked synthetic",
        request.descriptor.name(),
        request.op.method_name()
    );
    assert!(
        request.is_operator == request.op.is_operator(),
        "operator flag mismatch for {}.{}",
        request.descriptor.name(),
        request.op.method_name()
    );

    tracing::debug!(
        type_name = %request.descriptor.name(),
        op = %request.op.method_name(),
        fields = request.descriptor.fields().len(),
        "synthesizing default body"
    );

    let instructions = match request.op {
        SyntheticOp::Equals => equality::generate(ctx, request),
        SyntheticOp::NotEquals => inequality::generate(ctx, request),
        SyntheticOp::Compare => compare::generate(ctx, request),
        SyntheticOp::LessThan
        | SyntheticOp::LessThanOrEqual
        | SyntheticOp::GreaterThan
        | SyntheticOp::GreaterThanOrEqual => ordering::generate(ctx, request),
        SyntheticOp::IsSet => is_set::generate(ctx, request),
        SyntheticOp::FieldSetStatus => set_status::generate(ctx, request),
        SyntheticOp::HashCode => hashcode::generate(ctx, request),
        SyntheticOp::StringForm => string_form::generate(ctx, request),
        SyntheticOp::JsonForm => json_form::generate(ctx, request),
        SyntheticOp::Copy => copy::generate(ctx, request),
    };

    debug_assert_eq!(
        verify::check_balance(&instructions),
        Ok(()),
        "unbalanced body for {}.{}",
        request.descriptor.name(),
        request.op.method_name()
    );

    let entry = ctx.fresh_label("entry");
    Operation {
        type_name: request.descriptor.name().to_string(),
        op: request.op,
        return_type: request.return_type.clone(),
        body: BasicBlock::new(entry, instructions),
        debug: request.debug.clone(),
    }
}
