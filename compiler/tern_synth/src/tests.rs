//! Crate-level properties that hold across every generator.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tern_ir::{
    BranchOp, BuiltinTypes, FieldDescriptor, InstrKind, ScopeOp, SyntheticOp, TypeDescriptor,
};

use crate::context::GenContext;
use crate::dispatch::synthesize;
use crate::test_helpers::{generate_for, point_descriptor, request_for, rendered};
use crate::verify::check_balance;

fn descriptor_with(field_count: usize, with_super: bool) -> TypeDescriptor {
    let types = [
        "tern.lang::Integer",
        "tern.lang::String",
        "tern.lang::Boolean",
    ];
    let fields = (0..field_count)
        .map(|i| FieldDescriptor::new(format!("f{i}"), types[i % types.len()]))
        .collect();
    let descriptor = TypeDescriptor::new("props::Subject", fields);
    if with_super {
        let base = std::sync::Arc::new(TypeDescriptor::new(
            "props::Base",
            vec![FieldDescriptor::new("b0", "tern.lang::Integer")],
        ));
        descriptor.with_supertype(base, SyntheticOp::ALL)
    } else {
        descriptor
    }
}

proptest! {
    #[test]
    fn every_body_is_balanced(
        field_count in 0usize..6,
        with_super in any::<bool>(),
        op_index in 0usize..SyntheticOp::ALL.len(),
    ) {
        let op = SyntheticOp::ALL[op_index];
        let body = generate_for(op, descriptor_with(field_count, with_super));
        prop_assert_eq!(check_balance(&body), Ok(()));
    }

    #[test]
    fn generation_is_deterministic(
        field_count in 0usize..6,
        op_index in 0usize..SyntheticOp::ALL.len(),
    ) {
        let op = SyntheticOp::ALL[op_index];
        let first = generate_for(op, descriptor_with(field_count, false));
        let second = generate_for(op, descriptor_with(field_count, false));
        prop_assert_eq!(first, second);
    }
}

#[test]
fn namespaced_contexts_never_collide() {
    let request = request_for(SyntheticOp::Equals, point_descriptor());
    let mut first = GenContext::new(BuiltinTypes::default(), None).with_namespace("m1");
    let mut second = GenContext::new(BuiltinTypes::default(), None).with_namespace("m2");

    let one = synthesize(&mut first, &request);
    let two = synthesize(&mut second, &request);

    let one_text = rendered(&one.body.instructions);
    assert!(one_text.iter().any(|l| l.contains("_m1_t1")));
    assert!(one_text.iter().all(|l| !l.contains("_m2_")));
    assert!(two.body.label.starts_with("m2_entry"));
}

#[test]
fn fieldless_equality_body_exactly() {
    let body = generate_for(
        SyntheticOp::Equals,
        TypeDescriptor::new("geom::Unit", vec![]),
    );
    assert_eq!(check_balance(&body), Ok(()));
    assert_eq!(
        rendered(&body),
        vec![
            "SCOPE_ENTER _scope_eq_1",
            "REFERENCE rtn, tern.lang::Boolean",
            "_t1 = CALL this._isSet() -> tern.lang::Boolean",
            "RETAIN _t1",
            "SCOPE_REGISTER _t1, _scope_eq_1",
            "_t2 = CALL _t1._true() -> bool",
            "BRANCH_FALSE _t2, return_unset_1",
            "_t3 = CALL param._isSet() -> tern.lang::Boolean",
            "RETAIN _t3",
            "SCOPE_REGISTER _t3, _scope_eq_1",
            "_t4 = CALL _t3._true() -> bool",
            "BRANCH_FALSE _t4, return_unset_1",
            "BRANCH return_true_3",
            "return_true_3:",
            "_t5 = CALL tern.lang::Boolean::_ofTrue() -> tern.lang::Boolean",
            "RETAIN _t5",
            "SCOPE_REGISTER _t5, _scope_eq_1",
            "STORE rtn = _t5",
            "RETAIN rtn",
            "SCOPE_EXIT _scope_eq_1",
            "RETURN rtn",
            "return_false_2:",
            "_t6 = CALL tern.lang::Boolean::_ofFalse() -> tern.lang::Boolean",
            "RETAIN _t6",
            "SCOPE_REGISTER _t6, _scope_eq_1",
            "STORE rtn = _t6",
            "RETAIN rtn",
            "SCOPE_EXIT _scope_eq_1",
            "RETURN rtn",
            "return_unset_1:",
            "_t7 = CALL tern.lang::Boolean.<init>() -> tern.lang::Boolean",
            "RETAIN _t7",
            "SCOPE_REGISTER _t7, _scope_eq_1",
            "STORE rtn = _t7",
            "RETAIN rtn",
            "SCOPE_EXIT _scope_eq_1",
            "RETURN rtn",
        ]
    );
}

#[test]
fn every_body_enters_its_scope_first_and_exits_before_returning() {
    for op in SyntheticOp::ALL {
        let body = generate_for(op, point_descriptor());
        assert!(
            matches!(
                &body[0].kind,
                InstrKind::Scope {
                    op: ScopeOp::Enter,
                    ..
                }
            ),
            "{op:?}"
        );
        for (index, instr) in body.iter().enumerate() {
            let returns = matches!(
                &instr.kind,
                InstrKind::Branch {
                    op: BranchOp::Return | BranchOp::ReturnVoid,
                    ..
                }
            );
            if returns {
                assert!(
                    matches!(
                        &body[index - 1].kind,
                        InstrKind::Scope {
                            op: ScopeOp::Exit,
                            ..
                        }
                    ),
                    "{op:?}: return at {index} without a preceding scope exit"
                );
            }
        }
    }
}

#[test]
fn inequality_and_equality_share_no_field_traversal() {
    // _neq delegates wholesale; only _eq walks the fields.
    let eq_body = generate_for(SyntheticOp::Equals, point_descriptor());
    let neq_body = generate_for(SyntheticOp::NotEquals, point_descriptor());
    let eq_loads = rendered(&eq_body)
        .iter()
        .filter(|l| l.contains("LOAD this."))
        .count();
    let neq_loads = rendered(&neq_body)
        .iter()
        .filter(|l| l.contains("LOAD this."))
        .count();
    assert_eq!(eq_loads, 2);
    assert_eq!(neq_loads, 0);
}
