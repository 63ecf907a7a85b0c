//! Mechanical reference-count balance checking.
//!
//! Every generator must emit bodies satisfying one invariant, checked
//! here by a linear scan rather than re-proved per generator:
//!
//! * each object-valued temporary (literal load, field load, or call
//!   result) is retained exactly once and scope-registered exactly
//!   once, and never released or overwritten;
//! * unboxed `bool` call results carry no reference counting at all;
//! * declared slots (the return variable) and field locations are
//!   never scope-registered, every `STORE` to them is immediately
//!   followed by a `RETAIN`, and every `RELEASE` is immediately
//!   followed by a `STORE` of the same location.
//!
//! The scope-exit then releases exactly the registered temporaries,
//! and a stored slot or field owns exactly one reference per live
//! value. Generators call this from tests and debug assertions; a
//! failure is a generator bug, never a user error.

use rustc_hash::FxHashMap;
use tern_ir::{Instr, InstrKind, MemoryOp, ScopeOp, PRIMITIVE_BOOL};

#[derive(Clone, Copy, PartialEq, Eq)]
enum NameKind {
    /// Literal, field load, or object-returning call result.
    ObjectTemp,
    /// Unboxed `bool` call result.
    PrimitiveTemp,
    /// `REFERENCE`-declared slot.
    Slot,
    /// Store target never declared in the body (`this.x`).
    Location,
}

#[derive(Default)]
struct Counts {
    retains: u32,
    releases: u32,
    registers: u32,
    stores: u32,
}

/// Check the reference-count balance of one synthesized body.
///
/// Returns a description of the first violation found.
pub fn check_balance(instructions: &[Instr]) -> Result<(), String> {
    let mut kinds: FxHashMap<String, NameKind> = FxHashMap::default();
    let mut counts: FxHashMap<String, Counts> = FxHashMap::default();

    // Classify every name the body introduces.
    for instr in instructions {
        match &instr.kind {
            InstrKind::Call {
                dest: Some(dest),
                details,
            } => {
                let kind = if details.return_type == PRIMITIVE_BOOL {
                    NameKind::PrimitiveTemp
                } else {
                    NameKind::ObjectTemp
                };
                if kinds.insert(dest.clone(), kind).is_some() {
                    return Err(format!("temporary {dest} defined twice"));
                }
            }
            InstrKind::Literal { dest, .. } => {
                if kinds.insert(dest.clone(), NameKind::ObjectTemp).is_some() {
                    return Err(format!("temporary {dest} defined twice"));
                }
            }
            InstrKind::Memory {
                op: MemoryOp::Load,
                dest,
                ..
            } => {
                if kinds.insert(dest.clone(), NameKind::ObjectTemp).is_some() {
                    return Err(format!("temporary {dest} defined twice"));
                }
            }
            InstrKind::Memory {
                op: MemoryOp::Reference,
                dest,
                ..
            } => {
                kinds.insert(dest.clone(), NameKind::Slot);
            }
            _ => {}
        }
    }

    // Tally and check adjacency.
    for (index, instr) in instructions.iter().enumerate() {
        match &instr.kind {
            InstrKind::Memory { op, dest, .. } => match op {
                MemoryOp::Retain => counts.entry(dest.clone()).or_default().retains += 1,
                MemoryOp::Release => {
                    counts.entry(dest.clone()).or_default().releases += 1;
                    if !next_is_store_to(instructions, index, dest) {
                        return Err(format!(
                            "RELEASE {dest} not immediately followed by STORE {dest}"
                        ));
                    }
                }
                MemoryOp::Store => {
                    counts.entry(dest.clone()).or_default().stores += 1;
                    kinds.entry(dest.clone()).or_insert(NameKind::Location);
                    if !next_is_retain_of(instructions, index, dest) {
                        return Err(format!(
                            "STORE {dest} not immediately followed by RETAIN {dest}"
                        ));
                    }
                }
                MemoryOp::Load | MemoryOp::Reference => {}
            },
            InstrKind::Scope {
                op: ScopeOp::Register,
                operand: Some(operand),
                ..
            } => counts.entry(operand.clone()).or_default().registers += 1,
            _ => {}
        }
    }

    for (name, kind) in &kinds {
        let tally = counts.remove(name).unwrap_or_default();
        match kind {
            NameKind::ObjectTemp => {
                if tally.retains != 1 || tally.registers != 1 {
                    return Err(format!(
                        "temporary {name}: {} retains, {} registers (want 1 and 1)",
                        tally.retains, tally.registers
                    ));
                }
                if tally.releases != 0 || tally.stores != 0 {
                    return Err(format!("temporary {name} released or overwritten"));
                }
            }
            NameKind::PrimitiveTemp => {
                if tally.retains != 0 || tally.registers != 0 || tally.releases != 0 {
                    return Err(format!("primitive temporary {name} reference-counted"));
                }
            }
            NameKind::Slot | NameKind::Location => {
                if tally.registers != 0 {
                    return Err(format!("{name} must not be scope-registered"));
                }
                if tally.retains != tally.stores {
                    return Err(format!(
                        "{name}: {} retains for {} stores",
                        tally.retains, tally.stores
                    ));
                }
            }
        }
    }

    // Anything retained but never introduced is a stray.
    if let Some(name) = counts.keys().next() {
        return Err(format!("reference counting on undefined name {name}"));
    }

    Ok(())
}

fn next_is_retain_of(instructions: &[Instr], index: usize, name: &str) -> bool {
    matches!(
        instructions.get(index + 1).map(|i| &i.kind),
        Some(InstrKind::Memory {
            op: MemoryOp::Retain,
            dest,
            ..
        }) if dest == name
    )
}

fn next_is_store_to(instructions: &[Instr], index: usize, name: &str) -> bool {
    matches!(
        instructions.get(index + 1).map(|i| &i.kind),
        Some(InstrKind::Memory {
            op: MemoryOp::Store,
            dest,
            ..
        }) if dest == name
    )
}
