//! Tern IR — instruction model for synthetic operator generation.
//!
//! This crate contains the data model consumed and produced by the
//! synthesis stage (`tern_synth`):
//!
//! - **[`Instr`]** — the closed vocabulary of emittable instructions
//!   (calls, memory operations, scope operations, branches, labels,
//!   literals). Pure data, no behavior; append-only once emitted.
//! - **[`Operation`]** / **[`BasicBlock`]** — one synthesized entry
//!   point wrapping the full instruction sequence, the unit handed to
//!   later compiler phases and backends.
//! - **[`TypeDescriptor`]** / **[`FieldDescriptor`]** — the finalized
//!   aggregate shape produced by the resolution phases. Read-only here.
//! - **[`SyntheticOp`]** — the closed enumeration of operators and
//!   methods the compiler can synthesize.
//! - **[`BuiltinTypes`]** — resolved fully-qualified names for the
//!   builtin types the generated bodies call into.
//!
//! # Design
//!
//! Operands are plain names (`_t3`, `this`, `param`, `this.x`): the IR
//! is deliberately backend-agnostic and carries no runtime type
//! information beyond what the descriptors already encode. Two
//! independent backends translate these sequences without re-deriving
//! semantics, so reference-count management (`Retain`, `Release`,
//! `ScopeRegister`) is spelled out explicitly in the instruction
//! stream.

mod builtins;
mod debug;
mod descriptor;
mod instr;
mod operation;
mod operator;

pub use builtins::{BuiltinTypes, PRIMITIVE_BOOL};
pub use debug::DebugInfo;
pub use descriptor::{FieldDescriptor, OperatorRequest, SuperRef, TypeDescriptor};
pub use instr::{ArgList, BranchOp, CallDetails, Instr, InstrKind, MemoryOp, ScopeOp};
pub use operation::{BasicBlock, Operation};
pub use operator::SyntheticOp;
