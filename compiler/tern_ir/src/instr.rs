//! The closed instruction vocabulary.
//!
//! Instructions are plain data: the generators append them to a
//! sequence and never mutate them afterwards. Operands are names —
//! temporaries (`_t3`), parameters (`this`, `param`), field locations
//! (`this.x`) — because the IR is backend-agnostic and both backends
//! resolve names to their own storage.
//!
//! # Reference counting
//!
//! `Retain`, `Release`, `ScopeRegister` and the scope enter/exit pair
//! are emitted explicitly: the generated body performs its own memory
//! management when it eventually runs, and no later phase re-derives
//! it. The invariant (every temporary retained and registered exactly
//! once; the return slot retained but never registered) is checked by
//! `tern_synth::verify`.

use std::fmt;

use smallvec::SmallVec;

use crate::DebugInfo;

/// Argument lists on calls are nearly always 0–2 entries.
pub type ArgList = SmallVec<[String; 2]>;

/// The callee and operand detail carried by a [`Instr::Call`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallDetails {
    /// Receiver name, the type name for constructor calls, or `None`
    /// for static calls.
    pub target: Option<String>,
    /// Fully-qualified type owning the method.
    pub type_name: String,
    /// Method name (`_eq`, `_isSet`, `<init>`, …).
    pub method: String,
    /// Argument temporaries, in call order.
    pub args: ArgList,
    /// Declared parameter types, parallel to `args`.
    pub arg_types: ArgList,
    /// Fully-qualified return type, or the unboxed `bool` marker.
    pub return_type: String,
    /// Whether the callee is side-effect free. Backends may reorder or
    /// dedupe pure calls.
    pub is_pure: bool,
}

/// Memory operation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryOp {
    /// Read a named location into a temporary.
    Load,
    /// Write a temporary into a named location.
    Store,
    /// Increment the conceptual reference count of a value.
    Retain,
    /// Decrement the conceptual reference count of a value.
    Release,
    /// Declare a named slot (the return variable) of a given type.
    Reference,
}

/// Scope operation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeOp {
    /// Open a lexical cleanup region.
    Enter,
    /// Close the region, releasing every registered temporary.
    Exit,
    /// Associate a temporary with the region for automatic release.
    Register,
}

/// Branch kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchOp {
    /// Unconditional jump.
    Always,
    /// Jump when the unboxed condition is true.
    IfTrue,
    /// Jump when the unboxed condition is false.
    IfFalse,
    /// Return the named value to the caller.
    Return,
    /// Return with no value.
    ReturnVoid,
}

/// A single emitted instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instr {
    pub kind: InstrKind,
    pub debug: Option<DebugInfo>,
}

/// The instruction payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstrKind {
    /// Method, constructor, or static call. `dest` is `None` for void
    /// calls.
    Call {
        dest: Option<String>,
        details: CallDetails,
    },
    /// Load a literal constant into a temporary.
    Literal {
        dest: String,
        value: String,
        type_name: String,
    },
    /// Memory operation. Field meaning varies by `op`:
    /// `Load` reads `source` into `dest`; `Store` writes `source` into
    /// `dest`; `Retain`/`Release` name the value in `dest`;
    /// `Reference` declares `dest` with `type_name`.
    Memory {
        op: MemoryOp,
        dest: String,
        source: Option<String>,
        type_name: Option<String>,
    },
    /// Scope operation; `operand` is the registered temporary for
    /// [`ScopeOp::Register`].
    Scope {
        op: ScopeOp,
        scope_id: String,
        operand: Option<String>,
    },
    /// Branch target marker.
    Label { name: String },
    /// Control transfer; `target` for jumps, `value` for conditions
    /// and return values.
    Branch {
        op: BranchOp,
        target: Option<String>,
        value: Option<String>,
    },
}

impl Instr {
    fn new(kind: InstrKind, debug: Option<DebugInfo>) -> Self {
        Self { kind, debug }
    }

    /// Instance method call: `dest = target.method(args)`.
    pub fn call(dest: impl Into<String>, details: CallDetails, debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Call {
                dest: Some(dest.into()),
                details,
            },
            debug,
        )
    }

    /// Call whose result is discarded (void return).
    pub fn call_void(details: CallDetails, debug: Option<DebugInfo>) -> Self {
        Self::new(InstrKind::Call { dest: None, details }, debug)
    }

    /// Literal constant load.
    pub fn literal(
        dest: impl Into<String>,
        value: impl Into<String>,
        type_name: impl Into<String>,
        debug: Option<DebugInfo>,
    ) -> Self {
        Self::new(
            InstrKind::Literal {
                dest: dest.into(),
                value: value.into(),
                type_name: type_name.into(),
            },
            debug,
        )
    }

    /// Read a named location (`this.x`) into a temporary.
    pub fn load(
        dest: impl Into<String>,
        source: impl Into<String>,
        debug: Option<DebugInfo>,
    ) -> Self {
        Self::new(
            InstrKind::Memory {
                op: MemoryOp::Load,
                dest: dest.into(),
                source: Some(source.into()),
                type_name: None,
            },
            debug,
        )
    }

    /// Write a temporary into a named location.
    pub fn store(
        dest: impl Into<String>,
        source: impl Into<String>,
        debug: Option<DebugInfo>,
    ) -> Self {
        Self::new(
            InstrKind::Memory {
                op: MemoryOp::Store,
                dest: dest.into(),
                source: Some(source.into()),
                type_name: None,
            },
            debug,
        )
    }

    /// Increment the conceptual reference count of the named value.
    pub fn retain(name: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Memory {
                op: MemoryOp::Retain,
                dest: name.into(),
                source: None,
                type_name: None,
            },
            debug,
        )
    }

    /// Decrement the conceptual reference count of the named value.
    pub fn release(name: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Memory {
                op: MemoryOp::Release,
                dest: name.into(),
                source: None,
                type_name: None,
            },
            debug,
        )
    }

    /// Declare the return slot with its type.
    pub fn reference(
        name: impl Into<String>,
        type_name: impl Into<String>,
        debug: Option<DebugInfo>,
    ) -> Self {
        Self::new(
            InstrKind::Memory {
                op: MemoryOp::Reference,
                dest: name.into(),
                source: None,
                type_name: Some(type_name.into()),
            },
            debug,
        )
    }

    /// Open a lexical cleanup region.
    pub fn scope_enter(scope_id: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Scope {
                op: ScopeOp::Enter,
                scope_id: scope_id.into(),
                operand: None,
            },
            debug,
        )
    }

    /// Close the region, releasing registered temporaries.
    pub fn scope_exit(scope_id: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Scope {
                op: ScopeOp::Exit,
                scope_id: scope_id.into(),
                operand: None,
            },
            debug,
        )
    }

    /// Register a temporary with the region.
    pub fn scope_register(
        name: impl Into<String>,
        scope_id: impl Into<String>,
        debug: Option<DebugInfo>,
    ) -> Self {
        Self::new(
            InstrKind::Scope {
                op: ScopeOp::Register,
                scope_id: scope_id.into(),
                operand: Some(name.into()),
            },
            debug,
        )
    }

    /// Branch target marker.
    pub fn label(name: impl Into<String>) -> Self {
        Self::new(InstrKind::Label { name: name.into() }, None)
    }

    /// Unconditional jump.
    pub fn branch(target: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Branch {
                op: BranchOp::Always,
                target: Some(target.into()),
                value: None,
            },
            debug,
        )
    }

    /// Jump when the unboxed condition is true.
    pub fn branch_if_true(
        value: impl Into<String>,
        target: impl Into<String>,
        debug: Option<DebugInfo>,
    ) -> Self {
        Self::new(
            InstrKind::Branch {
                op: BranchOp::IfTrue,
                target: Some(target.into()),
                value: Some(value.into()),
            },
            debug,
        )
    }

    /// Jump when the unboxed condition is false.
    pub fn branch_if_false(
        value: impl Into<String>,
        target: impl Into<String>,
        debug: Option<DebugInfo>,
    ) -> Self {
        Self::new(
            InstrKind::Branch {
                op: BranchOp::IfFalse,
                target: Some(target.into()),
                value: Some(value.into()),
            },
            debug,
        )
    }

    /// Return the named value.
    pub fn return_value(value: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Branch {
                op: BranchOp::Return,
                target: None,
                value: Some(value.into()),
            },
            debug,
        )
    }

    /// Return with no value.
    pub fn return_void(debug: Option<DebugInfo>) -> Self {
        Self::new(
            InstrKind::Branch {
                op: BranchOp::ReturnVoid,
                target: None,
                value: None,
            },
            debug,
        )
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            InstrKind::Call { dest, details } => {
                if let Some(dest) = dest {
                    write!(f, "{dest} = ")?;
                }
                write!(f, "CALL ")?;
                match &details.target {
                    Some(target) => write!(f, "{target}.{}", details.method)?,
                    None => write!(f, "{}::{}", details.type_name, details.method)?,
                }
                write!(f, "({})", details.args.join(", "))?;
                write!(f, " -> {}", details.return_type)
            }
            InstrKind::Literal {
                dest,
                value,
                type_name,
            } => write!(f, "{dest} = LOAD_LITERAL {value}, {type_name}"),
            InstrKind::Memory {
                op,
                dest,
                source,
                type_name,
            } => match op {
                MemoryOp::Load => {
                    write!(f, "{dest} = LOAD {}", source.as_deref().unwrap_or("?"))
                }
                MemoryOp::Store => {
                    write!(f, "STORE {dest} = {}", source.as_deref().unwrap_or("?"))
                }
                MemoryOp::Retain => write!(f, "RETAIN {dest}"),
                MemoryOp::Release => write!(f, "RELEASE {dest}"),
                MemoryOp::Reference => {
                    write!(f, "REFERENCE {dest}, {}", type_name.as_deref().unwrap_or("?"))
                }
            },
            InstrKind::Scope {
                op,
                scope_id,
                operand,
            } => match op {
                ScopeOp::Enter => write!(f, "SCOPE_ENTER {scope_id}"),
                ScopeOp::Exit => write!(f, "SCOPE_EXIT {scope_id}"),
                ScopeOp::Register => write!(
                    f,
                    "SCOPE_REGISTER {}, {scope_id}",
                    operand.as_deref().unwrap_or("?")
                ),
            },
            InstrKind::Label { name } => write!(f, "{name}:"),
            InstrKind::Branch { op, target, value } => match op {
                BranchOp::Always => write!(f, "BRANCH {}", target.as_deref().unwrap_or("?")),
                BranchOp::IfTrue => write!(
                    f,
                    "BRANCH_TRUE {}, {}",
                    value.as_deref().unwrap_or("?"),
                    target.as_deref().unwrap_or("?")
                ),
                BranchOp::IfFalse => write!(
                    f,
                    "BRANCH_FALSE {}, {}",
                    value.as_deref().unwrap_or("?"),
                    target.as_deref().unwrap_or("?")
                ),
                BranchOp::Return => write!(f, "RETURN {}", value.as_deref().unwrap_or("?")),
                BranchOp::ReturnVoid => write!(f, "RETURN"),
            },
        }
    }
}
