//! Well-known operand and method names used by the generators.

/// The receiver of the synthesized method.
pub(crate) const THIS: &str = "this";
/// The single operand of binary operators. The resolution phases name
/// the parameter symbol `param`; the IR must match it.
pub(crate) const PARAM: &str = "param";
/// The supertype receiver for delegating calls.
pub(crate) const SUPER: &str = "super";
/// The declared return slot.
pub(crate) const RETURN_SLOT: &str = "rtn";

/// Constructor method name; a default construction yields an unset
/// value.
pub(crate) const INIT_METHOD: &str = "<init>";
/// Unboxes a builtin Boolean into a machine `bool`.
pub(crate) const TRUE_METHOD: &str = "_true";
/// Static Boolean factories.
pub(crate) const OF_TRUE_METHOD: &str = "_ofTrue";
pub(crate) const OF_FALSE_METHOD: &str = "_ofFalse";
/// Static Bits factory: a set-but-empty digest, distinct from the
/// unset value a default construction produces.
pub(crate) const OF_EMPTY_METHOD: &str = "_ofEmpty";
/// Bits emptiness query.
pub(crate) const EMPTY_METHOD: &str = "_empty";
/// Arithmetic / append / concatenation.
pub(crate) const ADD_METHOD: &str = "_add";
pub(crate) const MUL_METHOD: &str = "_mul";
/// Json object primitives.
pub(crate) const OBJECT_METHOD: &str = "object";
pub(crate) const MERGE_METHOD: &str = "_merge";
