//! The closed enumeration of synthesizable operators and methods.
//!
//! Earlier iterations dispatched on the raw operator string and fell
//! back to a void placeholder for unknown names. That default branch
//! masked missing functionality, so the vocabulary is now a closed
//! enum: an unknown name fails at [`SyntheticOp::from_name`] time
//! (in the phase that marks methods as defaulted), and the dispatcher
//! matches exhaustively with no fallback arm.

/// A synthesizable operator or method on an aggregate type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntheticOp {
    /// `==` — field-by-field equality.
    Equals,
    /// `<>` — negation of `==`.
    NotEquals,
    /// `<=>` — three-way comparison.
    Compare,
    /// `<` — derived from `<=>`.
    LessThan,
    /// `<=` — derived from `<=>`.
    LessThanOrEqual,
    /// `>` — derived from `<=>`.
    GreaterThan,
    /// `>=` — derived from `<=>`.
    GreaterThanOrEqual,
    /// `?` / `_isSet` — true iff every own field is set.
    IsSet,
    /// `_fieldSetStatus` — per-field set/unset digest as Bits.
    FieldSetStatus,
    /// `#?` — combined hash of the digest and all set fields.
    HashCode,
    /// `$` — `TypeName(field=value, other=?)` rendering.
    StringForm,
    /// `$$` — JSON object rendering.
    JsonForm,
    /// `:=:` — in-place shallow field copy from another instance.
    Copy,
}

impl SyntheticOp {
    /// Every synthesizable operator, for exhaustive iteration.
    pub const ALL: [SyntheticOp; 13] = [
        SyntheticOp::Equals,
        SyntheticOp::NotEquals,
        SyntheticOp::Compare,
        SyntheticOp::LessThan,
        SyntheticOp::LessThanOrEqual,
        SyntheticOp::GreaterThan,
        SyntheticOp::GreaterThanOrEqual,
        SyntheticOp::IsSet,
        SyntheticOp::FieldSetStatus,
        SyntheticOp::HashCode,
        SyntheticOp::StringForm,
        SyntheticOp::JsonForm,
        SyntheticOp::Copy,
    ];

    /// Parse a surface operator symbol or internal method name.
    ///
    /// Returns `None` for names the compiler cannot synthesize; the
    /// caller treats that as a defect in the phase that requested
    /// synthesis, not as a recoverable condition.
    pub fn from_name(name: &str) -> Option<SyntheticOp> {
        match name {
            "==" => Some(SyntheticOp::Equals),
            "<>" => Some(SyntheticOp::NotEquals),
            "<=>" => Some(SyntheticOp::Compare),
            "<" => Some(SyntheticOp::LessThan),
            "<=" => Some(SyntheticOp::LessThanOrEqual),
            ">" => Some(SyntheticOp::GreaterThan),
            ">=" => Some(SyntheticOp::GreaterThanOrEqual),
            "?" | "_isSet" => Some(SyntheticOp::IsSet),
            "_fieldSetStatus" => Some(SyntheticOp::FieldSetStatus),
            "#?" => Some(SyntheticOp::HashCode),
            "$" => Some(SyntheticOp::StringForm),
            "$$" => Some(SyntheticOp::JsonForm),
            ":=:" => Some(SyntheticOp::Copy),
            _ => None,
        }
    }

    /// The internal method name generated bodies call on fields,
    /// supertypes, and builtins for this operator.
    pub fn method_name(self) -> &'static str {
        match self {
            SyntheticOp::Equals => "_eq",
            SyntheticOp::NotEquals => "_neq",
            SyntheticOp::Compare => "_cmp",
            SyntheticOp::LessThan => "_lt",
            SyntheticOp::LessThanOrEqual => "_lteq",
            SyntheticOp::GreaterThan => "_gt",
            SyntheticOp::GreaterThanOrEqual => "_gteq",
            SyntheticOp::IsSet => "_isSet",
            SyntheticOp::FieldSetStatus => "_fieldSetStatus",
            SyntheticOp::HashCode => "_hashcode",
            SyntheticOp::StringForm => "_string",
            SyntheticOp::JsonForm => "_json",
            SyntheticOp::Copy => "_copy",
        }
    }

    /// Whether this is a surface operator (declared with an operator
    /// symbol) rather than an internal support method.
    ///
    /// `_fieldSetStatus` is the one synthesized method with no surface
    /// symbol; everything else must carry the operator flag on its
    /// request.
    pub fn is_operator(self) -> bool {
        !matches!(self, SyntheticOp::FieldSetStatus)
    }
}
