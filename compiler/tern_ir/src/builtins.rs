//! Resolved names of the builtin types generated bodies call into.

/// Marker type name for an unboxed machine boolean.
///
/// `_true()` unboxes a builtin `Boolean` into this form so branch
/// instructions can consume it directly. Unboxed values are stack
/// values: they are never retained or scope-registered.
pub const PRIMITIVE_BOOL: &str = "bool";

/// Fully-qualified names of the builtin types.
///
/// Resolved once per compilation from the builtin module and passed
/// into generation explicitly, so the generators never consult global
/// state. The resolution phases guarantee these types exist before
/// synthesis runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinTypes {
    boolean: String,
    integer: String,
    string: String,
    bits: String,
    json: String,
    void: String,
}

impl BuiltinTypes {
    /// Resolve builtin names against the given builtin module
    /// (normally `tern.lang`).
    pub fn for_module(module: &str) -> Self {
        Self {
            boolean: format!("{module}::Boolean"),
            integer: format!("{module}::Integer"),
            string: format!("{module}::String"),
            bits: format!("{module}::Bits"),
            json: format!("{module}::Json"),
            void: format!("{module}::Void"),
        }
    }

    pub fn boolean(&self) -> &str {
        &self.boolean
    }

    pub fn integer(&self) -> &str {
        &self.integer
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn bits(&self) -> &str {
        &self.bits
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn void(&self) -> &str {
        &self.void
    }
}

impl Default for BuiltinTypes {
    fn default() -> Self {
        Self::for_module("tern.lang")
    }
}
