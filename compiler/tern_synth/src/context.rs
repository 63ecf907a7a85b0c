//! Per-request generation context.
//!
//! Supplies fresh temporary, label, and scope names, the resolved
//! builtin type names, and the request's debug information. One
//! context exists per synthesis request and is passed into every
//! emission function explicitly — there is no ambient or global
//! counter.
//!
//! Cross-request uniqueness is the caller's concern: when requests
//! are generated in parallel, each worker constructs its contexts
//! with a distinct namespace (for example the construct's symbol id),
//! which is folded into every generated name. Within one request the
//! counters are monotonic, so names never collide.

use tern_ir::{BuiltinTypes, DebugInfo};

/// Fresh-name source and shared lookups for one synthesis request.
#[derive(Clone, Debug)]
pub struct GenContext {
    builtins: BuiltinTypes,
    debug: Option<DebugInfo>,
    namespace: Option<String>,
    next_temp: u32,
    next_label: u32,
    next_scope: u32,
}

impl GenContext {
    /// Create a context with no namespace (single-threaded use).
    pub fn new(builtins: BuiltinTypes, debug: Option<DebugInfo>) -> Self {
        Self {
            builtins,
            debug,
            namespace: None,
            next_temp: 0,
            next_label: 0,
            next_scope: 0,
        }
    }

    /// Fold a request-unique namespace into every generated name, for
    /// parallel generation across worker threads.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Next temporary name: `_t3`, or `_m7_t3` under namespace `m7`.
    pub fn fresh_temp(&mut self) -> String {
        self.next_temp += 1;
        match &self.namespace {
            Some(ns) => format!("_{ns}_t{}", self.next_temp),
            None => format!("_t{}", self.next_temp),
        }
    }

    /// Next label name: `return_unset_2`, namespaced the same way.
    pub fn fresh_label(&mut self, prefix: &str) -> String {
        self.next_label += 1;
        match &self.namespace {
            Some(ns) => format!("{ns}_{prefix}_{}", self.next_label),
            None => format!("{prefix}_{}", self.next_label),
        }
    }

    /// Next scope identifier: `_scope_eq_1`.
    pub fn fresh_scope(&mut self, prefix: &str) -> String {
        self.next_scope += 1;
        match &self.namespace {
            Some(ns) => format!("_{ns}_scope_{prefix}_{}", self.next_scope),
            None => format!("_scope_{prefix}_{}", self.next_scope),
        }
    }

    /// Debug info attached to every emitted instruction.
    pub fn debug(&self) -> Option<DebugInfo> {
        self.debug.clone()
    }

    /// Resolved builtin type names.
    pub fn builtins(&self) -> &BuiltinTypes {
        &self.builtins
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tern_ir::BuiltinTypes;

    use super::*;

    #[test]
    fn names_are_unique_within_a_request() {
        let mut ctx = GenContext::new(BuiltinTypes::default(), None);
        assert_eq!(ctx.fresh_temp(), "_t1");
        assert_eq!(ctx.fresh_temp(), "_t2");
        assert_eq!(ctx.fresh_label("return_unset"), "return_unset_1");
        assert_eq!(ctx.fresh_label("return_true"), "return_true_2");
        assert_eq!(ctx.fresh_scope("eq"), "_scope_eq_1");
    }

    #[test]
    fn namespace_is_folded_into_every_name() {
        let mut ctx = GenContext::new(BuiltinTypes::default(), None).with_namespace("m7");
        assert_eq!(ctx.fresh_temp(), "_m7_t1");
        assert_eq!(ctx.fresh_label("entry"), "m7_entry_1");
        assert_eq!(ctx.fresh_scope("cmp"), "_m7_scope_cmp_1");
    }
}
