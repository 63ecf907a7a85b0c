//! Synthesis of default operator bodies for aggregate types.
//!
//! When an aggregate declares an operator as defaulted, this crate
//! generates its complete body as backend-agnostic IR: field-by-field
//! equality and comparison, set/unset introspection, hashing, string
//! and JSON rendering, and field copying, each with explicit
//! retain/release/scope bookkeeping. Later phases receive finished
//! [`tern_ir::Operation`]s and never re-derive the semantics.
//!
//! Entry point: build a [`GenContext`] per request and call
//! [`synthesize`]. The [`verify`] module checks the reference-count
//! balance every generated body must satisfy.

mod compare;
mod context;
mod copy;
mod dispatch;
mod emit;
mod equality;
mod hashcode;
mod inequality;
mod is_set;
mod json_form;
mod names;
mod ordering;
mod ret;
mod set_status;
mod string_form;
pub mod verify;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;

pub use context::GenContext;
pub use dispatch::synthesize;
