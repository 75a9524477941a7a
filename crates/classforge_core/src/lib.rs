//! Provide the canonical vocabulary shared by the classforge generator and its literal grammar.
//!
//! This crate is intentionally small and dependency-free. It holds the spellings that both the syntax crate (when
//! reading rendered templates back) and the dumper (when writing declarations out) must agree on.
//!
//! ## Notes
//!
//! - No IO, no global state, no generator-specific types.
//! - Current scope: reserved words of the emitted language, member visibility, declaration kinds, and the
//!   conventions that map a type name onto an output path.

pub mod lang;

pub use lang::conventions;
pub use lang::keywords::{self, KeywordId};
pub use lang::types::TypeKind;
pub use lang::visibility::Visibility;
