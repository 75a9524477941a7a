//! Language vocabulary registries for the emitted source language.
//!
//! Callers work with stable IDs ([`KeywordId`](keywords::KeywordId), [`Visibility`](visibility::Visibility),
//! [`TypeKind`](types::TypeKind)) and look up spellings through these modules instead of comparing raw strings.
//!
//! ## Notes
//! - Registries are pure: no IO, no side effects.
//! - The lexer and the member extractor enforce syntax; registries only provide spellings.

pub mod conventions;
pub mod keywords;
pub mod types;
pub mod visibility;
