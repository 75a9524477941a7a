//! Define the reserved words of the emitted source language.
//!
//! This module is the single source of truth for keyword spellings: a stable identifier ([`KeywordId`]) plus a
//! const metadata table ([`KEYWORDS`]) recording the canonical spelling and a category.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive**, matching how the emitted language treats keywords.
//! - Emission always uses the canonical (lowercase) spelling.
//!
//! ## Examples
//! ```rust
//! use classforge_core::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("NULL"), Some(KeywordId::Null));
//! assert_eq!(keywords::as_str(KeywordId::Null), "null");
//! ```

/// Stable identifier for every reserved word the generator reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Member visibility
    Public,
    Protected,
    Private,

    // Member and declaration modifiers
    Static,
    Final,
    Abstract,

    // Declarations
    Function,
    Const,
    Class,
    Interface,
    Trait,
    Extends,
    Implements,
    Namespace,

    // Literals
    Array,
    True,
    False,
    Null,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Visibility,
    Modifier,
    Declaration,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
    }
}

/// Registry of all keywords, grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Public, "public", KeywordCategory::Visibility),
    info(KeywordId::Protected, "protected", KeywordCategory::Visibility),
    info(KeywordId::Private, "private", KeywordCategory::Visibility),
    info(KeywordId::Static, "static", KeywordCategory::Modifier),
    info(KeywordId::Final, "final", KeywordCategory::Modifier),
    info(KeywordId::Abstract, "abstract", KeywordCategory::Modifier),
    info(KeywordId::Function, "function", KeywordCategory::Declaration),
    info(KeywordId::Const, "const", KeywordCategory::Declaration),
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Interface, "interface", KeywordCategory::Declaration),
    info(KeywordId::Trait, "trait", KeywordCategory::Declaration),
    info(KeywordId::Extends, "extends", KeywordCategory::Declaration),
    info(KeywordId::Implements, "implements", KeywordCategory::Declaration),
    info(KeywordId::Namespace, "namespace", KeywordCategory::Declaration),
    info(KeywordId::Array, "array", KeywordCategory::Literal),
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
];

/// Look up a keyword by spelling, ignoring ASCII case.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS
        .iter()
        .find(|k| k.canonical.eq_ignore_ascii_case(spelling))
        .map(|k| k.id)
}

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a keyword.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    // Every KeywordId variant has exactly one entry in KEYWORDS (checked by tests).
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .unwrap_or(&KEYWORDS[0])
}
