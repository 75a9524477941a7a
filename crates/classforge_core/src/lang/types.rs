//! Declaration kinds.

use std::fmt;

use super::keywords::{self, KeywordId};

/// Kind of type a definition is emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Trait,
}

impl TypeKind {
    /// Keyword that opens the declaration line.
    pub fn as_str(self) -> &'static str {
        keywords::as_str(match self {
            TypeKind::Class => KeywordId::Class,
            TypeKind::Interface => KeywordId::Interface,
            TypeKind::Trait => KeywordId::Trait,
        })
    }

    pub fn from_keyword(spelling: &str) -> Option<Self> {
        match keywords::from_str(spelling)? {
            KeywordId::Class => Some(TypeKind::Class),
            KeywordId::Interface => Some(TypeKind::Interface),
            KeywordId::Trait => Some(TypeKind::Trait),
            _ => None,
        }
    }

    /// Interfaces only declare signatures; every method is emitted without a body.
    pub fn declares_signatures_only(self) -> bool {
        matches!(self, TypeKind::Interface)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
