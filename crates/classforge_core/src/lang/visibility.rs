//! Member visibility.

use std::fmt;

use super::keywords::{self, KeywordId};

/// Visibility of a property or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Protected, Visibility::Private];

    /// Keyword spelling used in emitted declarations.
    pub fn as_str(self) -> &'static str {
        keywords::as_str(self.keyword())
    }

    pub fn keyword(self) -> KeywordId {
        match self {
            Visibility::Public => KeywordId::Public,
            Visibility::Protected => KeywordId::Protected,
            Visibility::Private => KeywordId::Private,
        }
    }

    /// Parse a visibility keyword (case-insensitive).
    pub fn from_keyword(spelling: &str) -> Option<Self> {
        match keywords::from_str(spelling)? {
            KeywordId::Public => Some(Visibility::Public),
            KeywordId::Protected => Some(Visibility::Protected),
            KeywordId::Private => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
