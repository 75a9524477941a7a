use classforge_core::Visibility;
use classforge_syntax::Value;

/// A property declaration with its default value.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub visibility: Visibility,
    pub name: String,
    /// `Value::Null` means no default is written.
    pub value: Value,
    pub is_static: bool,
    /// Plain text, without comment delimiters.
    pub doc_comment: Option<String>,
}

impl Property {
    pub fn new(visibility: Visibility, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            visibility,
            name: name.into(),
            value: value.into(),
            is_static: false,
            doc_comment: None,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_doc_comment(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }
}
