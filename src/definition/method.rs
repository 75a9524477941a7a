use classforge_core::Visibility;

/// A method declaration.
///
/// `arguments` is the parameter list exactly as it appears between the parentheses. `code` is the body without
/// the enclosing braces and without indentation; the dumper indents it. Abstract methods never emit their code.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub visibility: Visibility,
    pub name: String,
    pub arguments: String,
    pub code: String,
    pub is_final: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub doc_comment: Option<String>,
}

impl Method {
    pub fn new(
        visibility: Visibility,
        name: impl Into<String>,
        arguments: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            visibility,
            name: name.into(),
            arguments: arguments.into(),
            code: code.into(),
            is_final: false,
            is_static: false,
            is_abstract: false,
            doc_comment: None,
        }
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_doc_comment(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }
}
