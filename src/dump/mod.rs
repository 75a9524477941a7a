//! Definition serializer.
//!
//! [`Dumper::dump`] turns a [`Definition`] into source text. Output is deterministic: the same definition always
//! produces the same bytes.
//!
//! Layout, in order:
//! - header line and a blank line
//! - `namespace ...;` and a blank line, when the type is namespaced
//! - the type's doc block
//! - declaration line, then `{`
//! - constants, one per line
//! - properties, one per line, followed by a line break
//! - methods, each preceded and followed by a line break
//! - an extra line break when there are no properties and no methods
//! - `}` and a final newline
//!
//! ## Module Structure
//!
//! - `config` - DumpConfig
//! - `writer` - Indentation-aware string builder
//! - `literal` - Default-value literals

mod config;
pub mod literal;
mod writer;

pub use config::DumpConfig;
pub use literal::{export_value, export_value_with_indent};
pub use writer::CodeWriter;

use classforge_core::keywords::{self, KeywordId};
use classforge_syntax::Value;

use crate::definition::{Definition, Method, Property};

/// Serializes definitions to source text.
#[derive(Debug, Clone, Default)]
pub struct Dumper {
    config: DumpConfig,
}

impl Dumper {
    pub fn new(config: DumpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Render a definition as a complete file.
    #[tracing::instrument(skip_all, fields(class = %definition.full_class()))]
    pub fn dump(&self, definition: &Definition) -> String {
        let mut w = CodeWriter::new(self.config.indent_width);

        w.writeln(&self.config.header);
        w.newline();
        if let Some(namespace) = definition.namespace() {
            w.writeln(&format!("{} {namespace};", keywords::as_str(KeywordId::Namespace)));
            w.newline();
        }
        if let Some(doc) = definition.doc_comment() {
            write_doc(&mut w, doc);
        }
        w.writeln(&declaration(definition));
        w.write("{");

        w.indent();
        for constant in definition.constants() {
            w.newline();
            w.write(&format!(
                "{} {} = {};",
                keywords::as_str(KeywordId::Const),
                constant.name(),
                self.export(constant.value())
            ));
        }

        for property in definition.properties() {
            w.newline();
            if let Some(doc) = &property.doc_comment {
                write_doc(&mut w, doc);
            }
            w.write(&self.property_line(property));
        }
        if !definition.properties().is_empty() {
            w.newline();
        }

        let signatures_only = definition.type_kind().declares_signatures_only();
        for method in definition.methods() {
            w.newline();
            if let Some(doc) = &method.doc_comment {
                write_doc(&mut w, doc);
            }
            w.write(&signature(method, signatures_only));
            if method.is_abstract || signatures_only {
                w.write(";");
            } else {
                w.newline();
                w.writeln("{");
                w.write_block(&method.code);
                w.write("}");
            }
            w.newline();
        }
        w.dedent();

        if definition.properties().is_empty() && definition.methods().is_empty() {
            w.newline();
        }
        w.writeln("}");

        w.finish()
    }

    fn export(&self, value: &Value) -> String {
        export_value_with_indent(value, 1, self.config.indent_width)
    }

    fn property_line(&self, property: &Property) -> String {
        let mut line = String::new();
        if property.is_static {
            line.push_str(keywords::as_str(KeywordId::Static));
            line.push(' ');
        }
        line.push_str(property.visibility.as_str());
        line.push_str(" $");
        line.push_str(&property.name);
        if !property.value.is_null() {
            line.push_str(" = ");
            line.push_str(&self.export(&property.value));
        }
        line.push(';');
        line
    }
}

fn declaration(definition: &Definition) -> String {
    let mut line = String::new();
    if definition.is_final() {
        line.push_str(keywords::as_str(KeywordId::Final));
        line.push(' ');
    }
    if definition.is_abstract() {
        line.push_str(keywords::as_str(KeywordId::Abstract));
        line.push(' ');
    }
    line.push_str(definition.type_kind().as_str());
    line.push(' ');
    line.push_str(definition.class_name());
    if let Some(parent) = definition.parent_class() {
        line.push(' ');
        line.push_str(keywords::as_str(KeywordId::Extends));
        line.push(' ');
        line.push_str(parent);
    }
    if !definition.interfaces().is_empty() {
        line.push(' ');
        line.push_str(keywords::as_str(KeywordId::Implements));
        line.push(' ');
        line.push_str(&definition.interfaces().join(", "));
    }
    line
}

fn signature(method: &Method, signatures_only: bool) -> String {
    let mut modifiers = Vec::new();
    if method.is_final {
        modifiers.push(KeywordId::Final);
    }
    if method.is_abstract && !signatures_only {
        modifiers.push(KeywordId::Abstract);
    }
    if method.is_static {
        modifiers.push(KeywordId::Static);
    }
    modifiers.push(method.visibility.keyword());

    let mut line = modifiers
        .into_iter()
        .map(keywords::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    line.push_str(&format!(
        " {} {}({})",
        keywords::as_str(KeywordId::Function),
        method.name,
        method.arguments
    ));
    line
}

/// Write a `/** ... */` block at the current indentation.
fn write_doc(w: &mut CodeWriter, doc: &str) {
    w.writeln("/**");
    for line in doc.lines() {
        if line.trim().is_empty() {
            w.writeln(" *");
        } else {
            w.writeln(&format!(" * {line}"));
        }
    }
    w.writeln(" */");
}
