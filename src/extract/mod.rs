//! Member extractor.
//!
//! Renders a template and reads properties and methods back out of the rendered text. Properties are scanned
//! first; every matched span is cut from the text, and methods are then scanned over what remains. Whatever is
//! left after both passes is discarded.
//!
//! Default values go through `classforge_syntax::parse_literal_prefix`, so only literals are accepted: numbers,
//! strings, booleans, null, and nested arrays of those.

mod scanner;

use std::sync::LazyLock;

use classforge_core::Visibility;
use regex::{Captures, Regex};
use serde_json::{Map, Value as Json};

use crate::definition::{Definition, Method, Property};
use crate::errors::{Error, Result};
use crate::extension::{ClassContext, Options, TemplateRenderer};

const DOC_PATTERN: &str = r"/\*\*(?:[^*]|\*+[^*/])*\*+/";

static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:(?P<doc>{DOC_PATTERN})\s*)?\b(?P<before>(?i:static)\s+)?(?P<vis>(?i:public|protected|private))\s+(?P<after>(?i:static)\s+)?\$(?P<name>[A-Za-z_]\w*)\s*"
    ))
    .expect("property pattern is valid")
});

static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:(?P<doc>{DOC_PATTERN})\s*)?\b(?P<before>(?:(?i:final|abstract|static)\s+)*)(?P<vis>(?i:public|protected|private))\s+(?P<after>(?:(?i:final|abstract|static)\s+)*)(?i:function)\s+(?P<name>[A-Za-z_]\w*)\s*\("
    ))
    .expect("method pattern is valid")
});

/// Renders member templates and attaches the members found in the output to a definition.
pub struct MemberExtractor<'r> {
    renderer: &'r dyn TemplateRenderer,
}

impl<'r> MemberExtractor<'r> {
    pub fn new(renderer: &'r dyn TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Render `template` with `variables` and add the extracted members to `definition`.
    ///
    /// Nothing is added when rendering or extraction fails.
    #[tracing::instrument(skip_all, fields(class = %definition.full_class()))]
    pub fn extract(&self, definition: &mut Definition, template: &str, variables: &Json) -> Result<()> {
        let rendered = self.renderer.render(template, variables)?;
        extract_members(definition, &rendered)
    }
}

/// Variables every member template sees: `options`, `class`, `config_class` and `config_classes`. Entries in
/// `extra` are merged on top.
pub fn template_variables(options: &Options, cx: &ClassContext<'_>, extra: Map<String, Json>) -> Json {
    let mut vars = Map::new();
    vars.insert("options".to_string(), options.to_json());
    vars.insert("class".to_string(), Json::String(cx.class.to_string()));
    vars.insert("config_class".to_string(), Json::Object(cx.config_class.clone()));
    vars.insert("config_classes".to_string(), cx.config_classes.to_json());
    vars.extend(extra);
    Json::Object(vars)
}

/// Scan already-rendered text and append its properties, then its methods, to `definition`.
pub fn extract_members(definition: &mut Definition, rendered: &str) -> Result<()> {
    let (properties, residual) = scan_properties(rendered)?;
    let methods = scan_methods(&residual)?;
    tracing::trace!(
        properties = properties.len(),
        methods = methods.len(),
        "extracted members"
    );
    definition.add_properties(properties);
    definition.add_methods(methods);
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

fn scan_properties(text: &str) -> Result<(Vec<Property>, String)> {
    let mut properties = Vec::new();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(caps) = PROPERTY_RE.captures_at(text, pos) {
        let (start, head_end) = match caps.get(0) {
            Some(m) => (m.start(), m.end()),
            None => break,
        };
        let name = &caps["name"];
        if scanner::inside_parens(text, start) {
            // A promoted constructor parameter, with or without a default.
            pos = head_end;
            continue;
        }
        let rest = &text[head_end..];

        let (value, tail) = if let Some(after_eq) = rest.strip_prefix('=') {
            let (value, consumed) =
                classforge_syntax::parse_literal_prefix(after_eq).map_err(|source| Error::Extract {
                    member: "property",
                    name: name.to_string(),
                    source,
                })?;
            (value, head_end + 1 + consumed)
        } else if rest.starts_with(';') {
            (classforge_syntax::Value::Null, head_end)
        } else {
            // Some other non-declaration use of the keywords.
            pos = head_end;
            continue;
        };

        let after_value = &text[tail..];
        let trimmed = after_value.trim_start();
        if !trimmed.starts_with(';') {
            return Err(Error::MalformedMember {
                member: "property",
                offset: tail,
                message: format!("expected `;` after the value of `${name}`"),
            });
        }
        let end = tail + (after_value.len() - trimmed.len()) + 1;

        let mut property = Property::new(visibility(&caps), name, value)
            .with_static(caps.name("before").is_some() || caps.name("after").is_some());
        if let Some(doc) = caps.name("doc") {
            property = property.with_doc_comment(scanner::doc_text(doc.as_str()));
        }
        properties.push(property);
        spans.push((start, end));
        pos = end;
    }

    Ok((properties, scanner::remove_spans(text, &spans)))
}

// ============================================================================
// Methods
// ============================================================================

fn scan_methods(text: &str) -> Result<Vec<Method>> {
    let mut methods = Vec::new();
    let mut pos = 0;

    while let Some(caps) = METHOD_RE.captures_at(text, pos) {
        let Some(head) = caps.get(0) else { break };
        let name = &caps["name"];
        let open_paren = head.end() - 1;
        let close_paren =
            scanner::find_closing(text, open_paren, b'(', b')').ok_or_else(|| Error::MalformedMember {
                member: "method",
                offset: open_paren,
                message: format!("unbalanced argument list of `{name}`"),
            })?;
        let arguments = text[open_paren + 1..close_paren].trim();

        let after_args = &text[close_paren + 1..];
        let body_start = close_paren + 1 + (after_args.len() - after_args.trim_start().len());
        let (code, end) = match text.as_bytes().get(body_start) {
            Some(b';') => (String::new(), body_start + 1),
            Some(b'{') => {
                let close = scanner::find_closing(text, body_start, b'{', b'}').ok_or_else(|| {
                    Error::MalformedMember {
                        member: "method",
                        offset: body_start,
                        message: format!("unbalanced body of `{name}`"),
                    }
                })?;
                (scanner::body_text(&text[body_start + 1..close]), close + 1)
            }
            _ => {
                return Err(Error::MalformedMember {
                    member: "method",
                    offset: body_start,
                    message: format!("expected `{{` or `;` after the arguments of `{name}`"),
                });
            }
        };

        let modifiers = format!(
            "{} {}",
            caps.name("before").map_or("", |m| m.as_str()),
            caps.name("after").map_or("", |m| m.as_str())
        )
        .to_ascii_lowercase();
        let has = |word: &str| modifiers.split_whitespace().any(|m| m == word);

        let mut method = Method::new(visibility(&caps), name, arguments, code)
            .with_final(has("final"))
            .with_static(has("static"))
            .with_abstract(has("abstract"));
        if let Some(doc) = caps.name("doc") {
            method = method.with_doc_comment(scanner::doc_text(doc.as_str()));
        }
        methods.push(method);
        pos = end;
    }

    Ok(methods)
}

fn visibility(caps: &Captures<'_>) -> Visibility {
    Visibility::from_keyword(&caps["vis"]).unwrap_or_default()
}
