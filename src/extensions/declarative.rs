//! Global extension that builds one definition per config class from plain config keys.
//!
//! Recognized keys:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `type` | `class` (default), `interface` or `trait` |
//! | `extends` | parent type |
//! | `implements` | interface name or list of names |
//! | `abstract`, `final` | declaration modifiers |
//! | `doc` | doc text of the type |
//! | `constants` | mapping of name to literal value |
//! | `properties` | mapping of name to default value, or to `{visibility, default, static, doc}` |
//! | `methods` | mapping of name to body, or to `{visibility, arguments, code, static, final, abstract, doc}` |
//! | `template` | Handlebars source whose members are added to the definition |
//! | `embedded` | mapping of further config classes to generate |
//!
//! Other keys are ignored, so config classes can carry data for other extensions.

use classforge_core::conventions::{self, NAMESPACE_SEPARATOR};
use classforge_core::{TypeKind, Visibility};
use classforge_syntax::Value;
use serde_json::{Map, Value as Json};

use crate::config::{ConfigClasses, json_type_name};
use crate::container::Container;
use crate::definition::{Constant, Definition, Method, Output, Property};
use crate::errors::{Error, Result};
use crate::extension::{
    ClassContext, ClassExtension, ConfigClassContext, Extension, ExtensionUnit, GlobalContext, Options,
};

use super::TemplateMembersExtension;

/// Config-driven definitions.
///
/// Options:
/// - `output` (required): output directory
/// - `namespace`: namespace prepended to every type name
/// - `overwrite`: replace existing files (default `false`)
/// - `registry`: type name of an extra class listing every generated type
pub struct DeclarativeExtension {
    options: Options,
}

impl DeclarativeExtension {
    pub const NAME: &'static str = "declarative";

    pub fn new(provided: Map<String, Json>) -> Result<Self> {
        let options = Options::new()
            .define_required("output")
            .define("namespace", Json::Null)
            .define("overwrite", false)
            .define("registry", Json::Null)
            .resolve(Self::NAME, provided)?;
        Ok(Self { options })
    }

    /// Fully-qualified type name for a config class (`Model::Article` → `<namespace>\Model\Article`).
    pub fn type_name(&self, class: &str) -> Result<String> {
        let local = conventions::config_class_to_type_name(class);
        Ok(match self.options.get_str("namespace")? {
            Some(ns) if !ns.is_empty() => {
                format!("{}{NAMESPACE_SEPARATOR}{local}", ns.trim_matches(NAMESPACE_SEPARATOR))
            }
            _ => local,
        })
    }

    fn output(&self) -> Result<Output> {
        let dir = self
            .options
            .get_str("output")?
            .ok_or_else(|| Error::extension(Self::NAME, "option `output` must be a string"))?;
        Ok(Output::with_overwrite(dir, self.options.get_bool("overwrite")?))
    }

    fn build(&self, cx: &ClassContext<'_>) -> Result<Definition> {
        let reader = KeyReader { class: cx.class };
        let mut definition = Definition::new(&self.type_name(cx.class)?, self.output()?);

        if let Some(kind) = reader.string(cx.get("type"), "type")? {
            let kind = TypeKind::from_keyword(kind)
                .ok_or_else(|| reader.error(format!("unknown type `{kind}`")))?;
            definition.set_type_kind(kind);
        }
        if let Some(parent) = reader.string(cx.get("extends"), "extends")? {
            definition.set_parent_class(parent);
        }
        definition.set_interfaces(reader.names(cx.get("implements"), "implements")?);
        definition.set_abstract(reader.flag(cx.get("abstract"), "abstract")?);
        definition.set_final(reader.flag(cx.get("final"), "final")?);
        definition.set_doc_comment(reader.string(cx.get("doc"), "doc")?.map(str::to_string));

        for (name, value) in reader.mapping(cx.get("constants"), "constants")? {
            definition.add_constant(Constant::new(name.as_str(), Value::from(value)));
        }
        for (name, entry) in reader.mapping(cx.get("properties"), "properties")? {
            definition.add_property(reader.property(name, entry)?);
        }
        for (name, entry) in reader.mapping(cx.get("methods"), "methods")? {
            definition.add_method(reader.method(name, entry)?);
        }
        Ok(definition)
    }

    fn registry(&self, type_name: &str, cx: &GlobalContext<'_>) -> Result<Definition> {
        let mut entries = Vec::with_capacity(cx.config_classes.len());
        for class in cx.config_classes.names() {
            entries.push((class.to_string(), Value::from(self.type_name(class)?)));
        }

        let mut definition = Definition::new(type_name, self.output()?);
        definition.set_final(true);
        definition.set_doc_comment(Some("Every generated type, keyed by config class.".to_string()));
        definition.add_property(Property::new(Visibility::Private, "classes", Value::array(entries)).with_static(true));
        definition.add_method(
            Method::new(Visibility::Public, "all", "", "return self::$classes;").with_static(true),
        );
        definition.add_method(Method::new(
            Visibility::Public,
            "get",
            "$class",
            "return isset(self::$classes[$class]) ? self::$classes[$class] : null;",
        )
        .with_static(true));
        Ok(definition)
    }
}

impl ClassExtension for DeclarativeExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn as_extension(&self) -> Option<&dyn Extension> {
        Some(self)
    }

    fn new_class_extensions(&self, cx: &ClassContext<'_>) -> Result<Vec<ExtensionUnit>> {
        let Some(template) = cx.get("template") else {
            return Ok(Vec::new());
        };
        if cx.chain_contains(TemplateMembersExtension::NAME) {
            return Ok(Vec::new());
        }
        let mut options = Map::new();
        options.insert("template".to_string(), template.clone());
        options.insert("definition".to_string(), Json::String(self.type_name(cx.class)?));
        Ok(vec![ExtensionUnit::class(TemplateMembersExtension::new(options)?)])
    }

    fn new_config_classes(&self, cx: &ClassContext<'_>) -> Result<ConfigClasses> {
        match cx.get("embedded") {
            None | Some(Json::Null) => Ok(ConfigClasses::new()),
            Some(embedded @ Json::Object(_)) => ConfigClasses::from_json(embedded.clone()),
            Some(other) => Err(KeyReader { class: cx.class }.mismatch("embedded", "a mapping", other)),
        }
    }

    fn config_class_process(&self, cx: &mut ConfigClassContext<'_>) -> Result<()> {
        cx.config_class.remove("embedded");
        Ok(())
    }

    fn class_process(&self, cx: &ClassContext<'_>, container: &mut Container) -> Result<()> {
        let definition = self.build(cx)?;
        tracing::trace!(class = cx.class, definition = %definition.full_class(), "built definition");
        container.set(definition.full_class(), definition);
        Ok(())
    }
}

impl Extension for DeclarativeExtension {
    fn post_global_process(&self, cx: &GlobalContext<'_>, global: &mut Container) -> Result<()> {
        let Some(type_name) = self.options.get_str("registry")? else {
            return Ok(());
        };
        let definition = self.registry(type_name, cx)?;
        global.set(definition.full_class(), definition);
        Ok(())
    }
}

// ============================================================================
// Config key reading
// ============================================================================

/// Typed access to config-class keys with errors naming the class.
struct KeyReader<'a> {
    class: &'a str,
}

impl KeyReader<'_> {
    fn error(&self, message: impl std::fmt::Display) -> Error {
        Error::extension(DeclarativeExtension::NAME, format!("config class `{}`: {message}", self.class))
    }

    fn mismatch(&self, key: &str, expected: &str, found: &Json) -> Error {
        self.error(format!("`{key}` must be {expected}, found {}", json_type_name(found)))
    }

    fn string<'j>(&self, value: Option<&'j Json>, key: &str) -> Result<Option<&'j str>> {
        match value {
            None | Some(Json::Null) => Ok(None),
            Some(Json::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(key, "a string", other)),
        }
    }

    fn flag(&self, value: Option<&Json>, key: &str) -> Result<bool> {
        match value {
            None | Some(Json::Null) => Ok(false),
            Some(Json::Bool(b)) => Ok(*b),
            Some(other) => Err(self.mismatch(key, "a boolean", other)),
        }
    }

    fn names(&self, value: Option<&Json>, key: &str) -> Result<Vec<String>> {
        match value {
            None | Some(Json::Null) => Ok(Vec::new()),
            Some(Json::String(s)) => Ok(vec![s.clone()]),
            Some(Json::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Json::String(s) => Ok(s.clone()),
                    other => Err(self.mismatch(key, "a list of strings", other)),
                })
                .collect(),
            Some(other) => Err(self.mismatch(key, "a string or a list of strings", other)),
        }
    }

    fn mapping<'j>(&self, value: Option<&'j Json>, key: &str) -> Result<Vec<(&'j String, &'j Json)>> {
        match value {
            None | Some(Json::Null) => Ok(Vec::new()),
            Some(Json::Object(map)) => Ok(map.iter().collect()),
            Some(other) => Err(self.mismatch(key, "a mapping", other)),
        }
    }

    fn visibility(&self, value: Option<&Json>, key: &str) -> Result<Visibility> {
        match self.string(value, key)? {
            None => Ok(Visibility::default()),
            Some(s) => Visibility::from_keyword(s).ok_or_else(|| self.error(format!("unknown visibility `{s}`"))),
        }
    }

    fn property(&self, name: &str, entry: &Json) -> Result<Property> {
        let Json::Object(fields) = entry else {
            return Ok(Property::new(Visibility::default(), name, Value::from(entry)));
        };
        self.check_fields(name, fields, &["visibility", "default", "static", "doc"])?;

        let key = format!("properties.{name}");
        let mut property = Property::new(
            self.visibility(fields.get("visibility"), &key)?,
            name,
            fields.get("default").map(Value::from).unwrap_or_default(),
        )
        .with_static(self.flag(fields.get("static"), &key)?);
        if let Some(doc) = self.string(fields.get("doc"), &key)? {
            property = property.with_doc_comment(doc);
        }
        Ok(property)
    }

    fn method(&self, name: &str, entry: &Json) -> Result<Method> {
        let fields = match entry {
            Json::String(code) => return Ok(Method::new(Visibility::default(), name, "", code.as_str())),
            Json::Object(fields) => fields,
            other => return Err(self.mismatch(&format!("methods.{name}"), "a string or a mapping", other)),
        };
        self.check_fields(
            name,
            fields,
            &["visibility", "arguments", "code", "static", "final", "abstract", "doc"],
        )?;

        let key = format!("methods.{name}");
        let mut method = Method::new(
            self.visibility(fields.get("visibility"), &key)?,
            name,
            self.string(fields.get("arguments"), &key)?.unwrap_or_default(),
            self.string(fields.get("code"), &key)?.unwrap_or_default(),
        )
        .with_static(self.flag(fields.get("static"), &key)?)
        .with_final(self.flag(fields.get("final"), &key)?)
        .with_abstract(self.flag(fields.get("abstract"), &key)?);
        if let Some(doc) = self.string(fields.get("doc"), &key)? {
            method = method.with_doc_comment(doc);
        }
        Ok(method)
    }

    fn check_fields(&self, member: &str, fields: &Map<String, Json>, allowed: &[&str]) -> Result<()> {
        match fields.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(unknown) => Err(self.error(format!(
                "unknown key `{unknown}` for `{member}` (expected one of: {})",
                allowed.join(", ")
            ))),
            None => Ok(()),
        }
    }
}
