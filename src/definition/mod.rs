//! In-memory model of one type to be emitted.
//!
//! A [`Definition`] is created empty during the class phase and filled in by extensions. Members keep
//! insertion order, which is also emission order. Names are not required to be unique; every by-name accessor
//! acts on the first match and fails with [`Error::NotFound`] when nothing matches.

mod constant;
mod method;
mod output;
mod property;

pub use constant::Constant;
pub use method::Method;
pub use output::Output;
pub use property::Property;

use classforge_core::TypeKind;
use classforge_core::conventions::{self, NAMESPACE_SEPARATOR};

use crate::errors::{EntityKind, Error, Result};

/// A type declaration: inheritance, flags, doc text and ordered members.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    namespace: Option<String>,
    class_name: String,
    output: Output,
    type_kind: TypeKind,
    parent_class: Option<String>,
    interfaces: Vec<String>,
    is_final: bool,
    is_abstract: bool,
    doc_comment: Option<String>,
    constants: Vec<Constant>,
    properties: Vec<Property>,
    methods: Vec<Method>,
}

impl Definition {
    /// Create an empty definition for a fully-qualified type name such as `Model\Base\Article`.
    pub fn new(full_class: &str, output: Output) -> Self {
        let (namespace, class_name) = conventions::split_type_name(full_class);
        Self {
            namespace: namespace.map(str::to_string),
            class_name: class_name.to_string(),
            output,
            type_kind: TypeKind::Class,
            parent_class: None,
            interfaces: Vec::new(),
            is_final: false,
            is_abstract: false,
            doc_comment: None,
            constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn full_class(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}{NAMESPACE_SEPARATOR}{}", self.class_name),
            None => self.class_name.clone(),
        }
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn set_output(&mut self, output: Output) {
        self.output = output;
    }

    pub fn type_kind(&self) -> TypeKind {
        self.type_kind
    }

    pub fn set_type_kind(&mut self, kind: TypeKind) {
        self.type_kind = kind;
    }

    pub fn parent_class(&self) -> Option<&str> {
        self.parent_class.as_deref()
    }

    pub fn set_parent_class(&mut self, parent: impl Into<String>) {
        self.parent_class = Some(parent.into());
    }

    pub fn clear_parent_class(&mut self) {
        self.parent_class = None;
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Append an interface; duplicates are kept.
    pub fn add_interface(&mut self, interface: impl Into<String>) {
        self.interfaces.push(interface.into());
    }

    pub fn set_interfaces(&mut self, interfaces: Vec<String>) {
        self.interfaces = interfaces;
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn set_abstract(&mut self, is_abstract: bool) {
        self.is_abstract = is_abstract;
    }

    pub fn doc_comment(&self) -> Option<&str> {
        self.doc_comment.as_deref()
    }

    pub fn set_doc_comment(&mut self, doc: Option<String>) {
        self.doc_comment = doc;
    }

    // ========================================================================
    // Constants
    // ========================================================================

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn add_constant(&mut self, constant: Constant) {
        self.constants.push(constant);
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.iter().any(|c| c.name() == name)
    }

    pub fn constant(&self, name: &str) -> Result<&Constant> {
        let idx = position(&self.constants, name, EntityKind::Constant, Constant::name)?;
        Ok(&self.constants[idx])
    }

    pub fn remove_constant(&mut self, name: &str) -> Result<Constant> {
        let idx = position(&self.constants, name, EntityKind::Constant, Constant::name)?;
        Ok(self.constants.remove(idx))
    }

    // ========================================================================
    // Properties
    // ========================================================================

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn add_properties(&mut self, properties: impl IntoIterator<Item = Property>) {
        self.properties.extend(properties);
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    pub fn property(&self, name: &str) -> Result<&Property> {
        let idx = position(&self.properties, name, EntityKind::Property, |p| &p.name)?;
        Ok(&self.properties[idx])
    }

    pub fn property_mut(&mut self, name: &str) -> Result<&mut Property> {
        let idx = position(&self.properties, name, EntityKind::Property, |p| &p.name)?;
        Ok(&mut self.properties[idx])
    }

    pub fn remove_property(&mut self, name: &str) -> Result<Property> {
        let idx = position(&self.properties, name, EntityKind::Property, |p| &p.name)?;
        Ok(self.properties.remove(idx))
    }

    // ========================================================================
    // Methods
    // ========================================================================

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn add_methods(&mut self, methods: impl IntoIterator<Item = Method>) {
        self.methods.extend(methods);
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    pub fn method(&self, name: &str) -> Result<&Method> {
        let idx = position(&self.methods, name, EntityKind::Method, |m| &m.name)?;
        Ok(&self.methods[idx])
    }

    pub fn method_mut(&mut self, name: &str) -> Result<&mut Method> {
        let idx = position(&self.methods, name, EntityKind::Method, |m| &m.name)?;
        Ok(&mut self.methods[idx])
    }

    pub fn remove_method(&mut self, name: &str) -> Result<Method> {
        let idx = position(&self.methods, name, EntityKind::Method, |m| &m.name)?;
        Ok(self.methods.remove(idx))
    }
}

/// Index of the first member named `name`.
fn position<T>(items: &[T], name: &str, kind: EntityKind, name_of: impl Fn(&T) -> &str) -> Result<usize> {
    items
        .iter()
        .position(|item| name_of(item) == name)
        .ok_or_else(|| Error::not_found(kind, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use classforge_core::Visibility;
    use classforge_syntax::Value;

    fn article() -> Definition {
        Definition::new("Model\\Base\\Article", Output::new("/tmp/out"))
    }

    #[test]
    fn splits_namespace_from_class_name() {
        let def = article();
        assert_eq!(def.namespace(), Some("Model\\Base"));
        assert_eq!(def.class_name(), "Article");
        assert_eq!(def.full_class(), "Model\\Base\\Article");

        let plain = Definition::new("Article", Output::new("."));
        assert_eq!(plain.namespace(), None);
        assert_eq!(plain.full_class(), "Article");
    }

    #[test]
    fn first_match_wins_for_duplicates() {
        let mut def = article();
        def.add_property(Property::new(Visibility::Public, "title", 1));
        def.add_property(Property::new(Visibility::Private, "title", 2));

        assert_eq!(def.property("title").unwrap().value, Value::Int(1));
        let removed = def.remove_property("title").unwrap();
        assert_eq!(removed.visibility, Visibility::Public);
        assert_eq!(def.property("title").unwrap().value, Value::Int(2));
    }

    #[test]
    fn lookups_fail_with_the_searched_name() {
        let mut def = article();
        let cases = [
            (def.constant("MAX").unwrap_err(), EntityKind::Constant),
            (def.property("title").unwrap_err(), EntityKind::Property),
            (def.method("save").unwrap_err(), EntityKind::Method),
        ];
        for (err, kind) in cases {
            let (found_kind, name) = err.missing_name().unwrap();
            assert_eq!(found_kind, kind);
            assert!(["MAX", "title", "save"].contains(&name));
        }
        assert!(def.remove_method("save").is_err());
        assert!(def.remove_constant("MAX").is_err());
        assert!(def.property_mut("nope").is_err());
    }

    #[test]
    fn members_keep_insertion_order() {
        let mut def = article();
        def.add_methods([
            Method::new(Visibility::Public, "b", "", ""),
            Method::new(Visibility::Public, "a", "", ""),
        ]);
        def.add_constant(Constant::new("Z", 1));
        def.add_constant(Constant::new("A", 2));
        let names: Vec<_> = def.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        let names: Vec<_> = def.constants().iter().map(Constant::name).collect();
        assert_eq!(names, ["Z", "A"]);
    }

    #[test]
    fn in_place_edits() {
        let mut def = article();
        def.add_method(Method::new(Visibility::Public, "save", "", "return true;"));
        def.method_mut("save").unwrap().is_final = true;
        assert!(def.method("save").unwrap().is_final);
        assert!(def.has_method("save"));
        assert!(!def.has_property("save"));
    }

    #[test]
    fn interfaces_allow_duplicates() {
        let mut def = article();
        def.add_interface("\\Countable");
        def.add_interface("\\Countable");
        assert_eq!(def.interfaces().len(), 2);
        def.set_parent_class("\\Model\\Base");
        assert_eq!(def.parent_class(), Some("\\Model\\Base"));
        def.clear_parent_class();
        assert_eq!(def.parent_class(), None);
    }
}
