//! Named collections of definitions.
//!
//! A [`Container`] holds the definitions produced for one generation unit. Lookups are by name; iteration
//! follows insertion order, which is also emission order. [`Containers`] is the result of a pipeline run: the
//! shared global container plus one container per config class.

use classforge_core::conventions::GLOBAL_CONTAINER;

use crate::definition::Definition;
use crate::errors::{EntityKind, Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    definitions: Vec<(String, Definition)>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Store a definition; an existing entry with the same name is replaced in place.
    pub fn set(&mut self, name: impl Into<String>, definition: Definition) {
        let name = name.into();
        match self.index_of(&name) {
            Some(idx) => self.definitions[idx].1 = definition,
            None => self.definitions.push((name, definition)),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Definition> {
        let idx = self.require(name)?;
        Ok(&self.definitions[idx].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Definition> {
        let idx = self.require(name)?;
        Ok(&mut self.definitions[idx].1)
    }

    pub fn remove(&mut self, name: &str) -> Result<Definition> {
        let idx = self.require(name)?;
        Ok(self.definitions.remove(idx).1)
    }

    /// All entries in insertion order.
    pub fn all(&self) -> &[(String, Definition)] {
        &self.definitions
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.definitions.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn size(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.definitions.clear();
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.definitions.iter().position(|(n, _)| n == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| Error::not_found(EntityKind::Definition, name))
    }
}

/// Containers produced by one run: the global container first, then one per config class in expansion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Containers {
    global: Container,
    classes: Vec<(String, Container)>,
}

impl Containers {
    pub fn new(global: Container, classes: Vec<(String, Container)>) -> Self {
        Self { global, classes }
    }

    pub fn global(&self) -> &Container {
        &self.global
    }

    /// Container for a config class, or the global container for `"global"`.
    pub fn get(&self, name: &str) -> Result<&Container> {
        if name == GLOBAL_CONTAINER {
            return Ok(&self.global);
        }
        self.classes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| Error::not_found(EntityKind::Container, name))
    }

    /// Names of the per-class units, in expansion order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|(n, _)| n.as_str())
    }

    /// Every container, global first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Container)> {
        std::iter::once((GLOBAL_CONTAINER, &self.global))
            .chain(self.classes.iter().map(|(n, c)| (n.as_str(), c)))
    }

    /// Number of per-class units (the global container is not counted).
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Total definitions across all containers.
    pub fn definition_count(&self) -> usize {
        self.iter().map(|(_, c)| c.size()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Output;

    fn def(name: &str) -> Definition {
        Definition::new(name, Output::new("out"))
    }

    #[test]
    fn set_replaces_in_place() {
        let mut c = Container::new();
        c.set("A", def("A"));
        c.set("B", def("B"));
        let mut replacement = def("A");
        replacement.set_final(true);
        c.set("A", replacement);

        assert_eq!(c.size(), 2);
        let names: Vec<_> = c.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["A", "B"]);
        assert!(c.get("A").unwrap().is_final());
    }

    #[test]
    fn missing_names_are_lookup_errors() {
        let mut c = Container::new();
        assert_eq!(
            c.get("Nope").unwrap_err().missing_name(),
            Some((EntityKind::Definition, "Nope"))
        );
        assert!(c.remove("Nope").is_err());
        assert!(c.get_mut("Nope").is_err());
    }

    #[test]
    fn remove_and_clear() {
        let mut c = Container::new();
        c.set("A", def("A"));
        c.set("B", def("B"));
        assert_eq!(c.remove("A").unwrap().class_name(), "A");
        assert!(!c.exists("A"));
        c.clear();
        assert!(c.is_empty());
    }

    #[test]
    fn containers_iterate_global_first() {
        let mut global = Container::new();
        global.set("Registry", def("Registry"));
        let mut article = Container::new();
        article.set("Article", def("Article"));
        let containers = Containers::new(global, vec![("Article".into(), article)]);

        let names: Vec<_> = containers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["global", "Article"]);
        assert_eq!(containers.len(), 1);
        assert_eq!(containers.definition_count(), 2);
        assert!(containers.get("global").unwrap().exists("Registry"));
        assert_eq!(
            containers.get("Comment").unwrap_err().missing_name(),
            Some((EntityKind::Container, "Comment"))
        );
    }
}
