//! Declared extension options.

use serde_json::{Map, Value as Json};

use crate::errors::{EntityKind, Error, Result};

/// Options shared by every extension that declares none.
pub static EMPTY_OPTIONS: Options = Options::empty();

#[derive(Debug, Clone, PartialEq)]
struct OptionEntry {
    name: String,
    value: Json,
    required: bool,
}

/// Named option set with defaults, checked once at construction.
///
/// ## Examples
/// ```rust
/// use classforge::extension::Options;
/// use serde_json::{Map, json};
///
/// let mut provided = Map::new();
/// provided.insert("output".into(), json!("build"));
/// let options = Options::new()
///     .define_required("output")
///     .define("overwrite", false)
///     .resolve("writer", provided)
///     .unwrap();
/// assert_eq!(options.get("output").unwrap(), &json!("build"));
/// assert_eq!(options.get("overwrite").unwrap(), &json!(false));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<OptionEntry>,
}

impl Options {
    pub const fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn new() -> Self {
        Self::empty()
    }

    /// Declare an optional option with its default.
    pub fn define(mut self, name: impl Into<String>, default: impl Into<Json>) -> Self {
        self.declare(name.into(), default.into(), false);
        self
    }

    /// Declare an option that must be provided with a non-null value.
    pub fn define_required(mut self, name: impl Into<String>) -> Self {
        self.declare(name.into(), Json::Null, true);
        self
    }

    fn declare(&mut self, name: String, value: Json, required: bool) {
        let entry = OptionEntry { name, value, required };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Apply provided values.
    ///
    /// ## Errors
    /// - [`Error::NotFound`] for the first provided name that was never declared.
    /// - [`Error::MissingOptions`] naming every required option still unset (or null).
    pub fn resolve(mut self, extension: &str, provided: Map<String, Json>) -> Result<Self> {
        for (name, value) in provided {
            self.set(&name, value)?;
        }
        let missing: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.required && e.value.is_null())
            .map(|e| e.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingOptions {
                extension: extension.to_string(),
                names: missing,
            });
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&Json> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
            .ok_or_else(|| Error::not_found(EntityKind::Option, name))
    }

    /// String value of an option; `None` when it is null.
    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.get(name)?.as_str())
    }

    /// Boolean value of an option; null and non-boolean values read as `false`.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.as_bool().unwrap_or(false))
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Replace the value of a declared option.
    pub fn set(&mut self, name: &str, value: Json) -> Result<()> {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.value = value;
                Ok(())
            }
            None => Err(Error::not_found(EntityKind::Option, name)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn to_json(&self) -> Json {
        Json::Object(
            self.entries
                .iter()
                .map(|e| (e.name.clone(), e.value.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provided(value: Json) -> Map<String, Json> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn unknown_option_is_a_lookup_error() {
        let err = Options::new()
            .define("a", 1)
            .resolve("ext", provided(json!({"b": 2})))
            .unwrap_err();
        assert_eq!(err.missing_name(), Some((EntityKind::Option, "b")));
    }

    #[test]
    fn every_missing_required_option_is_reported() {
        let err = Options::new()
            .define_required("output")
            .define("mode", "fast")
            .define_required("namespace")
            .resolve("ext", provided(json!({"namespace": null})))
            .unwrap_err();
        match err {
            Error::MissingOptions { extension, names } => {
                assert_eq!(extension, "ext");
                assert_eq!(names, ["output", "namespace"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn defaults_and_overrides() {
        let options = Options::new()
            .define("mode", "fast")
            .define("debug", false)
            .resolve("ext", provided(json!({"debug": true})))
            .unwrap();
        assert_eq!(options.get_str("mode").unwrap(), Some("fast"));
        assert!(options.get_bool("debug").unwrap());
        assert_eq!(options.to_json(), json!({"mode": "fast", "debug": true}));
        assert_eq!(options.names().collect::<Vec<_>>(), ["mode", "debug"]);
    }

    #[test]
    fn get_and_set_unknown_names_fail() {
        let mut options = Options::new().define("a", Json::Null);
        assert!(options.get("b").is_err());
        assert!(options.set("b", json!(1)).is_err());
        options.set("a", json!(1)).unwrap();
        assert!(options.has("a"));
        assert!(EMPTY_OPTIONS.names().next().is_none());
    }
}
