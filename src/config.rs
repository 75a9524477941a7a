//! Config classes: the named metadata maps that drive generation.
//!
//! A config class is an ordered JSON object. [`ConfigClasses`] keeps classes in insertion order (which becomes
//! expansion and emission order) and can be loaded from YAML or JSON files whose top level maps class names to
//! class bodies.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value as Json};

use crate::errors::{EntityKind, Error, Result};

/// Metadata of one config class.
pub type ConfigClass = Map<String, Json>;

/// Ordered set of config classes keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigClasses {
    entries: Vec<(String, ConfigClass)>,
    index: HashMap<String, usize>,
}

impl ConfigClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class; an existing class with the same name is replaced in place.
    pub fn insert(&mut self, name: impl Into<String>, class: ConfigClass) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&idx) => self.entries[idx].1 = class,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, class));
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&ConfigClass> {
        self.index
            .get(name)
            .map(|&idx| &self.entries[idx].1)
            .ok_or_else(|| Error::not_found(EntityKind::ConfigClass, name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut ConfigClass> {
        match self.index.get(name) {
            Some(&idx) => Ok(&mut self.entries[idx].1),
            None => Err(Error::not_found(EntityKind::ConfigClass, name)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigClass)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON object of every class, for template variables.
    pub fn to_json(&self) -> Json {
        Json::Object(
            self.entries
                .iter()
                .map(|(n, c)| (n.clone(), Json::Object(c.clone())))
                .collect(),
        )
    }

    /// Build from a JSON value whose top level maps class names to objects (or `null` for an empty class).
    pub fn from_json(value: Json) -> Result<Self> {
        let Json::Object(top) = value else {
            return Err(Error::InvalidConfigClass {
                name: "<root>".to_string(),
                found: json_type_name(&value).to_string(),
            });
        };
        let mut classes = ConfigClasses::new();
        for (name, body) in top {
            match body {
                Json::Object(map) => classes.insert(name, map),
                Json::Null => classes.insert(name, Map::new()),
                other => {
                    return Err(Error::InvalidConfigClass {
                        name,
                        found: json_type_name(&other).to_string(),
                    });
                }
            }
        }
        Ok(classes)
    }

    /// Load a config file: `.json` files are parsed as JSON, anything else as YAML.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(Error::io("read config file", path))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let value: Json = if is_json {
            serde_json::from_str(&text).map_err(|e| Error::ConfigFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&text).map_err(|e| Error::ConfigFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };
        let classes = Self::from_json(value)?;
        tracing::debug!(classes = classes.len(), "loaded config classes");
        Ok(classes)
    }
}

impl<N: Into<String>> FromIterator<(N, ConfigClass)> for ConfigClasses {
    fn from_iter<I: IntoIterator<Item = (N, ConfigClass)>>(iter: I) -> Self {
        let mut classes = ConfigClasses::new();
        for (name, class) in iter {
            classes.insert(name, class);
        }
        classes
    }
}

impl IntoIterator for ConfigClasses {
    type Item = (String, ConfigClass);
    type IntoIter = std::vec::IntoIter<(String, ConfigClass)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

pub(crate) fn json_type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "mapping",
    }
}
