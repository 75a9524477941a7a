//! Pipeline orchestrator.
//!
//! A [`Generator`] holds the seeded config classes and the global extensions. [`Generator::run`] drives one run:
//!
//! 1. expand each config class's extension chain and the config-class set (see `expand`)
//! 2. let each chain mutate its config class
//! 3. pre-global hooks on the global container
//! 4. class hooks, one fresh container per config class
//! 5. post-global hooks on the global container
//!
//! Any hook error aborts the run. Every extension that took part is released at the end of the run whether it
//! succeeded or not.
//!
//! ## Module Structure
//!
//! - `config` - GeneratorConfig
//! - `expand` - Chain and config-class expansion

mod config;
mod expand;

pub use config::{DEFAULT_MAX_EXPANSION_DEPTH, GeneratorConfig};

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{ConfigClass, ConfigClasses};
use crate::container::{Container, Containers};
use crate::dump::Dumper;
use crate::emit::{EmitReport, Emitter, Filesystem};
use crate::errors::{EntityKind, Error, Result};
use crate::extension::{
    ClassContext, ClassExtensionRef, ConfigClassContext, Extension, ExtensionRef, GlobalContext,
};

use expand::{Expanded, Units};

/// Drives extensions over config classes and collects the resulting definitions.
#[derive(Default)]
pub struct Generator {
    config: GeneratorConfig,
    config_classes: ConfigClasses,
    extensions: Vec<ExtensionRef>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            config_classes: ConfigClasses::new(),
            extensions: Vec::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn add_config_class(&mut self, name: impl Into<String>, config_class: ConfigClass) {
        self.config_classes.insert(name, config_class);
    }

    pub fn set_config_classes(&mut self, config_classes: ConfigClasses) {
        self.config_classes = config_classes;
    }

    pub fn config_classes(&self) -> &ConfigClasses {
        &self.config_classes
    }

    pub fn add_extension(&mut self, extension: impl Extension + 'static) {
        self.extensions.push(Rc::new(extension));
    }

    pub fn add_extension_ref(&mut self, extension: ExtensionRef) {
        self.extensions.push(extension);
    }

    pub fn set_extensions(&mut self, extensions: Vec<ExtensionRef>) {
        self.extensions = extensions;
    }

    pub fn extensions(&self) -> &[ExtensionRef] {
        &self.extensions
    }

    /// Run every phase and return one container per config class plus the global one.
    ///
    /// The generator's own config classes are not modified; the run works on a copy.
    #[tracing::instrument(skip_all, fields(config_classes = self.config_classes.len(), extensions = self.extensions.len()))]
    pub fn run(&self) -> Result<Containers> {
        let mut units = Units::new(&self.extensions);
        let outcome = self.run_phases(&mut units);
        let released = units.release_all();
        tracing::debug!(units = units.len(), "released extensions");

        match (outcome, released) {
            (Ok(containers), Ok(())) => Ok(containers),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(release_err)) => {
                tracing::warn!(error = %release_err, "release failed after an aborted run");
                Err(err)
            }
        }
    }

    /// Write every definition through `emitter`.
    pub fn emit<F: Filesystem>(&self, containers: &Containers, emitter: &Emitter<F>) -> Result<EmitReport> {
        emitter.emit(containers)
    }

    /// Run, then emit to the local filesystem.
    pub fn process(&self, dumper: Dumper) -> Result<EmitReport> {
        let containers = self.run()?;
        self.emit(&containers, &Emitter::local(dumper))
    }

    fn run_phases(&self, units: &mut Units) -> Result<Containers> {
        if let Some(ext) = self.extensions.iter().find(|ext| ext.as_extension().is_none()) {
            return Err(Error::extension(
                ext.name(),
                "registered globally but `as_extension` does not return the extension",
            ));
        }
        let Expanded {
            mut config_classes,
            chains,
        } = expand::expand(
            self.config_classes.clone(),
            &self.extensions,
            self.config.max_expansion_depth,
            units,
        )?;
        tracing::debug!(config_classes = config_classes.len(), "expansion finished");

        self.mutate_config_classes(&mut config_classes, &chains)?;

        let global_cx = GlobalContext {
            config_classes: &config_classes,
        };
        let mut global = Container::new();
        for ext in &self.extensions {
            ext.pre_global_process(&global_cx, &mut global)?;
        }

        let mut containers = Vec::with_capacity(config_classes.len());
        for (class, config_class) in config_classes.iter() {
            let chain = chain_of(&chains, class)?;
            let cx = ClassContext {
                class,
                config_class,
                config_classes: &config_classes,
                chain,
            };
            let mut container = Container::new();
            for ext in chain {
                ext.class_process(&cx, &mut container)?;
            }
            tracing::trace!(class, definitions = container.size(), "class processed");
            containers.push((class.to_string(), container));
        }

        for ext in &self.extensions {
            ext.post_global_process(&global_cx, &mut global)?;
        }

        Ok(Containers::new(global, containers))
    }

    /// Each chain mutates its own class, in chain order. Hooks see the other classes as they stood before the
    /// current class's turn.
    fn mutate_config_classes(
        &self,
        config_classes: &mut ConfigClasses,
        chains: &HashMap<String, Vec<ClassExtensionRef>>,
    ) -> Result<()> {
        let names: Vec<String> = config_classes.names().map(str::to_string).collect();
        for class in names {
            let chain = chain_of(chains, &class)?;
            let snapshot = config_classes.clone();
            let mut config_class = snapshot.get(&class)?.clone();
            for ext in chain {
                ext.config_class_process(&mut ConfigClassContext {
                    class: &class,
                    config_class: &mut config_class,
                    config_classes: &snapshot,
                })?;
            }
            config_classes.insert(class, config_class);
        }
        Ok(())
    }
}

fn chain_of<'a>(
    chains: &'a HashMap<String, Vec<ClassExtensionRef>>,
    class: &str,
) -> Result<&'a [ClassExtensionRef]> {
    chains
        .get(class)
        .map(Vec::as_slice)
        .ok_or_else(|| Error::not_found(EntityKind::ConfigClass, class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ClassExtension;
    use serde_json::json;

    struct Noop;

    impl ClassExtension for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn as_extension(&self) -> Option<&dyn Extension> {
            Some(self)
        }
    }

    /// Implements `Extension` without identifying itself as one.
    struct Unmarked;

    impl ClassExtension for Unmarked {
        fn name(&self) -> &str {
            "unmarked"
        }
    }

    impl Extension for Unmarked {}

    impl Extension for Noop {}

    fn class(value: serde_json::Value) -> ConfigClass {
        match value {
            serde_json::Value::Object(map) => map,
            _ => ConfigClass::new(),
        }
    }

    #[test]
    fn empty_generator_produces_only_the_global_container() {
        let containers = Generator::default().run().unwrap();
        assert!(containers.is_empty());
        assert!(containers.global().is_empty());
    }

    #[test]
    fn unmarked_global_is_refused() {
        let mut generator = Generator::default();
        generator.add_config_class("A", ConfigClass::new());
        generator.add_extension(Unmarked);
        let err = generator.run().unwrap_err();
        assert!(matches!(err, Error::Extension { ref extension, .. } if extension == "unmarked"));
    }

    #[test]
    fn run_leaves_seeded_classes_untouched() {
        let mut generator = Generator::default();
        generator.add_config_class("A", class(json!({"x": 1})));
        generator.add_extension(Noop);
        let containers = generator.run().unwrap();
        assert_eq!(containers.class_names().collect::<Vec<_>>(), ["A"]);
        assert_eq!(generator.config_classes().get("A").unwrap()["x"], json!(1));
    }
}
