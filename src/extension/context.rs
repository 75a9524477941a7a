//! Per-call context handed to extension hooks.
//!
//! Contexts borrow from the orchestrator for the duration of one hook call; extensions never keep them.

use serde_json::Value as Json;

use crate::config::{ConfigClass, ConfigClasses};

use super::ClassExtensionRef;

/// Context for hooks that run on behalf of one config class.
#[derive(Clone, Copy)]
pub struct ClassContext<'a> {
    pub class: &'a str,
    pub config_class: &'a ConfigClass,
    pub config_classes: &'a ConfigClasses,
    /// The class's extension chain; still growing while class extensions are being proposed.
    pub chain: &'a [ClassExtensionRef],
}

impl<'a> ClassContext<'a> {
    /// A config-class value by key.
    pub fn get(&self, key: &str) -> Option<&'a Json> {
        self.config_class.get(key)
    }

    /// Whether an extension with this name is already in the chain.
    pub fn chain_contains(&self, name: &str) -> bool {
        self.chain.iter().any(|ext| ext.name() == name)
    }
}

/// Context for the config-class mutation phase.
pub struct ConfigClassContext<'a> {
    pub class: &'a str,
    pub config_class: &'a mut ConfigClass,
    /// Every config class as it stood before this class's mutation phase began.
    pub config_classes: &'a ConfigClasses,
}

/// Context for the global phases.
#[derive(Clone, Copy)]
pub struct GlobalContext<'a> {
    pub config_classes: &'a ConfigClasses,
}
