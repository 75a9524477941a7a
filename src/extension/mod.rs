//! Extension capability set.
//!
//! Extensions are the pluggable units the pipeline drives. A [`ClassExtension`] works on behalf of one config
//! class at a time; an [`Extension`] is additionally registered globally and gets the pre/post global phases.
//! Every hook has a no-op default, so implementations only provide what they need.
//!
//! Hooks take `&self` and receive an explicit context for the call. Extensions that record state across calls
//! use interior mutability.
//!
//! ## Module Structure
//!
//! - `options` - Declared options with defaults and required checks
//! - `context` - Per-call contexts
//! - `templates` - Template rendering capability and the Handlebars implementation

mod context;
mod options;
pub mod templates;

pub use context::{ClassContext, ConfigClassContext, GlobalContext};
pub use options::{EMPTY_OPTIONS, Options};
pub use templates::{HandlebarsRenderer, TemplateCache, TemplateRenderer};

use std::fmt;
use std::rc::Rc;

use crate::config::ConfigClasses;
use crate::container::Container;
use crate::errors::Result;

pub type ClassExtensionRef = Rc<dyn ClassExtension>;
pub type ExtensionRef = Rc<dyn Extension>;

/// A unit that contributes to one config class at a time.
pub trait ClassExtension {
    /// Stable name, used in diagnostics and for cycle detection.
    fn name(&self) -> &str;

    fn options(&self) -> &Options {
        &EMPTY_OPTIONS
    }

    /// `Some(self)` for every [`Extension`]. Globals answering `None` are refused at run time, and proposals
    /// answering `Some` are rejected.
    fn as_extension(&self) -> Option<&dyn Extension> {
        None
    }

    /// Propose further class extensions for the current class. Proposals must be [`ExtensionUnit::Class`].
    fn new_class_extensions(&self, _cx: &ClassContext<'_>) -> Result<Vec<ExtensionUnit>> {
        Ok(Vec::new())
    }

    /// Propose new config classes; each one is expanded like the originals.
    fn new_config_classes(&self, _cx: &ClassContext<'_>) -> Result<ConfigClasses> {
        Ok(ConfigClasses::new())
    }

    /// Mutate the current config class before any definitions are built.
    fn config_class_process(&self, _cx: &mut ConfigClassContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Populate the class's container.
    fn class_process(&self, _cx: &ClassContext<'_>, _container: &mut Container) -> Result<()> {
        Ok(())
    }

    /// Release scoped resources. Called once at the end of every run, successful or not.
    fn release(&self) -> Result<()> {
        Ok(())
    }
}

/// A globally registered unit.
///
/// Implementors also override [`ClassExtension::as_extension`] to return `Some(self)`.
pub trait Extension: ClassExtension {
    fn pre_global_process(&self, _cx: &GlobalContext<'_>, _global: &mut Container) -> Result<()> {
        Ok(())
    }

    fn post_global_process(&self, _cx: &GlobalContext<'_>, _global: &mut Container) -> Result<()> {
        Ok(())
    }
}

/// What a proposal hook returns.
#[derive(Clone)]
pub enum ExtensionUnit {
    /// Valid as a proposal only when the unit is not also an [`Extension`].
    Class(ClassExtensionRef),
    /// Never valid as a proposal; the pipeline rejects it.
    Global(ExtensionRef),
}

impl ExtensionUnit {
    pub fn class(extension: impl ClassExtension + 'static) -> Self {
        ExtensionUnit::Class(Rc::new(extension))
    }

    pub fn name(&self) -> &str {
        match self {
            ExtensionUnit::Class(ext) => ext.name(),
            ExtensionUnit::Global(ext) => ext.name(),
        }
    }
}

impl fmt::Debug for ExtensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionUnit::Class(ext) => write!(f, "Class({})", ext.name()),
            ExtensionUnit::Global(ext) => write!(f, "Global({})", ext.name()),
        }
    }
}

/// Address of the object behind an extension handle, for identity comparisons.
pub(crate) fn unit_key(ext: &ClassExtensionRef) -> *const () {
    Rc::as_ptr(ext) as *const ()
}
