//! Built-in extensions.
//!
//! - [`DeclarativeExtension`] - definitions straight from config keys; drives the CLI
//! - [`TemplateMembersExtension`] - members rendered from a Handlebars template

mod declarative;
mod template_members;

pub use declarative::DeclarativeExtension;
pub use template_members::TemplateMembersExtension;
