//! Error types for the generator.
//!
//! Every failure the library reports is an [`Error`]. Variants fall into four categories (see
//! [`Error::category`]): lookups by name, configuration problems, filesystem IO, and template rendering or
//! extraction. None of them are retried; they are surfaced to the operator as-is.

use std::fmt;
use std::path::{Path, PathBuf};

use classforge_syntax::SyntaxError;
use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Kind of entity a by-name lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Definition,
    Property,
    Method,
    Constant,
    ConfigClass,
    Option,
    Container,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Definition => "definition",
            EntityKind::Property => "property",
            EntityKind::Method => "method",
            EntityKind::Constant => "constant",
            EntityKind::ConfigClass => "config class",
            EntityKind::Option => "option",
            EntityKind::Container => "container",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Lookup,
    Configuration,
    Io,
    Template,
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{kind} `{name}` not found")]
    #[diagnostic(code(classforge::lookup))]
    NotFound { kind: EntityKind, name: String },

    #[error("extension `{extension}` is missing required options: {}", .names.join(", "))]
    #[diagnostic(code(classforge::config))]
    MissingOptions { extension: String, names: Vec<String> },

    #[error("extension `{proposer}` proposed `{proposed}` for `{class}`, which is not a class extension")]
    #[diagnostic(
        code(classforge::config),
        help("global extensions can only be registered on the generator, not proposed by other extensions")
    )]
    InvalidProposal {
        class: String,
        proposer: String,
        proposed: String,
    },

    #[error("extension `{proposer}` proposed config class `{name}`, which already exists")]
    #[diagnostic(code(classforge::config))]
    DuplicateConfigClass { name: String, proposer: String },

    #[error("config class `{name}` must be a mapping, found {found}")]
    #[diagnostic(code(classforge::config))]
    InvalidConfigClass { name: String, found: String },

    #[error("expansion cycle for `{class}`: {}", .path.join(" -> "))]
    #[diagnostic(code(classforge::cycle))]
    ExpansionCycle { class: String, path: Vec<String> },

    #[error("expansion for `{class}` exceeded the depth limit of {limit}: {}", .path.join(" -> "))]
    #[diagnostic(code(classforge::cycle), help("raise `max_expansion_depth` if the nesting is intentional"))]
    ExpansionDepth {
        class: String,
        limit: usize,
        path: Vec<String>,
    },

    #[error("extension `{extension}` failed: {message}")]
    #[diagnostic(code(classforge::config))]
    Extension { extension: String, message: String },

    #[error("failed to {action} `{}`", .path.display())]
    #[diagnostic(code(classforge::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory `{}` is not writable", .path.display())]
    #[diagnostic(code(classforge::io))]
    NotWritable { path: PathBuf },

    #[error("`{name}` cannot be mapped to an output path")]
    #[diagnostic(code(classforge::io), help("type names must not contain empty, `.` or `..` segments"))]
    InvalidClassName { name: String },

    #[error("template error: {message}")]
    #[diagnostic(code(classforge::template))]
    Template { message: String },

    #[error("default value of {member} `{name}` is not a literal")]
    #[diagnostic(code(classforge::extract))]
    Extract {
        member: &'static str,
        name: String,
        #[source]
        #[diagnostic_source]
        source: SyntaxError,
    },

    #[error("malformed {member} at offset {offset}: {message}")]
    #[diagnostic(code(classforge::extract))]
    MalformedMember {
        member: &'static str,
        offset: usize,
        message: String,
    },

    #[error("invalid config file `{}`: {message}", .path.display())]
    #[diagnostic(code(classforge::config))]
    ConfigFile { path: PathBuf, message: String },
}

impl Error {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Build a `map_err` adapter for an IO failure on `path`.
    pub fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> Error + 'a {
        move |source| Error::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn extension(extension: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Extension {
            extension: extension.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFound { .. } => ErrorCategory::Lookup,
            Error::MissingOptions { .. }
            | Error::InvalidProposal { .. }
            | Error::DuplicateConfigClass { .. }
            | Error::InvalidConfigClass { .. }
            | Error::ExpansionCycle { .. }
            | Error::ExpansionDepth { .. }
            | Error::Extension { .. }
            | Error::ConfigFile { .. } => ErrorCategory::Configuration,
            Error::Io { .. } | Error::NotWritable { .. } | Error::InvalidClassName { .. } => ErrorCategory::Io,
            Error::Template { .. } | Error::Extract { .. } | Error::MalformedMember { .. } => ErrorCategory::Template,
        }
    }

    /// The name carried by a lookup error.
    pub fn missing_name(&self) -> Option<(EntityKind, &str)> {
        match self {
            Error::NotFound { kind, name } => Some((*kind, name)),
            _ => None,
        }
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(err: handlebars::RenderError) -> Self {
        Error::Template {
            message: err.to_string(),
        }
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Error::Template {
            message: err.to_string(),
        }
    }
}
