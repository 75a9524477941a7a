#![forbid(unsafe_code)]
//! classforge: config-driven class generation
//!
//! A run takes a set of named config classes and a chain of extensions, and produces one container of
//! definitions per config class (plus a global container). Each definition is then dumped to a source file.
//!
//! ## Architecture
//!
//! - [`definition`] - In-memory model of one emitted type and its members
//! - [`container`] - Named collections of definitions
//! - [`extension`] - The hooks an extension can implement, their contexts and options
//! - [`pipeline`] - Expansion of extension chains and config classes, then the ordered phases
//! - [`extract`] - Members read back from rendered templates
//! - [`dump`] - Definition to source text
//! - [`emit`] - Source text to files
//! - [`extensions`] - Built-in extensions
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Example
//!
//! ```rust
//! use classforge::definition::{Definition, Output, Property};
//! use classforge::dump::Dumper;
//! use classforge::Visibility;
//!
//! let mut definition = Definition::new("X", Output::new("build"));
//! definition.add_property(Property::new(Visibility::Public, "x", 1));
//! assert_eq!(Dumper::default().dump(&definition), "<?php\n\nclass X\n{\n    public $x = 1;\n}\n");
//! ```

pub mod cli;
pub mod config;
pub mod container;
pub mod definition;
pub mod dump;
pub mod emit;
pub mod errors;
pub mod extension;
pub mod extensions;
pub mod extract;
pub mod pipeline;

pub use classforge_core::{TypeKind, Visibility};
pub use classforge_syntax::{Key, Value};

pub use config::{ConfigClass, ConfigClasses};
pub use container::{Container, Containers};
pub use definition::{Constant, Definition, Method, Output, Property};
pub use dump::{DumpConfig, Dumper};
pub use emit::{EmitReport, Emitter, Filesystem, LocalFilesystem};
pub use errors::{EntityKind, Error, ErrorCategory, Result};
pub use extension::{ClassExtension, Extension, ExtensionUnit, Options};
pub use pipeline::{Generator, GeneratorConfig};
