//! Literal-value syntax for classforge: lexer, parser, value model and diagnostics.
//!
//! Extracted members carry their default values as source-language literals (`1`, `'x'`, `array('a' => true)`).
//! This crate turns such text into a [`Value`] tree, and is the only place that knows the literal grammar.
//!
//! ## Notes
//! - Vocabulary identity (`array`, `true`, `null`, ...) comes from `classforge_core::keywords`.
//! - With the `json` feature, [`Value`] converts to and from `serde_json::Value`.
//!
//! ## Examples
//! ```rust
//! use classforge_syntax::{Key, Value, parser};
//!
//! let value = parser::parse_literal("array('a' => 1, 2)").unwrap();
//! assert_eq!(value, Value::array([(Key::from("a"), Value::Int(1)), (Key::Int(0), Value::Int(2))]));
//!
//! let (value, consumed) = parser::parse_literal_prefix("true; // rest").unwrap();
//! assert_eq!((value, consumed), (Value::Bool(true), 4));
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod value;

pub use diagnostics::{Span, SyntaxError};
pub use parser::{parse_literal, parse_literal_prefix};
pub use value::{Key, Value};
