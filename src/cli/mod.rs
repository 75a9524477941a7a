//! CLI module for the classforge generator
//!
//! ## Commands
//!
//! - `generate <config> -o <dir>` - Generate one file per definition
//! - `dump <config>` - Print generated definitions to stdout
//! - `check <config>` - Run the pipeline and report what it would generate
//!
//! Config files map config-class names to their keys (YAML, or JSON by extension) and are interpreted by the
//! built-in declarative extension.
//!
//! ## Design
//!
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::pipeline::DEFAULT_MAX_EXPANSION_DEPTH;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Library errors are rendered as full diagnostics.
impl From<crate::Error> for CliError {
    fn from(err: crate::Error) -> Self {
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Config-driven class generator
#[derive(Parser, Debug)]
#[command(name = "classforge")]
#[command(version = VERSION)]
#[command(about = "Generate classes from config classes and extensions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that runs the pipeline.
#[derive(clap::Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Config-class file (YAML, or JSON when the extension is .json)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
    /// Namespace prepended to every generated type
    #[arg(long, value_name = "NS")]
    pub namespace: Option<String>,
    /// Also generate a registry class with this type name
    #[arg(long, value_name = "TYPE")]
    pub registry: Option<String>,
    /// Longest allowed chain of extension or config-class proposals
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_EXPANSION_DEPTH)]
    pub max_depth: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one file per definition
    Generate {
        #[command(flatten)]
        pipeline: PipelineArgs,
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
        /// Replace files that already exist
        #[arg(long)]
        overwrite: bool,
    },

    /// Print generated definitions to stdout
    Dump {
        #[command(flatten)]
        pipeline: PipelineArgs,
        /// Only print definitions produced for this config class
        #[arg(long, value_name = "NAME")]
        class: Option<String>,
    },

    /// Run the pipeline without writing anything
    Check {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            pipeline,
            output,
            overwrite,
        } => commands::generate(&pipeline, &output, overwrite),
        Command::Dump { pipeline, class } => commands::dump(&pipeline, class.as_deref()),
        Command::Check { pipeline } => commands::check(&pipeline),
    }
}

// ============================================================================
// Tests
// ============================================================================
