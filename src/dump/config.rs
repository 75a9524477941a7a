//! Dumper configuration.

use classforge_core::conventions;

/// How definitions are rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// First line of every file
    pub header: String,
    /// Extension of emitted files, without the dot
    pub file_extension: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            indent_width: conventions::INDENT_WIDTH,
            header: conventions::OPEN_TAG.to_string(),
            file_extension: conventions::FILE_EXTENSION.to_string(),
        }
    }
}

impl DumpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }
}
