//! Generator configuration.

/// Default bound on proposal nesting.
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 32;

/// Settings for a [`Generator`](super::Generator) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Longest allowed proposal path, counting the unit that started it. Applies to class-extension proposals
    /// (starting from a global extension) and to config-class proposals (starting from a seeded class).
    pub max_expansion_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_expansion_depth(mut self, depth: usize) -> Self {
        self.max_expansion_depth = depth;
        self
    }
}
