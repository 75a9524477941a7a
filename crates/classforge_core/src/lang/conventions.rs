//! Shared generator conventions (well-known separators, names and file settings).

/// Separator between namespace segments in a fully-qualified type name (`Model\Base\Article`).
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Separator used by hierarchical config-class names (`Model::Article`).
pub const CONFIG_CLASS_SEPARATOR: &str = "::";

/// Opening tag written at the top of every emitted file.
pub const OPEN_TAG: &str = "<?php";

/// Extension of emitted files (without the dot).
pub const FILE_EXTENSION: &str = "php";

/// Spaces per indentation level in emitted code.
pub const INDENT_WIDTH: usize = 4;

/// Name of the container shared by all global extensions.
pub const GLOBAL_CONTAINER: &str = "global";

/// Permission bits requested for emitted files; the process umask still applies.
pub const FILE_MODE: u32 = 0o666;

/// Split a fully-qualified type name into `(namespace, short name)`.
///
/// ## Examples
/// ```rust
/// use classforge_core::conventions::split_type_name;
///
/// assert_eq!(split_type_name("Model\\Article"), (Some("Model"), "Article"));
/// assert_eq!(split_type_name("Article"), (None, "Article"));
/// ```
pub fn split_type_name(full: &str) -> (Option<&str>, &str) {
    let trimmed = full.trim_start_matches(NAMESPACE_SEPARATOR);
    match trimmed.rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => (Some(&trimmed[..idx]), &trimmed[idx + 1..]),
        None => (None, trimmed),
    }
}

/// Segments of a fully-qualified type name, in order, for mapping onto a directory tree.
pub fn type_path_segments(full: &str) -> Vec<&str> {
    full.trim_start_matches(NAMESPACE_SEPARATOR)
        .split(NAMESPACE_SEPARATOR)
        .collect()
}

/// Whether a path segment is safe to join onto an output directory.
pub fn is_safe_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\0'])
}

/// Convert a hierarchical config-class name into a type name (`Model::Article` → `Model\Article`).
pub fn config_class_to_type_name(name: &str) -> String {
    name.split(CONFIG_CLASS_SEPARATOR)
        .collect::<Vec<_>>()
        .join(&NAMESPACE_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_nested_namespace() {
        assert_eq!(split_type_name("A\\B\\C"), (Some("A\\B"), "C"));
        assert_eq!(split_type_name("\\A\\B"), (Some("A"), "B"));
    }

    #[test]
    fn path_segments_follow_namespace() {
        assert_eq!(type_path_segments("Model\\Base\\Article"), vec!["Model", "Base", "Article"]);
        assert_eq!(type_path_segments("Article"), vec!["Article"]);
    }

    #[test]
    fn unsafe_segments_are_rejected() {
        assert!(is_safe_path_segment("Article"));
        assert!(!is_safe_path_segment(""));
        assert!(!is_safe_path_segment(".."));
        assert!(!is_safe_path_segment("a/b"));
    }

    #[test]
    fn config_class_names_map_to_type_names() {
        assert_eq!(config_class_to_type_name("Model::Article"), "Model\\Article");
        assert_eq!(config_class_to_type_name("Article"), "Article");
    }
}
