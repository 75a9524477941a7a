//! End-to-end tests for the declarative extension and the CLI
//!
//! These tests load config-class fixtures, run the full pipeline and check the generated files.
//!
//! Run with: `cargo test --test declarative_tests`

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use classforge::cli::{Cli, ExitCode, execute};
use classforge::extensions::DeclarativeExtension;
use classforge::{ConfigClasses, Dumper, Error, Generator, Value};
use serde_json::{Map, Value as Json, json};

const BLOG: &str = "tests/fixtures/blog.yml";

fn options(output: &Path, registry: Option<&str>) -> Map<String, Json> {
    let mut options = Map::new();
    options.insert("output".to_string(), json!(output.to_string_lossy()));
    options.insert("namespace".to_string(), json!("App"));
    if let Some(registry) = registry {
        options.insert("registry".to_string(), json!(registry));
    }
    options
}

fn blog_generator(output: &Path, registry: Option<&str>) -> Generator {
    let mut generator = Generator::default();
    generator.set_config_classes(ConfigClasses::load(Path::new(BLOG)).unwrap());
    generator.add_extension(DeclarativeExtension::new(options(output, registry)).unwrap());
    generator
}

fn relative(paths: &[PathBuf], root: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

// ============================================================================
// Library
// ============================================================================

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_embedded_classes_are_generated_after_their_parent() {
        let containers = blog_generator(Path::new("build"), None).run().unwrap();
        assert_eq!(
            containers.class_names().collect::<Vec<_>>(),
            ["Model::Article", "Model::Comment"]
        );
        assert!(containers.global().is_empty());
        assert_eq!(containers.definition_count(), 2);
    }

    #[test]
    fn test_registry_lists_every_generated_type() {
        let containers = blog_generator(Path::new("build"), Some("App\\Registry")).run().unwrap();
        let registry = containers.global().get("App\\Registry").unwrap();

        assert!(registry.is_final());
        let classes = registry.property("classes").unwrap();
        assert!(classes.is_static);
        assert_eq!(
            classes.value.get("Model::Comment"),
            Some(&Value::from("App\\Model\\Comment"))
        );
        assert!(registry.method("all").unwrap().is_static);
        assert_eq!(registry.method("get").unwrap().arguments, "$class");

        let text = Dumper::default().dump(registry);
        assert!(text.contains("        'Model::Article' => 'App\\\\Model\\\\Article',\n"));
    }

    #[test]
    fn test_process_writes_one_file_per_definition() {
        let dir = tempfile::tempdir().unwrap();
        let generator = blog_generator(dir.path(), Some("App\\Registry"));

        let report = generator.process(Dumper::default()).unwrap();
        assert_eq!(
            relative(&report.written, dir.path()),
            ["App/Registry.php", "App/Model/Article.php", "App/Model/Comment.php"]
        );

        let again = generator.process(Dumper::default()).unwrap();
        assert!(again.written.is_empty());
        assert_eq!(again.skipped.len(), 3);
    }

    #[test]
    fn test_unknown_member_key_is_rejected() {
        let mut generator = Generator::default();
        generator.set_config_classes(ConfigClasses::load(Path::new("tests/fixtures/invalid.yml")).unwrap());
        generator.add_extension(DeclarativeExtension::new(options(Path::new("build"), None)).unwrap());

        let err = generator.run().unwrap_err();
        assert!(matches!(err, Error::Extension { ref extension, .. } if extension == "declarative"));
        assert!(err.to_string().contains("unknown key `nullable`"));
    }

    #[test]
    fn test_missing_output_option_is_reported() {
        let err = DeclarativeExtension::new(Map::new()).err().unwrap();
        assert!(matches!(err, Error::MissingOptions { ref names, .. } if names == &["output"]));
    }
}

// ============================================================================
// CLI
// ============================================================================

#[cfg(test)]
mod cli_tests {
    use super::*;

    fn run(args: &[&str]) -> Result<ExitCode, classforge::cli::CliError> {
        let mut argv = vec!["classforge"];
        argv.extend_from_slice(args);
        execute(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_generate_command_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_string_lossy().into_owned();

        let code = run(&["generate", BLOG, "-o", &out, "--namespace", "App"]).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let article = fs::read_to_string(dir.path().join("App/Model/Article.php")).unwrap();
        assert!(article.contains("protected $slug = 'draft';"));
        assert!(dir.path().join("App/Model/Comment.php").exists());
    }

    #[test]
    fn test_check_command_succeeds_on_valid_config() {
        assert_eq!(run(&["check", BLOG]).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_cycle_is_reported_as_failure() {
        let err = run(&["check", "tests/fixtures/cycle.yml"]).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("expansion cycle"));
        assert!(err.message.contains("Model::Leaf"));
    }

    #[test]
    fn test_traversal_output_is_refused() {
        let err = run(&["generate", BLOG, "-o", "../escape"]).unwrap_err();
        assert!(err.message.contains("path traversal"));
    }
}
