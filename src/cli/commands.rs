//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use serde_json::{Map, Value as Json};

use crate::config::ConfigClasses;
use crate::container::Containers;
use crate::dump::Dumper;
use crate::emit::Emitter;
use crate::extensions::DeclarativeExtension;
use crate::pipeline::{Generator, GeneratorConfig};

use super::{CliError, CliResult, ExitCode, PipelineArgs};

/// Output directory used when nothing is written.
const DRY_RUN_OUTPUT: &str = ".";

// ============================================================================
// Pipeline setup (shared by every command)
// ============================================================================

/// Load the config file and set up a generator driven by the declarative extension.
fn prepare_generator(args: &PipelineArgs, output: &Path, overwrite: bool) -> CliResult<Generator> {
    let config_classes = ConfigClasses::load(&args.config)?;

    let mut options = Map::new();
    options.insert("output".to_string(), Json::String(output.to_string_lossy().into_owned()));
    options.insert("overwrite".to_string(), Json::Bool(overwrite));
    if let Some(namespace) = &args.namespace {
        options.insert("namespace".to_string(), Json::String(namespace.clone()));
    }
    if let Some(registry) = &args.registry {
        options.insert("registry".to_string(), Json::String(registry.clone()));
    }

    let mut generator = Generator::new(GeneratorConfig::new().with_max_expansion_depth(args.max_depth));
    generator.set_config_classes(config_classes);
    generator.add_extension(DeclarativeExtension::new(options)?);
    Ok(generator)
}

/// Validate the output directory to prevent path traversal attacks.
///
/// This function ensures:
/// - The path doesn't contain `..` components
/// - Absolute paths are allowed but logged
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    for component in out_dir.components() {
        if let std::path::Component::ParentDir = component {
            return Err(CliError::failure(format!(
                "Output directory '{}' contains path traversal (..)",
                out_dir.display()
            )));
        }
    }

    if out_dir.is_absolute() {
        tracing::warn!(
            "Using absolute output path: {}. Consider using a relative path.",
            out_dir.display()
        );
    }

    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

/// Run the pipeline and write every definition under `output`.
pub fn generate(args: &PipelineArgs, output: &Path, overwrite: bool) -> CliResult<ExitCode> {
    validate_output_dir(output)?;
    let generator = prepare_generator(args, output, overwrite)?;
    let containers = generator.run()?;
    let report = generator.emit(&containers, &Emitter::local(Dumper::default()))?;

    for path in &report.written {
        println!("Generated: {}", path.display());
    }
    for path in &report.skipped {
        println!("Skipped (exists): {}", path.display());
    }
    println!(
        "\n✓ {} file(s) generated, {} skipped",
        report.written.len(),
        report.skipped.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// Print generated definitions, optionally only those of one config class.
pub fn dump(args: &PipelineArgs, class: Option<&str>) -> CliResult<ExitCode> {
    let generator = prepare_generator(args, Path::new(DRY_RUN_OUTPUT), false)?;
    let containers = generator.run()?;
    print!("{}", render(&containers, class)?);
    Ok(ExitCode::SUCCESS)
}

/// Run the pipeline and report unit and definition counts.
pub fn check(args: &PipelineArgs) -> CliResult<ExitCode> {
    let generator = prepare_generator(args, Path::new(DRY_RUN_OUTPUT), false)?;
    let containers = generator.run()?;
    println!(
        "✓ {} config class(es), {} definition(s)",
        containers.len(),
        containers.definition_count()
    );
    Ok(ExitCode::SUCCESS)
}

/// Dumped text of every definition (or those of one unit), separated by blank lines.
fn render(containers: &Containers, class: Option<&str>) -> CliResult<String> {
    let dumper = Dumper::default();
    let units: Vec<_> = match class {
        Some(name) => vec![containers.get(name)?],
        None => containers.iter().map(|(_, container)| container).collect(),
    };

    let files: Vec<String> = units
        .into_iter()
        .flat_map(|container| container.iter())
        .map(|(_, definition)| dumper.dump(definition))
        .collect();
    if files.is_empty() {
        return Err(CliError::failure("No definitions generated"));
    }
    Ok(files.join("\n"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pipeline::DEFAULT_MAX_EXPANSION_DEPTH;
    use std::fs;
    use std::path::PathBuf;

    fn args(config: PathBuf) -> PipelineArgs {
        PipelineArgs {
            config,
            namespace: Some("App".to_string()),
            registry: None,
            max_depth: DEFAULT_MAX_EXPANSION_DEPTH,
        }
    }

    #[test]
    fn test_validate_output_dir_rejects_traversal() {
        assert!(validate_output_dir(Path::new("../outside")).is_err());
        assert!(validate_output_dir(Path::new("build/../../x")).is_err());
        assert!(validate_output_dir(Path::new("build/generated")).is_ok());
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("classes.yml");
        fs::write(&config, "Article:\n  properties:\n    title: ~\n").unwrap();
        let out = dir.path().join("out");

        generate(&args(config), &out, false).unwrap();
        let written = fs::read_to_string(out.join("App").join("Article.php")).unwrap();
        assert!(written.starts_with("<?php\n\nnamespace App;\n\nclass Article\n{\n    public $title;\n"));
    }

    #[test]
    fn test_render_single_class() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("classes.json");
        fs::write(&config, r#"{"A": {}, "B": {"final": true}}"#).unwrap();

        let generator = prepare_generator(&args(config), Path::new("."), false).unwrap();
        let containers = generator.run().unwrap();
        let text = render(&containers, Some("B")).unwrap();
        assert!(text.contains("final class B"));
        assert!(!text.contains("class A"));

        let err = render(&containers, Some("C")).unwrap_err();
        assert!(err.message.contains("container `C` not found"));
    }

    #[test]
    fn test_missing_config_file_fails() {
        let err = check(&args(PathBuf::from("does/not/exist.yml"))).unwrap_err();
        assert!(err.message.contains("failed to read config file"));
    }
}
