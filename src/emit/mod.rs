//! Emission driver: writes every definition of a run to its output file.
//!
//! The target of a definition is `<output dir>/<namespace segments>/<Class>.<ext>`. Existing files are left
//! alone unless the definition's output asks for overwrite. Errors abort the walk; files already written stay.

mod fs;

pub use fs::{Filesystem, LocalFilesystem};

use std::path::{Path, PathBuf};

use classforge_core::conventions::{self, FILE_MODE};

use crate::container::Containers;
use crate::definition::Definition;
use crate::dump::Dumper;
use crate::errors::{Error, Result};

/// Outcome of an emission run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub written: Vec<PathBuf>,
    /// Existing files left untouched because overwrite was off.
    pub skipped: Vec<PathBuf>,
}

impl EmitReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Serializes definitions and hands them to a [`Filesystem`].
pub struct Emitter<F = LocalFilesystem> {
    fs: F,
    dumper: Dumper,
}

impl Emitter<LocalFilesystem> {
    pub fn local(dumper: Dumper) -> Self {
        Self::new(LocalFilesystem, dumper)
    }
}

impl<F: Filesystem> Emitter<F> {
    pub fn new(fs: F, dumper: Dumper) -> Self {
        Self { fs, dumper }
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    pub fn dumper(&self) -> &Dumper {
        &self.dumper
    }

    /// Output path of a definition.
    pub fn target_path(&self, definition: &Definition) -> Result<PathBuf> {
        let full = definition.full_class();
        let segments = conventions::type_path_segments(&full);
        let Some((file_stem, dirs)) = segments.split_last() else {
            return Err(Error::InvalidClassName { name: full });
        };
        if !segments.iter().all(|s| conventions::is_safe_path_segment(s)) {
            return Err(Error::InvalidClassName { name: full });
        }

        let mut path = definition.output().dir().to_path_buf();
        path.extend(dirs);
        path.push(format!("{file_stem}.{}", self.dumper.config().file_extension));
        Ok(path)
    }

    /// Write every definition of every container, global first.
    #[tracing::instrument(skip_all, fields(containers = containers.len(), definitions = containers.definition_count()))]
    pub fn emit(&self, containers: &Containers) -> Result<EmitReport> {
        let mut report = EmitReport::default();
        for (unit, container) in containers.iter() {
            for (name, definition) in container.iter() {
                tracing::trace!(unit, definition = name, "emitting");
                self.emit_definition(definition, &mut report)?;
            }
        }
        tracing::debug!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "emission finished"
        );
        Ok(report)
    }

    fn emit_definition(&self, definition: &Definition, report: &mut EmitReport) -> Result<()> {
        let path = self.target_path(definition)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        if !self.fs.exists(dir) {
            self.fs.mkdir_all(dir)?;
        }
        if !self.fs.is_writable(dir) {
            return Err(Error::NotWritable { path: dir.to_path_buf() });
        }

        if self.fs.exists(&path) && !definition.output().overwrite() {
            tracing::debug!(path = %path.display(), "file exists, skipping");
            report.skipped.push(path);
            return Ok(());
        }

        let contents = self.dumper.dump(definition);
        self.fs.write_atomic(&path, contents.as_bytes())?;
        self.fs.set_permissions(&path, FILE_MODE)?;
        report.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Output;

    fn emitter() -> Emitter {
        Emitter::local(Dumper::default())
    }

    #[test]
    fn namespaces_map_to_directories() {
        let def = Definition::new("App\\Model\\Article", Output::new("build"));
        let path = emitter().target_path(&def).unwrap();
        assert_eq!(path, Path::new("build").join("App").join("Model").join("Article.php"));
    }

    #[test]
    fn unsafe_segments_are_rejected() {
        for name in ["App\\..\\Evil", "App\\\\X", "."] {
            let def = Definition::new(name, Output::new("build"));
            let err = emitter().target_path(&def).unwrap_err();
            assert!(matches!(err, Error::InvalidClassName { .. }), "{name}");
        }
    }
}
