//! Template rendering for extensions.
//!
//! [`HandlebarsRenderer`] renders in strict mode (undefined variables fail) without HTML escaping. Templates
//! are written to a [`TemplateCache`] directory that is created on first render and removed by
//! [`TemplateRenderer::release`]; the orchestrator calls release on every extension when a run ends.

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason};
use serde_json::Value as Json;
use tempfile::TempDir;

use crate::dump::literal::export_value;
use crate::errors::{Error, Result};

/// External template capability.
pub trait TemplateRenderer {
    /// Render `template` with `variables`; undefined variables are an error.
    fn render(&self, template: &str, variables: &Json) -> Result<String>;

    /// Drop any resources acquired while rendering.
    fn release(&self) -> Result<()> {
        Ok(())
    }
}

/// Lazily created temporary directory holding template sources.
#[derive(Debug, Default)]
pub struct TemplateCache {
    dir: RefCell<Option<TempDir>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a template under `id`, creating the directory on first use. Existing entries are reused.
    pub fn store(&self, id: &str, source: &str) -> Result<PathBuf> {
        let mut slot = self.dir.borrow_mut();
        if slot.is_none() {
            let dir = tempfile::Builder::new()
                .prefix("classforge-templates-")
                .tempdir()
                .map_err(Error::io("create template cache in", &std::env::temp_dir()))?;
            tracing::debug!(dir = %dir.path().display(), "created template cache");
            *slot = Some(dir);
        }
        let Some(dir) = slot.as_ref() else {
            return Err(Error::Template {
                message: "template cache is unavailable".to_string(),
            });
        };

        let path = dir.path().join(format!("{id}.hbs"));
        if !path.exists() {
            fs::write(&path, source).map_err(Error::io("write template", &path))?;
        }
        Ok(path)
    }

    /// Directory currently backing the cache, if one has been created.
    pub fn path(&self) -> Option<PathBuf> {
        self.dir.borrow().as_ref().map(|d| d.path().to_path_buf())
    }

    pub fn is_active(&self) -> bool {
        self.dir.borrow().is_some()
    }

    /// Remove the directory and everything in it. Safe to call repeatedly.
    pub fn release(&self) -> Result<()> {
        let Some(dir) = self.dir.borrow_mut().take() else {
            return Ok(());
        };
        let path = dir.path().to_path_buf();
        dir.close().map_err(Error::io("remove template cache", &path))?;
        tracing::debug!(dir = %path.display(), "released template cache");
        Ok(())
    }
}

/// Strict, non-escaping Handlebars renderer backed by a [`TemplateCache`].
pub struct HandlebarsRenderer {
    registry: RefCell<Handlebars<'static>>,
    cache: TemplateCache,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("export", Box::new(export_helper));
        Self {
            registry: RefCell::new(registry),
            cache: TemplateCache::new(),
        }
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, variables: &Json) -> Result<String> {
        let id = template_id(template);
        let mut registry = self.registry.borrow_mut();
        if !registry.has_template(&id) {
            let path = self.cache.store(&id, template)?;
            register(&mut registry, &id, &path)?;
        }
        Ok(registry.render(&id, variables)?)
    }

    fn release(&self) -> Result<()> {
        self.registry.borrow_mut().clear_templates();
        self.cache.release()
    }
}

fn register(registry: &mut Handlebars<'static>, id: &str, path: &Path) -> Result<()> {
    registry.register_template_file(id, path)?;
    tracing::trace!(template = id, "registered template");
    Ok(())
}

/// Stable identifier for a template source.
fn template_id(source: &str) -> String {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    format!("tpl_{:016x}", hasher.finish())
}

/// `{{export value}}` writes a value as a source-language literal.
fn export_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("export", 0))?;
    if param.is_value_missing() {
        return Err(RenderErrorReason::MissingVariable(param.relative_path().cloned()).into());
    }
    let value = classforge_syntax::Value::from(param.value());
    out.write(&export_value(&value, 1))?;
    Ok(())
}
