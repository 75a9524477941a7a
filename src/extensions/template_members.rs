//! Class extension that adds members rendered from a template.

use serde_json::{Map, Value as Json};

use crate::container::Container;
use crate::errors::{Error, Result};
use crate::extension::{ClassContext, ClassExtension, HandlebarsRenderer, Options, TemplateRenderer};
use crate::extract::{MemberExtractor, template_variables};

/// Renders `template` for the current class and extracts its properties and methods into the definition named
/// by `definition`, which must already be in the class's container.
///
/// Options:
/// - `template` (required): Handlebars source
/// - `definition` (required): container name of the target definition
/// - `variables`: extra template variables, merged over the standard ones
pub struct TemplateMembersExtension {
    options: Options,
    renderer: HandlebarsRenderer,
}

impl TemplateMembersExtension {
    pub const NAME: &'static str = "template_members";

    pub fn new(provided: Map<String, Json>) -> Result<Self> {
        let options = Options::new()
            .define_required("template")
            .define_required("definition")
            .define("variables", Json::Object(Map::new()))
            .resolve(Self::NAME, provided)?;
        Ok(Self {
            options,
            renderer: HandlebarsRenderer::new(),
        })
    }

    pub fn renderer(&self) -> &HandlebarsRenderer {
        &self.renderer
    }

    fn string_option(&self, name: &str) -> Result<&str> {
        self.options
            .get_str(name)?
            .ok_or_else(|| Error::extension(Self::NAME, format!("option `{name}` must be a string")))
    }
}

impl ClassExtension for TemplateMembersExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn class_process(&self, cx: &ClassContext<'_>, container: &mut Container) -> Result<()> {
        let template = self.string_option("template")?;
        let target = self.string_option("definition")?;
        let extra = match self.options.get("variables")? {
            Json::Object(map) => map.clone(),
            Json::Null => Map::new(),
            _ => {
                return Err(Error::extension(Self::NAME, "option `variables` must be a mapping"));
            }
        };

        let variables = template_variables(&self.options, cx, extra);
        let definition = container.get_mut(target)?;
        MemberExtractor::new(&self.renderer).extract(definition, template, &variables)
    }

    fn release(&self) -> Result<()> {
        self.renderer.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigClass, ConfigClasses};
    use crate::definition::{Definition, Output};
    use crate::errors::EntityKind;
    use classforge_syntax::Value;
    use serde_json::json;

    fn options(value: Json) -> Map<String, Json> {
        match value {
            Json::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn both_options_are_required() {
        let err = TemplateMembersExtension::new(Map::new()).err().unwrap();
        assert!(matches!(err, Error::MissingOptions { ref names, .. } if names == &["template", "definition"]));
    }

    #[test]
    fn renders_members_into_the_target_definition() {
        let ext = TemplateMembersExtension::new(options(json!({
            "template": "public ${{config_class.field}} = {{export options.variables.default}};\n\npublic function get{{class}}()\n{\n    return $this->{{config_class.field}};\n}",
            "definition": "Article",
            "variables": {"default": "draft"},
        })))
        .unwrap();

        let mut config_class = ConfigClass::new();
        config_class.insert("field".into(), json!("status"));
        let classes = ConfigClasses::new();
        let cx = ClassContext {
            class: "Article",
            config_class: &config_class,
            config_classes: &classes,
            chain: &[],
        };

        let mut container = Container::new();
        container.set("Article", Definition::new("Article", Output::new("out")));
        ext.class_process(&cx, &mut container).unwrap();

        let def = container.get("Article").unwrap();
        assert_eq!(def.property("status").unwrap().value, Value::from("draft"));
        assert_eq!(def.method("getArticle").unwrap().code, "return $this->status;");

        assert!(ext.renderer().cache().is_active());
        ext.release().unwrap();
        assert!(!ext.renderer().cache().is_active());
    }

    #[test]
    fn missing_target_is_a_lookup_error() {
        let ext = TemplateMembersExtension::new(options(json!({"template": "", "definition": "Nope"}))).unwrap();
        let config_class = ConfigClass::new();
        let classes = ConfigClasses::new();
        let cx = ClassContext {
            class: "A",
            config_class: &config_class,
            config_classes: &classes,
            chain: &[],
        };
        let err = ext.class_process(&cx, &mut Container::new()).unwrap_err();
        assert_eq!(err.missing_name(), Some((EntityKind::Definition, "Nope")));
    }
}
