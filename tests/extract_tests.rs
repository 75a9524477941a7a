//! Template member extraction tests
//!
//! Each test renders a member template through the Handlebars renderer and checks the members that end up on
//! the target definition.
//!
//! Run with: `cargo test --test extract_tests`

use classforge::definition::{Definition, Output};
use classforge::extension::{HandlebarsRenderer, TemplateRenderer};
use classforge::extract::MemberExtractor;
use classforge::{Error, ErrorCategory, Key, Value, Visibility};
use serde_json::{Value as Json, json};

fn target() -> Definition {
    Definition::new("App\\Model\\Article", Output::new("build"))
}

fn extract(template: &str, variables: Json) -> (Definition, Result<(), Error>) {
    let renderer = HandlebarsRenderer::new();
    let mut definition = target();
    let result = MemberExtractor::new(&renderer).extract(&mut definition, template, &variables);
    renderer.release().unwrap();
    (definition, result)
}

// ============================================================================
// Properties
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_simple_property() {
        let (def, result) = extract("    public $name = 'bob';\n", json!({}));
        result.unwrap();
        let property = def.property("name").unwrap();
        assert_eq!(property.visibility, Visibility::Public);
        assert_eq!(property.value, Value::from("bob"));
        assert!(!property.is_static);
        assert!(def.methods().is_empty());
    }

    #[test]
    fn test_modifiers_docs_and_defaults() {
        let template = r#"
/**
 * Cached instances.
 */
static private $instances = array();
protected static $count = -3;
private $ratio = 0.25;
public $missing;
PUBLIC $loud = TRUE;
"#;
        let (def, result) = extract(template, json!({}));
        result.unwrap();

        let names: Vec<_> = def.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["instances", "count", "ratio", "missing", "loud"]);

        let instances = def.property("instances").unwrap();
        assert!(instances.is_static);
        assert_eq!(instances.visibility, Visibility::Private);
        assert_eq!(instances.doc_comment.as_deref(), Some("Cached instances."));
        assert_eq!(instances.value, Value::empty_array());

        assert!(def.property("count").unwrap().is_static);
        assert_eq!(def.property("count").unwrap().value, Value::Int(-3));
        assert_eq!(def.property("ratio").unwrap().value, Value::Float(0.25));
        assert!(def.property("missing").unwrap().value.is_null());
        assert_eq!(def.property("loud").unwrap().value, Value::Bool(true));
    }

    #[test]
    fn test_array_default_across_lines() {
        let template = "protected $options = array(\n    'a' => 1,\n    'b' => [2, 3],\n);\n";
        let (def, result) = extract(template, json!({}));
        result.unwrap();
        assert_eq!(
            def.property("options").unwrap().value,
            Value::array([
                (Key::from("a"), Value::Int(1)),
                (Key::from("b"), Value::list([Value::Int(2), Value::Int(3)])),
            ])
        );
    }

    #[test]
    fn test_non_literal_default_is_rejected() {
        let (def, result) = extract("public $when = new DateTime();", json!({}));
        let err = result.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Template);
        assert!(matches!(err, Error::Extract { member: "property", ref name, .. } if name == "when"));
        assert!(def.properties().is_empty());
    }

    #[test]
    fn test_missing_semicolon_is_rejected() {
        let (_, result) = extract("public $a = 1\npublic $b = 2;", json!({}));
        assert!(matches!(result, Err(Error::MalformedMember { member: "property", .. })));
    }
}

// ============================================================================
// Methods
// ============================================================================

#[cfg(test)]
mod method_tests {
    use super::*;

    #[test]
    fn test_bodies_with_nested_braces_strings_and_comments() {
        let template = r#"
/**
 * Title setter.
 */
public function setTitle($title)
{
    if ($title === '}') {
        // a stray } in a comment
        $title = "{braced}";
    }
    $this->title = $title;

    return $this;
}

final public static function create(array $data = array())
{
    return new static($data);
}
"#;
        let (def, result) = extract(template, json!({}));
        result.unwrap();
        assert!(def.properties().is_empty());

        let set_title = def.method("setTitle").unwrap();
        assert_eq!(set_title.arguments, "$title");
        assert_eq!(set_title.doc_comment.as_deref(), Some("Title setter."));
        assert_eq!(
            set_title.code,
            "if ($title === '}') {\n    // a stray } in a comment\n    $title = \"{braced}\";\n}\n$this->title = $title;\n\nreturn $this;"
        );

        let create = def.method("create").unwrap();
        assert!(create.is_final && create.is_static && !create.is_abstract);
        assert_eq!(create.arguments, "array $data = array()");
        assert_eq!(create.code, "return new static($data);");
    }

    #[test]
    fn test_abstract_signature_has_no_body() {
        let (def, result) = extract("abstract protected function validate(array $data);", json!({}));
        result.unwrap();
        let validate = def.method("validate").unwrap();
        assert!(validate.is_abstract);
        assert_eq!(validate.visibility, Visibility::Protected);
        assert!(validate.code.is_empty());
    }

    #[test]
    fn test_promoted_parameters_are_not_properties() {
        let template = "public function __construct(private $id, protected $name)\n{\n}\n";
        let (def, result) = extract(template, json!({}));
        result.unwrap();
        assert!(def.properties().is_empty());
        assert_eq!(def.method("__construct").unwrap().arguments, "private $id, protected $name");
    }

    #[test]
    fn test_promoted_parameters_with_defaults_are_not_properties() {
        let template = "public function __construct(public $name = 'x', protected $tags = array())\n{\n}\n";
        let (def, result) = extract(template, json!({}));
        result.unwrap();
        assert!(def.properties().is_empty());
        assert_eq!(
            def.method("__construct").unwrap().arguments,
            "public $name = 'x', protected $tags = array()"
        );
    }

    #[test]
    fn test_body_with_non_breaking_space_is_kept_verbatim() {
        let (def, result) = extract("public function f()\n{\n a();\n\u{a0}b();\n}", json!({}));
        result.unwrap();
        assert_eq!(def.method("f").unwrap().code, " a();\n\u{a0}b();");
    }

    #[test]
    fn test_unbalanced_body_is_rejected() {
        let (def, result) = extract("public function broken()\n{\n    return 1;\n", json!({}));
        assert!(matches!(result, Err(Error::MalformedMember { member: "method", .. })));
        assert!(def.methods().is_empty());
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[cfg(test)]
mod rendering_tests {
    use super::*;

    #[test]
    fn test_variables_feed_members() {
        let template = r#"{{#each fields}}
protected ${{@key}} = {{export this}};
{{/each}}

public function get{{upper}}()
{
    return $this->{{name}};
}
"#;
        let variables = json!({
            "fields": {"title": "untitled", "tags": ["a", "b"], "views": 0},
            "upper": "Title",
            "name": "title",
        });
        let (def, result) = extract(template, variables);
        result.unwrap();

        let names: Vec<_> = def.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["title", "tags", "views"]);
        assert_eq!(def.property("title").unwrap().value, Value::from("untitled"));
        assert_eq!(
            def.property("tags").unwrap().value,
            Value::list([Value::from("a"), Value::from("b")])
        );
        assert_eq!(def.method("getTitle").unwrap().code, "return $this->title;");
    }

    #[test]
    fn test_undefined_variable_fails_and_adds_nothing() {
        let (def, result) = extract("public $x = {{export nope}};\npublic $y = 1;", json!({}));
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
        assert_eq!(err.category(), ErrorCategory::Template);
        assert!(def.properties().is_empty());
    }

    #[test]
    fn test_renderer_cache_is_released() {
        let renderer = HandlebarsRenderer::new();
        let mut definition = target();
        MemberExtractor::new(&renderer)
            .extract(&mut definition, "public $a = 1;", &json!({}))
            .unwrap();
        let dir = renderer.cache().path().unwrap();
        assert!(dir.exists());

        renderer.release().unwrap();
        assert!(!dir.exists());
        assert!(!renderer.cache().is_active());
    }
}
