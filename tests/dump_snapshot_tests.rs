//! Golden snapshot tests for the dumper
//!
//! These tests dump definitions (built directly, or through the declarative pipeline from a fixture) and
//! compare the text against stored snapshots. This ensures layout changes are reviewed and intentional.
//!
//! Run with: `cargo test --test dump_snapshot_tests`
//! Review changes: `cargo insta review`

use std::path::Path;

use classforge::definition::{Constant, Definition, Method, Output, Property};
use classforge::dump::Dumper;
use classforge::extensions::DeclarativeExtension;
use classforge::pipeline::Generator;
use classforge::{ConfigClasses, Key, TypeKind, Value, Visibility};
use serde_json::json;

fn dump(definition: &Definition) -> String {
    Dumper::default().dump(definition)
}

#[test]
fn test_article_class_dump() {
    let mut def = Definition::new("App\\Model\\Article", Output::new("build"));
    def.set_abstract(true);
    def.set_parent_class("\\App\\Model\\Base\\Article");
    def.add_interface("\\JsonSerializable");
    def.set_doc_comment(Some("Article document.".to_string()));

    def.add_constant(Constant::new("STATUS_DRAFT", "draft"));
    def.add_constant(Constant::new("MAX_TAGS", 10));

    def.add_property(
        Property::new(Visibility::Protected, "title", Value::Null).with_doc_comment("Title of the article."),
    );
    def.add_property(Property::new(
        Visibility::Protected,
        "options",
        Value::array([
            (Key::from("public"), Value::Bool(true)),
            (Key::from("ratio"), Value::Float(0.5)),
            (Key::from("tags"), Value::list([Value::from("a"), Value::from("b")])),
        ]),
    ));
    def.add_property(Property::new(Visibility::Private, "instances", Value::empty_array()).with_static(true));

    def.add_method(
        Method::new(Visibility::Public, "getTitle", "", "return $this->title;").with_doc_comment("Returns the title."),
    );
    def.add_method(Method::new(
        Visibility::Public,
        "setTitle",
        "$title",
        "$this->title = $title;\n\nreturn $this;",
    ));
    def.add_method(Method::new(Visibility::Protected, "validate", "array $data", "").with_abstract(true));

    insta::assert_snapshot!("article_class", dump(&def));
}

#[test]
fn test_interface_dump() {
    let mut def = Definition::new("App\\Contract\\Named", Output::new("build"));
    def.set_type_kind(TypeKind::Interface);
    def.add_constant(Constant::new("PREFIX", "n_"));
    def.add_method(Method::new(Visibility::Public, "getName", "", "return 1;"));
    def.add_method(Method::new(Visibility::Public, "create", "$name", "").with_static(true));

    insta::assert_snapshot!("named_interface", dump(&def));
}

#[test]
fn test_empty_final_class_dump() {
    let mut def = Definition::new("Marker", Output::new("build"));
    def.set_final(true);
    def.set_doc_comment(Some("Marker.".to_string()));

    insta::assert_snapshot!("empty_final_class", dump(&def));
}

#[test]
fn test_declarative_blog_fixture_dump() {
    let config_classes = ConfigClasses::load(Path::new("tests/fixtures/blog.yml")).expect("fixture should load");
    let mut options = serde_json::Map::new();
    options.insert("output".to_string(), json!("build"));
    options.insert("namespace".to_string(), json!("App"));

    let mut generator = Generator::default();
    generator.set_config_classes(config_classes);
    generator.add_extension(DeclarativeExtension::new(options).expect("options should resolve"));
    let containers = generator.run().expect("pipeline should succeed");

    let article = containers
        .get("Model::Article")
        .and_then(|c| c.get("App\\Model\\Article"))
        .expect("article definition");
    insta::assert_snapshot!("blog_article", dump(article));

    let comment = containers
        .get("Model::Comment")
        .and_then(|c| c.get("App\\Model\\Comment"))
        .expect("comment definition");
    insta::assert_snapshot!("blog_comment", dump(comment));
}
