//! Structural properties that hold for every registered node type.

use sprout_language::types::{html, js, literals};
use sprout_language::*;
use std::sync::Arc;

fn registry() -> Arc<Registry> {
    Registry::standard().expect("Failed to build registry")
}

/// A bare instance of any registered type.
fn instance(tree: &mut NodeTree, node_type: &str) -> NodeId {
    let mut serialized = SerializedNode::new(node_type);
    if node_type == js::BINARY_OPERATOR {
        serialized = serialized.with_property("operator", "+");
    }
    deserialize(tree, &serialized).expect("Failed to instantiate type")
}

/// Some registered type with a child group of `category`, and that group's name.
fn holder_for(registry: &Registry, category: NodeCategory) -> Option<(&'static str, &'static str)> {
    registry.type_names().into_iter().find_map(|type_name| {
        let registration = registry.lookup(type_name).ok()?;
        registration
            .child_sets
            .iter()
            .find(|(_, group_category)| *group_category == category)
            .map(|(group, _)| (type_name, *group))
    })
}

/// HTML document with a script holding a component and a variable.
fn sample_document(tree: &mut NodeTree) -> NodeId {
    let document = html::document::create(tree);
    let root = html::element::create(tree, "html");
    tree.append(document, "body", root).unwrap();
    let body = html::element::create(tree, "body");
    tree.append(root, "content", body).unwrap();

    let class = html::attribute::create(tree, "class");
    let class_value = literals::create_string(tree, "main");
    tree.append(class, "value", class_value).unwrap();
    tree.append(body, "attributes", class).unwrap();
    let text = literals::create_string(tree, "Hello & welcome");
    tree.append(body, "content", text).unwrap();

    let script = html::script_element::create(tree);
    tree.append(body, "content", script).unwrap();

    let declaration = js::variable_declaration::create(tree);
    let name = js::declared_identifier::create(tree, "count");
    tree.append(declaration, "identifier", name).unwrap();
    let init = js::expression::create(tree);
    for token in [
        literals::create_number(tree, 1.0),
        js::binary_operator::create(tree, sprout_syntax::js::BinaryOperator::Add),
        literals::create_number(tree, 2.5),
    ] {
        tree.append(init, "tokens", token).unwrap();
    }
    tree.append(declaration, "init", init).unwrap();
    tree.append(script, "content", declaration).unwrap();

    let component = types::component::declaration::create(tree);
    let component_name = js::declared_identifier::create(tree, "Card");
    tree.append(component, "identifier", component_name).unwrap();
    let prop = types::component::property::create(tree, "title");
    tree.append(component, "props", prop).unwrap();
    let call = js::call_variable::create(tree, "render");
    let reference = js::variable_reference::create(tree, "title");
    let argument = js::expression::wrap(tree, reference).unwrap();
    tree.append(call, "arguments", argument).unwrap();
    let statement = js::expression::wrap(tree, call).unwrap();
    tree.append(component, "body", statement).unwrap();
    tree.append(script, "content", component).unwrap();

    document
}

#[test]
fn test_serialize_round_trip() {
    let registry = registry();
    let mut tree = NodeTree::new(registry.clone());
    let document = sample_document(&mut tree);

    let serialized = serialize(&tree, document).unwrap();
    let json = serialized.to_json().unwrap();

    let mut restored = NodeTree::new(registry);
    let parsed = SerializedNode::from_json(&json).unwrap();
    let root = deserialize(&mut restored, &parsed).unwrap();

    assert_eq!(serialize(&restored, root).unwrap(), serialized);
    assert_eq!(restored.descendants(root).len(), tree.descendants(document).len());
}

#[test]
fn test_serialized_format_field_names() {
    let registry = registry();
    let mut tree = NodeTree::new(registry);
    let name = js::declared_identifier::create(&mut tree, "count");
    let json: serde_json::Value =
        serde_json::from_str(&serialize(&tree, name).unwrap().to_json().unwrap()).unwrap();
    assert_eq!(json["type"], "DECLARED_IDENTIFIER");
    assert_eq!(json["properties"]["identifier"], "count");
    assert!(json["childSets"].is_object());
}

#[test]
fn test_deserialize_unknown_type_fails() {
    let mut tree = NodeTree::new(registry());
    let err = deserialize(&mut tree, &SerializedNode::new("MYSTERY")).unwrap_err();
    assert!(matches!(err, LanguageError::UnregisteredType(name) if name == "MYSTERY"));
}

#[test]
fn test_category_enforcement_for_every_type() {
    let registry = registry();
    let mut checked = 0;
    for category in NodeCategory::ALL {
        let Some((holder_type, group)) = holder_for(&registry, category) else {
            continue;
        };
        for node_type in registry.type_names() {
            let mut tree = NodeTree::new(registry.clone());
            let holder = instance(&mut tree, holder_type);
            let child = instance(&mut tree, node_type);
            let result = tree.append(holder, group, child);
            if registry.is_member(category, node_type) {
                assert!(result.is_ok(), "{} should fit {}", node_type, category);
            } else {
                let err = result.expect_err("non-member was inserted");
                assert!(
                    matches!(err, LanguageError::Schema(SchemaViolation::CategoryMismatch { .. })),
                    "{} into {}: {}",
                    node_type,
                    category,
                    err
                );
                assert_eq!(tree.child_count(holder, group), 0);
            }
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_single_group_arity() {
    let mut tree = NodeTree::new(registry());
    let declaration = js::variable_declaration::create(&mut tree);
    let first = js::declared_identifier::create(&mut tree, "a");
    let second = js::declared_identifier::create(&mut tree, "b");
    tree.append(declaration, "identifier", first).unwrap();

    let err = tree.append(declaration, "identifier", second).unwrap_err();
    assert!(matches!(
        err,
        LanguageError::Schema(SchemaViolation::ArityViolation { .. })
    ));

    tree.remove(declaration, "identifier", 0).unwrap();
    tree.append(declaration, "identifier", second).unwrap();
    assert_eq!(tree.first_child(declaration, "identifier"), Some(second));
}

#[test]
fn test_generation_is_idempotent() {
    let mut tree = NodeTree::new(registry());
    let document = sample_document(&mut tree);
    let options = GenerateOptions::default();
    for id in tree.descendants(document) {
        let first = generate(&tree, id).unwrap();
        let second = generate(&tree, id).unwrap();
        assert_eq!(first, second);
    }
    let first = generate_code_string(&tree, document, &options).unwrap();
    let second = generate_code_string(&tree, document, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sample_document_markup() {
    let mut tree = NodeTree::new(registry());
    let document = sample_document(&mut tree);
    let html = generate_code_string(&tree, document, &GenerateOptions::default())
        .unwrap()
        .unwrap();
    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>\n<html><body class=\"main\">"));
    assert!(html.contains("Hello &amp; welcome"));
    assert!(html.contains("<script>let count = 1 + 2.5;\n"));
    assert!(html.contains("export function Card(props) {\n  render(title);\n}\n</script>"));
}

#[test]
fn test_every_suggestion_is_a_category_member() {
    let registry = registry();
    for category in NodeCategory::ALL {
        let Some((holder_type, group)) = holder_for(&registry, category) else {
            continue;
        };
        let mut tree = NodeTree::new(registry.clone());
        let holder = instance(&mut tree, holder_type);
        for text in ["", "a", "my value", "42", "\"quoted\""] {
            let position = InsertPosition {
                tree: &tree,
                parent: holder,
                group,
                index: 0,
            };
            let ctx = SuggestionContext::at(&registry, position);
            for suggestion in suggest(&ctx, category, text) {
                assert!(
                    registry.is_member(category, suggestion.node_type()),
                    "{} offered for {}",
                    suggestion.node_type(),
                    category
                );
            }
        }
    }
}

#[test]
fn test_accepted_suggestions_insert_cleanly() {
    let registry = registry();
    for category in NodeCategory::ALL {
        let Some((holder_type, group)) = holder_for(&registry, category) else {
            continue;
        };
        let suggestions = {
            let mut scratch = NodeTree::new(registry.clone());
            let holder = instance(&mut scratch, holder_type);
            let ctx = SuggestionContext::at(
                &registry,
                InsertPosition {
                    tree: &scratch,
                    parent: holder,
                    group,
                    index: 0,
                },
            );
            suggest(&ctx, category, "x")
        };
        for suggestion in suggestions {
            let mut tree = NodeTree::new(registry.clone());
            let holder = instance(&mut tree, holder_type);
            let node = tree
                .graft(suggestion.fragment.tree, suggestion.fragment.root)
                .unwrap();
            tree.append(holder, group, node).unwrap();
        }
    }
}
