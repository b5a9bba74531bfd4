use crate::suggestion::sanitize_identifier;
use crate::types::{js, literals};
use crate::*;
use sprout_syntax::js::{BinaryOperator, Expression};
use std::sync::Arc;

fn registry() -> Arc<Registry> {
    Registry::standard().expect("Failed to build registry")
}

/// `<file> <expression> <tokens...>` with the expression attached to the file body.
fn expression_in_file(tree: &mut NodeTree) -> (NodeId, NodeId) {
    let file = js::file::create(tree);
    let expression = js::expression::create(tree);
    tree.append(file, "body", expression).unwrap();
    (file, expression)
}

#[test]
fn test_registry_rejects_duplicate_type() {
    let mut builder = Registry::builder();
    types::register_all(&mut builder).unwrap();
    let result = types::literals::register(&mut builder);
    assert!(
        matches!(result, Err(LanguageError::DuplicateType(name)) if name == literals::STRING_LITERAL)
    );
}

#[test]
fn test_registry_lookup_unknown_type() {
    let registry = registry();
    let err = registry.lookup("NOT_A_TYPE").unwrap_err();
    assert!(matches!(err, LanguageError::UnregisteredType(_)));
}

#[test]
fn test_roots_are_not_category_members() {
    let registry = registry();
    for root in types::ROOT_TYPES {
        assert!(registry.is_registered(root));
        assert!(registry.categories_of(root).is_empty(), "{} is a member", root);
    }
}

#[test]
fn test_registry_build_rejects_unregistered_member() {
    let mut builder = Registry::builder();
    builder.register_category_member("GHOST", NodeCategory::Statement);
    assert!(matches!(
        builder.build(),
        Err(LanguageError::UnregisteredType(_))
    ));
}

#[test]
fn test_insert_sets_parent_ref_and_reindexes() {
    let mut tree = NodeTree::new(registry());
    let (_, expression) = expression_in_file(&mut tree);
    let a = literals::create_number(&mut tree, 1.0);
    let b = literals::create_number(&mut tree, 2.0);
    tree.append(expression, "tokens", a).unwrap();
    tree.insert(expression, "tokens", 0, b).unwrap();

    assert_eq!(tree.children(expression, "tokens"), &[b, a]);
    assert_eq!(tree.parent(a).unwrap().index, 1);
    assert_eq!(tree.parent(b).unwrap().index, 0);
    assert_eq!(tree.parent(b).unwrap().group, "tokens");

    let removed = tree.remove(expression, "tokens", 0).unwrap();
    assert_eq!(removed, b);
    assert!(tree.parent(b).is_none());
    assert_eq!(tree.parent(a).unwrap().index, 0);
}

#[test]
fn test_insert_rejects_attached_node_and_bad_index() {
    let mut tree = NodeTree::new(registry());
    let (_, expression) = expression_in_file(&mut tree);
    let a = literals::create_number(&mut tree, 1.0);
    tree.append(expression, "tokens", a).unwrap();

    assert!(matches!(
        tree.append(expression, "tokens", a),
        Err(LanguageError::AlreadyAttached(_))
    ));

    let b = literals::create_number(&mut tree, 2.0);
    assert!(matches!(
        tree.insert(expression, "tokens", 5, b),
        Err(LanguageError::IndexOutOfBounds { index: 5, len: 1, .. })
    ));
}

#[test]
fn test_insert_rejects_cycle() {
    let mut tree = NodeTree::new(registry());
    let function = js::inline_function::create(&mut tree);
    let outer = js::expression::wrap(&mut tree, function).unwrap();
    let err = tree.append(function, "body", outer).unwrap_err();
    assert!(matches!(err, LanguageError::CycleDetected { .. }));
}

#[test]
fn test_set_property_must_be_declared() {
    let mut tree = NodeTree::new(registry());
    let id = js::declared_identifier::create(&mut tree, "a");
    tree.set_property(id, "identifier", "b").unwrap();
    assert_eq!(tree.property_str(id, "identifier"), "b");

    let err = tree.set_property(id, "colour", "red").unwrap_err();
    assert!(matches!(err, LanguageError::UndeclaredProperty { .. }));
}

#[test]
fn test_move_node_within_group() {
    let mut tree = NodeTree::new(registry());
    let (_, expression) = expression_in_file(&mut tree);
    let ids: Vec<NodeId> = (0..3)
        .map(|i| literals::create_number(&mut tree, i as f64))
        .collect();
    for id in &ids {
        tree.append(expression, "tokens", *id).unwrap();
    }
    tree.move_node(ids[0], expression, "tokens", 3).unwrap();
    assert_eq!(tree.children(expression, "tokens"), &[ids[1], ids[2], ids[0]]);
    for (index, id) in tree.children(expression, "tokens").iter().enumerate() {
        assert_eq!(tree.parent(*id).unwrap().index, index);
    }
}

#[test]
fn test_failed_move_restores_position() {
    let mut tree = NodeTree::new(registry());
    let (file, expression) = expression_in_file(&mut tree);
    let token = literals::create_number(&mut tree, 1.0);
    tree.append(expression, "tokens", token).unwrap();

    // A literal is not a statement.
    let err = tree.move_node(token, file, "body", 0).unwrap_err();
    assert!(err.is_schema_violation());
    assert_eq!(tree.parent(token).unwrap().node, expression);
    assert_eq!(tree.child_count(expression, "tokens"), 1);
}

#[test]
fn test_discard_requires_detached_node() {
    let mut tree = NodeTree::new(registry());
    let (_, expression) = expression_in_file(&mut tree);
    let token = literals::create_number(&mut tree, 1.0);
    tree.append(expression, "tokens", token).unwrap();
    assert!(tree.discard(expression).is_err());

    let removed = tree.remove(expression, "tokens", 0).unwrap();
    tree.discard(removed).unwrap();
    assert!(!tree.contains(token));
}

#[test]
fn test_graft_moves_subtree_between_trees() {
    let registry = registry();
    let mut source = NodeTree::new(registry.clone());
    let expression = js::expression::create(&mut source);
    let token = literals::create_string(&mut source, "x");
    source.append(expression, "tokens", token).unwrap();

    let mut target = NodeTree::new(registry);
    let grafted = target.graft(source, expression).unwrap();
    assert_eq!(target.node_type(grafted), Some(js::SPLOOT_EXPRESSION));
    let child = target.first_child(grafted, "tokens").unwrap();
    assert_eq!(target.property_str(child, "value"), "x");
    assert_eq!(target.parent(child).unwrap().node, grafted);
    assert!(target.parent(grafted).is_none());
}

#[test]
fn test_sanitize_identifier() {
    assert_eq!(sanitize_identifier("count"), "count");
    assert_eq!(sanitize_identifier("my cool var"), "myCoolVar");
    assert_eq!(sanitize_identifier("first-NAME"), "firstName");
    assert_eq!(sanitize_identifier("2fast"), "_2fast");
    assert_eq!(sanitize_identifier(""), "_");
    // non-ASCII digits and letters are word breaks
    assert_eq!(sanitize_identifier("\u{663}x"), "X");
    assert_eq!(sanitize_identifier("caf\u{e9} bar"), "cafBar");
}

#[test]
fn test_token_assembly_respects_precedence() {
    let mut tree = NodeTree::new(registry());
    let (_, expression) = expression_in_file(&mut tree);
    let tokens = [
        literals::create_number(&mut tree, 1.0),
        js::binary_operator::create(&mut tree, BinaryOperator::Add),
        literals::create_number(&mut tree, 2.0),
        js::binary_operator::create(&mut tree, BinaryOperator::Multiply),
        literals::create_number(&mut tree, 3.0),
    ];
    for token in tokens {
        tree.append(expression, "tokens", token).unwrap();
    }

    let generated = generate_expression(&tree, expression).unwrap().unwrap();
    assert_eq!(
        generated,
        Expression::binary(
            BinaryOperator::Add,
            Expression::Number(1.0),
            Expression::binary(
                BinaryOperator::Multiply,
                Expression::Number(2.0),
                Expression::Number(3.0)
            )
        )
    );
}

#[test]
fn test_token_assembly_is_left_associative() {
    let mut tree = NodeTree::new(registry());
    let (_, expression) = expression_in_file(&mut tree);
    let tokens = [
        literals::create_number(&mut tree, 8.0),
        js::binary_operator::create(&mut tree, BinaryOperator::Subtract),
        literals::create_number(&mut tree, 2.0),
        js::binary_operator::create(&mut tree, BinaryOperator::Subtract),
        literals::create_number(&mut tree, 1.0),
    ];
    for token in tokens {
        tree.append(expression, "tokens", token).unwrap();
    }
    let code = generate_code_string(&tree, expression, &GenerateOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(code, "8 - 2 - 1");
}

#[test]
fn test_token_assembly_drops_dangling_operators() {
    let mut tree = NodeTree::new(registry());
    let (_, expression) = expression_in_file(&mut tree);
    let tokens = [
        js::binary_operator::create(&mut tree, BinaryOperator::Or),
        literals::create_number(&mut tree, 4.0),
        js::binary_operator::create(&mut tree, BinaryOperator::Add),
    ];
    for token in tokens {
        tree.append(expression, "tokens", token).unwrap();
    }
    let generated = generate_expression(&tree, expression).unwrap();
    assert_eq!(generated, Some(Expression::Number(4.0)));
}

#[test]
fn test_token_assembly_keeps_first_of_adjacent_operands() {
    let mut tree = NodeTree::new(registry());
    let (file, expression) = expression_in_file(&mut tree);
    let tokens = [
        literals::create_number(&mut tree, 1.0),
        literals::create_number(&mut tree, 2.0),
        js::binary_operator::create(&mut tree, BinaryOperator::Add),
        literals::create_number(&mut tree, 3.0),
        literals::create_string(&mut tree, "x"),
    ];
    for token in tokens {
        tree.append(expression, "tokens", token).unwrap();
    }

    let code = generate_code_string(&tree, file, &GenerateOptions::default())
        .expect("Failed to generate")
        .unwrap();
    assert_eq!(code, "1 + 3;\n");
}

#[test]
fn test_empty_expression_is_a_generation_gap() {
    let mut tree = NodeTree::new(registry());
    let (file, expression) = expression_in_file(&mut tree);
    assert_eq!(generate(&tree, expression).unwrap(), None);

    let code = generate_code_string(&tree, file, &GenerateOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(code, "");
}

#[test]
fn test_clean_prunes_empty_init() {
    let mut tree = NodeTree::new(registry());
    let file = js::file::create(&mut tree);
    let declaration = js::variable_declaration::create(&mut tree);
    tree.append(file, "body", declaration).unwrap();
    let name = js::declared_identifier::create(&mut tree, "total");
    tree.append(declaration, "identifier", name).unwrap();
    let value = literals::create_number(&mut tree, 3.0);
    let init = js::expression::wrap(&mut tree, value).unwrap();
    tree.append(declaration, "init", init).unwrap();

    let code = generate_code_string(&tree, file, &GenerateOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(code, "let total = 3;\n");

    let token = tree.remove(init, "tokens", 0).unwrap();
    tree.discard(token).unwrap();
    tree.clean(init);

    assert_eq!(tree.child_count(declaration, "init"), 0);
    assert!(!tree.contains(init));
    assert_eq!(tree.child_count(file, "body"), 1);
    let code = generate_code_string(&tree, file, &GenerateOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(code, "let total;\n");
}

#[test]
fn test_visible_definitions_walk_upward() {
    let mut tree = NodeTree::new(registry());
    let file = js::file::create(&mut tree);

    let declaration = js::variable_declaration::create(&mut tree);
    let name = js::declared_identifier::create(&mut tree, "outer");
    tree.append(declaration, "identifier", name).unwrap();
    tree.append(file, "body", declaration).unwrap();

    let function = js::inline_function::create(&mut tree);
    let param = js::declared_identifier::create(&mut tree, "item");
    tree.append(function, "params", param).unwrap();
    let holder = js::expression::wrap(&mut tree, function).unwrap();
    tree.append(file, "body", holder).unwrap();

    let names: Vec<String> = visible_definitions(&tree, function, "body", 0)
        .into_iter()
        .map(|definition| definition.name)
        .collect();
    assert_eq!(names, vec!["item".to_string(), "outer".to_string()]);

    // Declarations after the position are not visible.
    assert!(visible_definitions(&tree, file, "body", 0).is_empty());
}

#[test]
fn test_property_value_serializes_untagged() {
    let json = serde_json::to_string(&PropertyValue::from("hi")).unwrap();
    assert_eq!(json, "\"hi\"");
    let value: PropertyValue = serde_json::from_str("2.5").unwrap();
    assert_eq!(value.as_f64(), Some(2.5));
    let value: PropertyValue = serde_json::from_str("true").unwrap();
    assert_eq!(value.as_bool(), Some(true));
}

#[test]
fn test_html_tag_content_model() {
    use crate::html_tags::{is_tag_valid_with_parent, valid_child_tags};
    assert!(is_tag_valid_with_parent("li", "ul"));
    assert!(!is_tag_valid_with_parent("div", "ul"));
    assert!(!is_tag_valid_with_parent("div", "p"));
    assert!(is_tag_valid_with_parent("span", "p"));
    assert!(is_tag_valid_with_parent("script", "body"));
    assert!(!is_tag_valid_with_parent("div", "img"));

    let head: Vec<&str> = valid_child_tags("head").iter().map(|t| t.tag).collect();
    assert!(head.contains(&"title"));
    assert!(!head.contains(&"style"), "style has its own node type");
    assert!(!head.contains(&"div"));
}
