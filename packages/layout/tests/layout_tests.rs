use sprout_language::types::{html, js, literals};
use sprout_language::{serialize, NodeId, NodeTree, Registry};
use sprout_layout::{layout, LayoutOptions};

/// Document -> html -> body with an attribute, text and a script.
fn page(tree: &mut NodeTree) -> NodeId {
    let document = html::document::create(tree);
    let root = html::element::create(tree, "html");
    tree.append(document, "body", root).unwrap();
    let body = html::element::create(tree, "body");
    tree.append(root, "content", body).unwrap();

    let class = html::attribute::create(tree, "class");
    let value = literals::create_string(tree, "main");
    tree.append(class, "value", value).unwrap();
    tree.append(body, "attributes", class).unwrap();

    let text = literals::create_string(tree, "Hello");
    tree.append(body, "content", text).unwrap();

    let script = html::script_element::create(tree);
    let declaration = js::variable_declaration::create(tree);
    let name = js::declared_identifier::create(tree, "count");
    tree.append(declaration, "identifier", name).unwrap();
    let one = literals::create_number(tree, 1.0);
    let init = js::expression::wrap(tree, one).unwrap();
    tree.append(declaration, "init", init).unwrap();
    tree.append(script, "content", declaration).unwrap();
    tree.append(body, "content", script).unwrap();

    document
}

#[test]
fn test_layout_is_deterministic() {
    let mut tree = NodeTree::new(Registry::standard().expect("Failed to build registry"));
    let document = page(&mut tree);
    let options = LayoutOptions::default();

    let first = layout(&tree, document, &options).expect("Failed to lay out");
    let second = layout(&tree, document, &options).expect("Failed to lay out");
    assert_eq!(first, second);
}

#[test]
fn test_layout_does_not_mutate_tree() {
    let mut tree = NodeTree::new(Registry::standard().expect("Failed to build registry"));
    let document = page(&mut tree);
    let before = serialize(&tree, document).unwrap();

    layout(&tree, document, &LayoutOptions::default()).unwrap();
    assert_eq!(serialize(&tree, document).unwrap(), before);
}

#[test]
fn test_every_block_group_ends_with_placeholder() {
    let mut tree = NodeTree::new(Registry::standard().expect("Failed to build registry"));
    let document = page(&mut tree);

    let result = layout(&tree, document, &LayoutOptions::default()).unwrap();
    for line in &result.lines {
        println!(
            "{:>5} {:>6} {:?}.{}[{}] {}",
            line.y,
            line.indent,
            line.parent,
            line.group,
            line.index,
            line.node.as_ref().map(|n| n.node_type).unwrap_or("<append>")
        );
    }

    let placeholders: Vec<_> = result.lines.iter().filter(|l| l.is_placeholder()).collect();
    // document body, html content, body content, script content
    assert_eq!(placeholders.len(), 4);
    for line in placeholders {
        assert_eq!(line.index, tree.child_count(line.parent, line.group));
        assert!(line.cursor_anchor);
    }
}

#[test]
fn test_nested_elements_step_in() {
    let mut tree = NodeTree::new(Registry::standard().expect("Failed to build registry"));
    let document = page(&mut tree);
    let options = LayoutOptions::default();

    let result = layout(&tree, document, &options).unwrap();
    let element_indents: Vec<f64> = result
        .lines
        .iter()
        .filter(|l| l.node.as_ref().map(|n| n.node_type) == Some(html::HTML_ELEMENT))
        .map(|l| l.indent)
        .collect();
    assert_eq!(element_indents.len(), 2);
    // one block level plus the cursor gap reserved before non-token lines
    assert_eq!(
        element_indents[1] - element_indents[0],
        options.indent + options.node_inline_spacing
    );
}

#[test]
fn test_layout_serializes_to_json() {
    let mut tree = NodeTree::new(Registry::standard().expect("Failed to build registry"));
    let document = page(&mut tree);

    let result = layout(&tree, document, &LayoutOptions::default()).unwrap();
    let json = serde_json::to_value(&result).expect("Failed to serialize layout");
    let lines = json["lines"].as_array().expect("lines array");
    assert_eq!(lines.len(), result.lines.len());
    assert_eq!(lines[0]["group"], "body");
    assert!(lines[0]["node"]["components"].is_array());
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: LayoutOptions =
        serde_json::from_str(r#"{ "rowHeight": 24, "charWidth": 7.5 }"#).unwrap();
    assert_eq!(options.row_height, 24.0);
    assert_eq!(options.char_width, 7.5);
    assert_eq!(options.indent, LayoutOptions::default().indent);
}
