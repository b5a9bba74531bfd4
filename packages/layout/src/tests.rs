use crate::*;
use sprout_language::types::{component, js, literals};
use sprout_language::{
    Arity, LanguageResult, LayoutComponent, LayoutComponentType, NodeCategory, NodeId, NodeLayout,
    NodeTree, Registry, SerializedNode, TypeRegistration,
};
use sprout_syntax::js::BinaryOperator;
use std::sync::Arc;

fn tree() -> NodeTree {
    NodeTree::new(Registry::standard().expect("Failed to build registry"))
}

/// `function Foo(title)` style component with one statement in its body.
fn component_file(tree: &mut NodeTree) -> (NodeId, NodeId) {
    let file = js::file::create(tree);
    let declaration = component::declaration::create(tree);
    let name = js::declared_identifier::create(tree, "Foo");
    tree.append(declaration, "identifier", name).unwrap();
    let prop = component::property::create(tree, "title");
    tree.append(declaration, "props", prop).unwrap();
    let hi = literals::create_string(tree, "hi");
    let statement = js::expression::wrap(tree, hi).unwrap();
    tree.append(declaration, "body", statement).unwrap();
    tree.append(file, "body", declaration).unwrap();
    (file, declaration)
}

#[test]
fn test_default_options() {
    let options = LayoutOptions::default();
    assert_eq!(options.row_height, 30.0);
    assert_eq!(options.string_width("abc"), 24.0);
    assert_eq!(options.inline_spacing(true), options.node_inline_spacing_small);
}

#[test]
fn test_empty_file_has_only_placeholder() {
    let mut tree = tree();
    let file = js::file::create(&mut tree);

    let result = layout(&tree, file, &LayoutOptions::default()).expect("Failed to lay out");
    assert_eq!(result.lines.len(), 1);
    let line = &result.lines[0];
    assert!(line.is_placeholder());
    assert!(line.cursor_anchor);
    assert_eq!(line.index, 0);
    assert_eq!(line.group, "body");
    // top-level indent plus the cursor gap
    assert_eq!(line.indent, 32.0);
}

#[test]
fn test_token_list_accumulates_width() {
    let mut tree = tree();
    let file = js::file::create(&mut tree);
    let expression = js::expression::create(&mut tree);
    for token in [
        literals::create_number(&mut tree, 1.0),
        js::binary_operator::create(&mut tree, BinaryOperator::Add),
        literals::create_number(&mut tree, 2.0),
    ] {
        tree.append(expression, "tokens", token).unwrap();
    }
    tree.append(file, "body", expression).unwrap();

    let result = layout(&tree, file, &LayoutOptions::default()).expect("Failed to lay out");
    assert_eq!(result.lines.len(), 2);

    let line = &result.lines[0];
    assert!(line.cursor_anchor, "token lists own their starting cursor");
    assert_eq!(line.indent, 24.0);

    let inline = line.node.as_ref().expect("expression line");
    assert_eq!(inline.node, expression);
    let tokens = inline.components[0].child_set.as_ref().expect("token child set");
    assert_eq!(tokens.kind, LayoutComponentType::ChildSetTokenList);
    let xs: Vec<f64> = tokens.nodes.iter().map(|n| n.x).collect();
    assert_eq!(xs, vec![32.0, 56.0, 74.0]);
    // small layout on the operator
    assert_eq!(tokens.nodes[1].line_width(), 10.0);
    assert_eq!(tokens.width, 74.0);
    assert_eq!(line.width(), 74.0);
}

#[test]
fn test_block_tree_and_inline_components() {
    let mut tree = tree();
    let (file, declaration) = component_file(&mut tree);

    let result = layout(&tree, file, &LayoutOptions::default()).expect("Failed to lay out");
    let positions: Vec<(NodeId, &str, usize, f64)> = result
        .lines
        .iter()
        .map(|l| (l.parent, l.group, l.index, l.indent))
        .collect();
    assert_eq!(
        positions,
        vec![
            (file, "body", 0, 32.0),
            (declaration, "body", 0, 62.0),
            (declaration, "body", 1, 70.0),
            (file, "body", 1, 32.0),
        ]
    );

    let inline = result.lines[0].node.as_ref().unwrap();
    let widths: Vec<f64> = inline.components.iter().map(|c| c.width).collect();
    // keyword, inline identifier, tree lead + first prop
    assert_eq!(widths, vec![80.0, 32.0, 82.0]);
    let props = inline.components[2].child_set.as_ref().unwrap();
    assert_eq!(props.x, 178.0);
    assert_eq!(props.nodes.len(), 1);
}

#[test]
fn test_tree_children_after_first_get_own_lines() {
    let mut tree = tree();
    let (file, declaration) = component_file(&mut tree);
    let second = component::property::create(&mut tree, "size");
    tree.append(declaration, "props", second).unwrap();

    let result = layout(&tree, file, &LayoutOptions::default()).expect("Failed to lay out");
    assert_eq!(result.lines.len(), 5);
    let line = &result.lines[1];
    assert_eq!((line.parent, line.group, line.index), (declaration, "props", 1));
    assert_eq!(line.indent, 186.0);
    assert!(!line.cursor_anchor);
}

#[test]
fn test_vertical_coordinates_accumulate() {
    let mut tree = tree();
    let (file, _) = component_file(&mut tree);

    let result = layout(&tree, file, &LayoutOptions::default()).unwrap();
    let ys: Vec<f64> = result.lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![0.0, 30.0, 60.0, 90.0]);
    assert_eq!(result.height(), 120.0);
}

#[test]
fn test_line_at_y_resolves_position() {
    let mut tree = tree();
    let (file, declaration) = component_file(&mut tree);
    let statement = tree.first_child(declaration, "body").unwrap();

    let result = layout(&tree, file, &LayoutOptions::default()).unwrap();
    let position = result.position_at_y(45.0).expect("line under y");
    assert_eq!(position.parent, declaration);
    assert_eq!(position.group, "body");
    assert_eq!(position.index, 0);
    assert_eq!(position.node, Some(statement));

    assert_eq!(result.line_at_y(30.0).map(|l| l.y), Some(30.0));
    assert!(result.position_at_y(95.0).unwrap().node.is_none());
    assert!(result.line_at_y(-1.0).is_none());
    assert!(result.line_at_y(120.0).is_none());
}

#[test]
fn test_line_for_inline_node() {
    let mut tree = tree();
    let (file, declaration) = component_file(&mut tree);
    let prop = tree.first_child(declaration, "props").unwrap();

    let result = layout(&tree, file, &LayoutOptions::default()).unwrap();
    let line = result.line_for_node(prop).expect("prop is drawn inline");
    assert_eq!(line.node.as_ref().unwrap().node, declaration);
}

#[test]
fn test_missing_root_is_an_error() {
    let empty = tree();
    let mut other = tree();
    let file = js::file::create(&mut other);
    assert!(layout(&empty, file, &LayoutOptions::default()).is_err());
}

#[test]
fn test_custom_options_scale_geometry() {
    let mut tree = tree();
    let (file, _) = component_file(&mut tree);
    let options = LayoutOptions {
        row_height: 20.0,
        indent: 40.0,
        ..LayoutOptions::default()
    };

    let result = layout(&tree, file, &options).unwrap();
    assert_eq!(result.height(), 80.0);
    // component line at 24 + 8, its body one wider step in
    assert_eq!(result.lines[0].indent, 32.0);
    assert_eq!(result.lines[1].indent, 72.0);
}

const TRAIL: &str = "TRAIL";

fn create_trail(tree: &mut NodeTree) -> NodeId {
    let id = tree.create_node(TRAIL);
    tree.add_child_group(id, "path", Arity::Many, NodeCategory::DeclaredIdentifier);
    id
}

fn deserialize_trail(tree: &mut NodeTree, _serialized: &SerializedNode) -> LanguageResult<NodeId> {
    Ok(create_trail(tree))
}

/// Standard types plus a statement drawn as `go` followed by a breadcrumb group.
fn trail_registry() -> Arc<Registry> {
    let mut builder = Registry::builder();
    sprout_language::types::register_all(&mut builder).unwrap();
    builder
        .register_type(
            TypeRegistration::new(
                TRAIL,
                deserialize_trail,
                NodeLayout::new(vec![
                    LayoutComponent::keyword("go"),
                    LayoutComponent::breadcrumbs("path"),
                ]),
            )
            .with_child_set("path", NodeCategory::DeclaredIdentifier),
        )
        .unwrap();
    builder.register_category_member(TRAIL, NodeCategory::Statement);
    Arc::new(builder.build().expect("Failed to build registry"))
}

#[test]
fn test_breadcrumbs_draw_only_first_child() {
    let mut tree = NodeTree::new(trail_registry());
    let file = js::file::create(&mut tree);
    let trail = create_trail(&mut tree);
    tree.append(file, "body", trail).unwrap();

    let result = layout(&tree, file, &LayoutOptions::default()).unwrap();
    // empty breadcrumbs draw nothing
    assert_eq!(result.lines[0].node.as_ref().unwrap().components.len(), 1);

    let first = js::declared_identifier::create(&mut tree, "a");
    let second = js::declared_identifier::create(&mut tree, "bb");
    tree.append(trail, "path", first).unwrap();
    tree.append(trail, "path", second).unwrap();

    let result = layout(&tree, file, &LayoutOptions::default()).unwrap();
    assert_eq!(result.lines.len(), 2);
    let inline = result.lines[0].node.as_ref().unwrap();
    assert_eq!(result.lines[0].indent, 32.0);

    let crumbs = inline.components[1].child_set.as_ref().expect("breadcrumb child set");
    assert_eq!(crumbs.kind, LayoutComponentType::ChildSetBreadcrumbs);
    assert_eq!(crumbs.nodes.len(), 1);
    assert_eq!(crumbs.nodes[0].node, first);
    // after the `go` keyword
    assert_eq!(crumbs.x, 56.0);
    assert_eq!(crumbs.width, 16.0);
    assert!(result.line_for_node(second).is_none());
}
