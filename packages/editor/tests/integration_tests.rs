//! End-to-end editing: clipboard, suggestions and the render pipeline.

use sprout_editor::{ClipboardData, Cursor, Document, Pipeline, Selection, NODE_DATA_KIND};
use sprout_language::types::{component, html, js, literals};
use sprout_language::{NodeCategory, NodeId, Registry};
use std::path::PathBuf;

fn js_document() -> Document {
    let registry = Registry::standard().expect("Failed to build registry");
    Document::new(PathBuf::from("main.json"), registry, js::JAVASCRIPT_FILE)
        .expect("Failed to create document")
}

fn insert_statement(doc: &mut Document, text: &str) -> NodeId {
    let root = doc.root();
    let cursor = Cursor::append(doc.tree(), root, "body");
    let suggestion = doc
        .suggestions(&cursor, text, &[])
        .into_iter()
        .find(|s| s.title == text)
        .expect("Failed to find suggestion");
    doc.accept_suggestion(&cursor, suggestion)
        .expect("Failed to accept suggestion")
        .node
        .expect("Accepted node")
}

#[test]
fn test_accept_suggestion_updates_code() {
    let mut doc = js_document();
    insert_statement(&mut doc, "42");

    let mut pipeline = Pipeline::new(doc);
    let result = pipeline.full_render().unwrap();
    assert_eq!(result.version, 1);
    assert_eq!(result.code, "42;\n");
}

#[test]
fn test_paste_identifier_becomes_reference() {
    let mut doc = js_document();
    let statement = insert_statement(&mut doc, "42");

    let registry = doc.registry().clone();
    let mut scratch = sprout_language::NodeTree::new(registry);
    let name = js::declared_identifier::create(&mut scratch, "count");
    let json = sprout_language::serialize(&scratch, name).unwrap().to_json().unwrap();
    let mut data = ClipboardData::new();
    data.set(NODE_DATA_KIND, json);

    let cursor = Cursor::new(statement, "tokens", 0);
    let pasted = doc
        .paste(&data, &Selection::Cursor(cursor))
        .unwrap()
        .expect("paste should insert");

    assert_eq!(doc.tree().node_type(pasted), Some(js::VARIABLE_REFERENCE));
    assert_eq!(doc.tree().property_str(pasted, "identifier"), "count");
    assert_eq!(doc.tree().child_count(statement, "tokens"), 2);

    let code = doc.generate(&Default::default()).expect("Failed to generate");
    assert_eq!(code, "count;\n");
    assert_eq!(doc.generate(&Default::default()).unwrap(), code);

    let layout = doc.layout(&Default::default()).expect("Failed to lay out");
    assert!(layout.line_for_node(statement).is_some());
    assert_eq!(layout, doc.layout(&Default::default()).unwrap());
}

#[test]
fn test_paste_without_adaptation_is_ignored() {
    let registry = Registry::standard().unwrap();
    let mut doc = Document::new(PathBuf::from("index.json"), registry, html::HTML_DOCUMENT).unwrap();
    let root = doc.root();
    let version = doc.version;

    let data = ClipboardData::from_text(
        r#"{"type":"DECLARED_IDENTIFIER","properties":{"identifier":"count"}}"#,
    );
    let cursor = Cursor::new(root, "body", 0);
    assert_eq!(doc.paste(&data, &cursor.into()).unwrap(), None);
    assert_eq!(doc.tree().child_count(root, "body"), 0);
    assert_eq!(doc.version, version);
}

#[test]
fn test_paste_unknown_type_is_ignored() {
    let mut doc = js_document();
    let root = doc.root();
    let data = ClipboardData::from_text(r#"{"type":"MYSTERY"}"#);
    let cursor = Cursor::new(root, "body", 0);
    assert_eq!(doc.paste(&data, &cursor.into()).unwrap(), None);
    assert_eq!(doc.tree().child_count(root, "body"), 0);
}

#[test]
fn test_copy_paste_component_into_markup() {
    let registry = Registry::standard().unwrap();
    let mut scratch = sprout_language::NodeTree::new(registry.clone());
    let declaration = component::declaration::create(&mut scratch);
    let name = js::declared_identifier::create(&mut scratch, "App");
    scratch.append(declaration, "identifier", name).unwrap();
    let json = sprout_language::serialize(&scratch, declaration)
        .unwrap()
        .to_json()
        .unwrap();

    let mut doc = Document::new(PathBuf::from("index.json"), registry, html::HTML_DOCUMENT).unwrap();
    let root = doc.root();
    let pasted = doc
        .paste(&ClipboardData::from_text(json), &Cursor::new(root, "body", 0).into())
        .unwrap()
        .expect("component should be wrapped");

    assert_eq!(doc.tree().node_type(pasted), Some(html::HTML_SCRIPT_ELEMENT));
    let code = doc.generate(&Default::default()).unwrap();
    assert!(code.contains("<script>export function App(props) {}\n</script>"), "{}", code);
}

#[test]
fn test_cut_cascades_and_paste_restores() {
    let mut doc = js_document();
    let first = insert_statement(&mut doc, "1");
    insert_statement(&mut doc, "2");
    let root = doc.root();
    let token = doc.tree().first_child(first, "tokens").unwrap();

    let data = doc.cut(token).expect("Failed to cut");
    assert_eq!(doc.tree().child_count(root, "body"), 1, "empty expression removed");
    assert!(data.get(NODE_DATA_KIND).is_some());

    let cursor = Cursor::new(root, "body", 0);
    let pasted = doc.paste(&data, &cursor.into()).unwrap().unwrap();
    assert_eq!(doc.tree().node_type(pasted), Some(js::SPLOOT_EXPRESSION));
    assert_eq!(doc.generate(&Default::default()).unwrap(), "1;\n2;\n");
}

#[test]
fn test_paste_replaces_selected_node() {
    let mut doc = js_document();
    let statement = insert_statement(&mut doc, "1");
    let token = doc.tree().first_child(statement, "tokens").unwrap();

    let data = ClipboardData::from_text(r#"{"type":"STRING_LITERAL","properties":{"value":"hi"}}"#);
    let pasted = doc.paste(&data, &Selection::Node(token)).unwrap().unwrap();

    assert!(!doc.tree().contains(token));
    assert_eq!(doc.tree().children(statement, "tokens"), &[pasted]);
    assert_eq!(doc.generate(&Default::default()).unwrap(), "\"hi\";\n");
}

#[test]
fn test_line_hit_maps_to_cursor() {
    let mut doc = js_document();
    insert_statement(&mut doc, "1");
    insert_statement(&mut doc, "2");
    let mut pipeline = Pipeline::new(doc);
    let result = pipeline.full_render().unwrap();

    let line = result.layout.line_at_y(result.layout.height() - 1.0).unwrap();
    let cursor = Cursor::from(line.position());
    let tree = pipeline.document().tree();
    assert_eq!(cursor.index, 2);
    assert_eq!(cursor.category(tree), Some(NodeCategory::Statement));
}

#[test]
fn test_string_literal_suggestion_in_expression() {
    let mut doc = js_document();
    let statement = insert_statement(&mut doc, "1");
    let cursor = Cursor::append(doc.tree(), statement, "tokens");

    let suggestions = doc.suggestions(&cursor, "\"hello\"", &[]);
    let string = suggestions
        .into_iter()
        .find(|s| s.node_type() == literals::STRING_LITERAL)
        .expect("string literal suggestion");
    doc.accept_suggestion(&cursor, string).unwrap();
    assert_eq!(doc.tree().child_count(statement, "tokens"), 2);

    // `1 "hello"` has no operator, so only the first operand is generated
    assert_eq!(doc.generate(&Default::default()).unwrap(), "1;\n");
    let layout = doc.layout(&Default::default()).expect("Failed to lay out");
    let line = layout.line_for_node(statement).expect("statement line");
    assert_eq!(line.node.as_ref().unwrap().walk().len(), 3);
}

#[test]
fn test_file_backed_save_and_load() {
    let path = std::env::temp_dir().join(format!("sprout-editor-{}.json", std::process::id()));
    let doc = js_document();
    std::fs::write(&path, doc.to_json().unwrap()).unwrap();

    let registry = Registry::standard().unwrap();
    let mut loaded = Document::load(path.clone(), registry).expect("Failed to load");
    assert!(!loaded.is_dirty());
    insert_statement(&mut loaded, "7");
    assert!(loaded.is_dirty());
    loaded.save().expect("Failed to save");
    assert!(!loaded.is_dirty());

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("NUMERIC_LITERAL"));
    std::fs::remove_file(&path).ok();
}
