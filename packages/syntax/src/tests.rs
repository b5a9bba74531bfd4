use crate::css::{print_stylesheet, Declaration, Rule, Selector, StyleSheet};
use crate::html::{escape_script_content, serialize, Element, HtmlNode};
use crate::js::*;
use crate::python;

#[test]
fn test_print_exported_function() {
    let program = Program::new(vec![Statement::export(Statement::FunctionDeclaration(
        Function {
            id: Some("Foo".to_string()),
            params: vec!["props".to_string()],
            body: vec![Statement::expression(Expression::string("hi"))],
        },
    ))]);

    assert_eq!(
        print_program(&program),
        "export function Foo(props) {\n  \"hi\";\n}\n"
    );
}

#[test]
fn test_binary_parenthesization() {
    // (1 + 2) * 3
    let sum = Expression::binary(
        BinaryOperator::Add,
        Expression::Number(1.0),
        Expression::Number(2.0),
    );
    let product = Expression::binary(BinaryOperator::Multiply, sum, Expression::Number(3.0));
    assert_eq!(print_expression(&product), "(1 + 2) * 3");

    // 1 - (2 - 3) keeps its grouping, (1 - 2) - 3 does not need one
    let right_nested = Expression::binary(
        BinaryOperator::Subtract,
        Expression::Number(1.0),
        Expression::binary(
            BinaryOperator::Subtract,
            Expression::Number(2.0),
            Expression::Number(3.0),
        ),
    );
    assert_eq!(print_expression(&right_nested), "1 - (2 - 3)");
}

#[test]
fn test_number_formatting() {
    assert_eq!(format_number(3.0), "3");
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(-7.0), "-7");
}

#[test]
fn test_quote_string_escapes() {
    assert_eq!(quote_string("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
}

#[test]
fn test_function_expression_statement_is_wrapped() {
    let program = Program::new(vec![Statement::expression(Expression::Function(Function {
        id: None,
        params: vec![],
        body: vec![],
    }))]);
    assert_eq!(print_program(&program), "(function() {});\n");
}

#[test]
fn test_script_escaping_replaces_every_occurrence() {
    let escaped = escape_script_content("\"</script>\"; \"</script>\";");
    assert_eq!(escaped, "\"<\\/script>\"; \"<\\/script>\";");
}

#[test]
fn test_html_serializer_escapes_text_and_attributes() {
    let mut element = Element::new("p");
    element.set_attribute("title", "a \"quoted\" value");
    element.append(HtmlNode::Text("1 < 2 & 3".to_string()));

    assert_eq!(
        serialize(&HtmlNode::Element(element)),
        "<p title=\"a &quot;quoted&quot; value\">1 &lt; 2 &amp; 3</p>"
    );
}

#[test]
fn test_void_elements_have_no_closing_tag() {
    let element = Element::new("br");
    assert_eq!(serialize(&HtmlNode::Element(element)), "<br>");
}

#[test]
fn test_set_attribute_replaces_existing() {
    let mut element = Element::new("div");
    element.set_attribute("id", "a");
    element.set_attribute("id", "b");
    assert_eq!(element.attributes, vec![("id".to_string(), "b".to_string())]);
}

#[test]
fn test_print_stylesheet() {
    let sheet = StyleSheet {
        rules: vec![Rule {
            selectors: vec![Selector::Class("card".to_string())],
            declarations: vec![Declaration {
                property: "color".to_string(),
                value: "red".to_string(),
            }],
        }],
    };
    assert_eq!(print_stylesheet(&sheet), ".card {\n  color: red;\n}\n");
}

#[test]
fn test_python_operator_spelling() {
    let expression = Expression::binary(
        BinaryOperator::And,
        Expression::Boolean(true),
        Expression::binary(
            BinaryOperator::Equal,
            Expression::identifier("x"),
            Expression::Null,
        ),
    );
    assert_eq!(
        python::print_expression(&expression).unwrap(),
        "True and x == None"
    );
}

#[test]
fn test_python_rejects_function_expressions() {
    let expression = Expression::Function(Function {
        id: None,
        params: vec![],
        body: vec![],
    });
    assert!(python::print_expression(&expression).is_err());
}

#[test]
fn test_ast_survives_json() {
    let program = Program::new(vec![Statement::expression(Expression::binary(
        BinaryOperator::Add,
        Expression::Number(1.0),
        Expression::string("a"),
    ))]);

    let json = serde_json::to_string(&program).expect("Failed to serialize");
    let restored: Program = serde_json::from_str(&json).expect("Failed to deserialize");
    assert_eq!(print_program(&restored), print_program(&program));
}
