//! # Code generation
//!
//! Each node type turns itself into a fragment of its target sub-language
//! through the `generate` hook on its registration. The helpers here do the
//! shared work: dispatch, the expression-to-statement wrapping that statement
//! containers need, and printing a generated fragment to text.

use crate::error::{LanguageError, LanguageResult};
use crate::node::NodeId;
use crate::tree::NodeTree;
use sprout_syntax::{css, html, js, python, PrintContext};
use tracing::trace;

/// Output of a node's generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    Expression(js::Expression),
    Statement(js::Statement),
    Program(js::Program),
    Html(html::HtmlNode),
    Css(css::Rule),
    Selector(css::Selector),
    Declaration(css::Declaration),
    /// Target text produced directly (markup documents, python, attribute values)
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub indent: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

/// Generate `id`. `Ok(None)` means the node has nothing to contribute.
pub fn generate(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<Generated>> {
    let node_type = tree.node_type(id).ok_or(LanguageError::NodeNotFound(id))?;
    let registration = tree.registry().lookup(node_type)?;
    match registration.generate {
        Some(generate) => {
            let generated = generate(tree, id)?;
            trace!(?id, node_type, gap = generated.is_none(), "generated");
            Ok(generated)
        }
        None => Ok(None),
    }
}

pub fn generate_expression(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<js::Expression>> {
    match generate(tree, id)? {
        None => Ok(None),
        Some(Generated::Expression(expression)) => Ok(Some(expression)),
        Some(other) => Err(unexpected(tree, id, "an expression", &other)),
    }
}

/// Generate a node that sits in a statement slot; bare expressions are wrapped.
pub fn generate_statement(tree: &NodeTree, id: NodeId) -> LanguageResult<Option<js::Statement>> {
    match generate(tree, id)? {
        None => Ok(None),
        Some(Generated::Expression(expression)) => Ok(Some(js::Statement::expression(expression))),
        Some(Generated::Statement(statement)) => Ok(Some(statement)),
        Some(other) => Err(unexpected(tree, id, "a statement", &other)),
    }
}

/// Statements for every child of `group`, gaps dropped.
pub fn generate_statements(
    tree: &NodeTree,
    parent: NodeId,
    group: &str,
) -> LanguageResult<Vec<js::Statement>> {
    let mut statements = Vec::new();
    for child in tree.children(parent, group) {
        if let Some(statement) = generate_statement(tree, *child)? {
            statements.push(statement);
        }
    }
    Ok(statements)
}

/// Generate and print `id` to target text.
pub fn generate_code_string(
    tree: &NodeTree,
    id: NodeId,
    options: &GenerateOptions,
) -> LanguageResult<Option<String>> {
    let Some(generated) = generate(tree, id)? else {
        return Ok(None);
    };
    Ok(Some(print_generated(&generated, options)?))
}

pub fn print_generated(generated: &Generated, options: &GenerateOptions) -> LanguageResult<String> {
    let ctx = PrintContext::new(options.indent.clone());
    let text = match generated {
        Generated::Expression(expression) => js::print_expression(expression),
        Generated::Statement(statement) => {
            js::print_statement(statement, &ctx);
            ctx.get_output()
        }
        Generated::Program(program) => {
            for statement in &program.body {
                js::print_statement(statement, &ctx);
            }
            ctx.get_output()
        }
        Generated::Html(node) => html::serialize(node),
        Generated::Css(rule) => {
            css::print_rule(rule, &ctx);
            ctx.get_output()
        }
        Generated::Selector(selector) => selector.to_css(),
        Generated::Declaration(declaration) => {
            format!("{}: {};", declaration.property, declaration.value)
        }
        Generated::Text(text) => text.clone(),
    };
    Ok(text)
}

/// Print a generated expression as Python.
pub fn print_python(expression: &js::Expression) -> LanguageResult<String> {
    Ok(python::print_expression(expression)?)
}

fn unexpected(tree: &NodeTree, id: NodeId, wanted: &str, got: &Generated) -> LanguageError {
    LanguageError::generation(format!(
        "{} generated {} where {} was expected",
        tree.node_type(id).unwrap_or("?"),
        kind_name(got),
        wanted
    ))
}

fn kind_name(generated: &Generated) -> &'static str {
    match generated {
        Generated::Expression(_) => "an expression",
        Generated::Statement(_) => "a statement",
        Generated::Program(_) => "a program",
        Generated::Html(_) => "markup",
        Generated::Css(_) => "a style rule",
        Generated::Selector(_) => "a selector",
        Generated::Declaration(_) => "a style declaration",
        Generated::Text(_) => "text",
    }
}
