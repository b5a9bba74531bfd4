//! JavaScript syntax tree and printer.

use crate::context::PrintContext;
use serde::{Deserialize, Serialize};

/// Root of a generated script
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Expression(Expression),
    VariableDeclaration {
        kind: DeclarationKind,
        name: String,
        init: Option<Expression>,
    },
    FunctionDeclaration(Function),
    /// `export <declaration>`
    Export(Box<Statement>),
    Return(Option<Expression>),
}

impl Statement {
    /// Wraps a bare expression so it can sit in a statement list.
    pub fn expression(expression: Expression) -> Self {
        Statement::Expression(expression)
    }

    pub fn export(declaration: Statement) -> Self {
        Statement::Export(Box::new(declaration))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Let,
    Const,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub id: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(String),
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Function(Function),
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::String(value.into())
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Binary { operator, .. } => operator.precedence(),
            Expression::Function(_) => 0,
            _ => u8::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 13] = [
        BinaryOperator::Add,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Remainder,
        BinaryOperator::Equal,
        BinaryOperator::NotEqual,
        BinaryOperator::LessThan,
        BinaryOperator::LessThanOrEqual,
        BinaryOperator::GreaterThan,
        BinaryOperator::GreaterThanOrEqual,
        BinaryOperator::And,
        BinaryOperator::Or,
    ];

    /// JavaScript spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Equal => "===",
            BinaryOperator::NotEqual => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == symbol)
    }

    /// Higher binds tighter. All binary operators are left-associative.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Equal | BinaryOperator::NotEqual => 3,
            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => 4,
            BinaryOperator::Add | BinaryOperator::Subtract => 5,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Remainder => 6,
        }
    }
}

/// Print a whole program, one top-level statement per line.
pub fn print_program(program: &Program) -> String {
    let ctx = PrintContext::default();
    for statement in &program.body {
        print_statement(statement, &ctx);
    }
    ctx.get_output()
}

pub fn print_statement(statement: &Statement, ctx: &PrintContext) {
    ctx.add_indented("");
    print_statement_inline(statement, ctx);
    ctx.add("\n");
}

fn print_statement_inline(statement: &Statement, ctx: &PrintContext) {
    match statement {
        Statement::Expression(expression) => {
            // A leading function keyword would be read back as a declaration.
            if matches!(expression, Expression::Function(_)) {
                ctx.add("(");
                print_expression_into(expression, ctx);
                ctx.add(")");
            } else {
                print_expression_into(expression, ctx);
            }
            ctx.add(";");
        }
        Statement::VariableDeclaration { kind, name, init } => {
            ctx.add(kind.as_str());
            ctx.add(" ");
            ctx.add(name);
            if let Some(init) = init {
                ctx.add(" = ");
                print_expression_into(init, ctx);
            }
            ctx.add(";");
        }
        Statement::FunctionDeclaration(function) => print_function(function, ctx),
        Statement::Export(declaration) => {
            ctx.add("export ");
            print_statement_inline(declaration, ctx);
        }
        Statement::Return(argument) => {
            ctx.add("return");
            if let Some(argument) = argument {
                ctx.add(" ");
                print_expression_into(argument, ctx);
            }
            ctx.add(";");
        }
    }
}

fn print_function(function: &Function, ctx: &PrintContext) {
    ctx.add("function");
    if let Some(id) = &function.id {
        ctx.add(" ");
        ctx.add(id);
    }
    ctx.add("(");
    ctx.add(&function.params.join(", "));
    ctx.add(") {");
    if function.body.is_empty() {
        ctx.add("}");
        return;
    }
    ctx.add("\n");
    ctx.indent();
    for statement in &function.body {
        print_statement(statement, ctx);
    }
    ctx.dedent();
    ctx.add_indented("}");
}

/// Print a single expression without a trailing newline.
pub fn print_expression(expression: &Expression) -> String {
    let ctx = PrintContext::default();
    print_expression_into(expression, &ctx);
    ctx.get_output()
}

fn print_expression_into(expression: &Expression, ctx: &PrintContext) {
    match expression {
        Expression::Identifier(name) => ctx.add(name),
        Expression::String(value) => ctx.add(&quote_string(value)),
        Expression::Number(value) => ctx.add(&format_number(*value)),
        Expression::Boolean(value) => ctx.add(if *value { "true" } else { "false" }),
        Expression::Null => ctx.add("null"),
        Expression::Binary {
            operator,
            left,
            right,
        } => {
            let precedence = operator.precedence();
            print_operand(left, precedence, false, ctx);
            ctx.add(" ");
            ctx.add(operator.as_str());
            ctx.add(" ");
            print_operand(right, precedence, true, ctx);
        }
        Expression::Call { callee, arguments } => {
            print_operand(callee, u8::MAX, false, ctx);
            ctx.add("(");
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    ctx.add(", ");
                }
                print_expression_into(argument, ctx);
            }
            ctx.add(")");
        }
        Expression::Function(function) => print_function(function, ctx),
    }
}

fn print_operand(operand: &Expression, parent: u8, right: bool, ctx: &PrintContext) {
    let own = operand.precedence();
    let needs_parens = own < parent || (right && own == parent);
    if needs_parens {
        ctx.add("(");
        print_expression_into(operand, ctx);
        ctx.add(")");
    } else {
        print_expression_into(operand, ctx);
    }
}

/// Double-quoted string literal with JSON-compatible escapes.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{}", value)
    }
}
