//! Python expression printer over the shared expression tree.

use crate::error::{SyntaxError, SyntaxResult};
use crate::js::{format_number, quote_string, BinaryOperator, Expression};

const LANGUAGE: &str = "python";

pub fn operator_symbol(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Equal => "==",
        BinaryOperator::NotEqual => "!=",
        BinaryOperator::And => "and",
        BinaryOperator::Or => "or",
        other => other.as_str(),
    }
}

pub fn print_expression(expression: &Expression) -> SyntaxResult<String> {
    let mut out = String::new();
    write_expression(expression, &mut out)?;
    Ok(out)
}

fn write_expression(expression: &Expression, out: &mut String) -> SyntaxResult<()> {
    match expression {
        Expression::Identifier(name) => out.push_str(name),
        Expression::String(value) => out.push_str(&quote_string(value)),
        Expression::Number(value) => out.push_str(&format_number(*value)),
        Expression::Boolean(true) => out.push_str("True"),
        Expression::Boolean(false) => out.push_str("False"),
        Expression::Null => out.push_str("None"),
        Expression::Binary {
            operator,
            left,
            right,
        } => {
            let precedence = operator.precedence();
            write_operand(left, precedence, false, out)?;
            out.push(' ');
            out.push_str(operator_symbol(*operator));
            out.push(' ');
            write_operand(right, precedence, true, out)?;
        }
        Expression::Call { callee, arguments } => {
            write_operand(callee, u8::MAX, false, out)?;
            out.push('(');
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_expression(argument, out)?;
            }
            out.push(')');
        }
        Expression::Function(_) => {
            return Err(SyntaxError::unsupported("function expression", LANGUAGE));
        }
    }
    Ok(())
}

fn write_operand(
    operand: &Expression,
    parent: u8,
    right: bool,
    out: &mut String,
) -> SyntaxResult<()> {
    let own = match operand {
        Expression::Binary { operator, .. } => operator.precedence(),
        _ => u8::MAX,
    };
    if own < parent || (right && own == parent) {
        out.push('(');
        write_expression(operand, out)?;
        out.push(')');
    } else {
        write_expression(operand, out)?;
    }
    Ok(())
}
