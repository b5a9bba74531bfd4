//! CSS rule tree and printer.

use crate::context::PrintContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    Class(String),
    Id(String),
    Type(String),
}

impl Selector {
    pub fn to_css(&self) -> String {
        match self {
            Selector::Class(name) => format!(".{}", name),
            Selector::Id(name) => format!("#{}", name),
            Selector::Type(name) => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

pub fn print_stylesheet(sheet: &StyleSheet) -> String {
    let ctx = PrintContext::default();
    for rule in &sheet.rules {
        print_rule(rule, &ctx);
    }
    ctx.get_output()
}

pub fn print_rule(rule: &Rule, ctx: &PrintContext) {
    let selectors: Vec<String> = rule.selectors.iter().map(Selector::to_css).collect();
    ctx.add_line(&format!("{} {{", selectors.join(", ")));
    ctx.indent();
    for declaration in &rule.declarations {
        ctx.add_line(&format!("{}: {};", declaration.property, declaration.value));
    }
    ctx.dedent();
    ctx.add_line("}");
}
