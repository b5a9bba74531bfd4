//! HTML element tree and serializer.

use serde::{Deserialize, Serialize};

/// Elements that never carry children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HtmlNode {
    Element(Element),
    Text(String),
    /// Pre-rendered content of a raw text element (`script`, `style`).
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Later values replace earlier ones, matching `setAttribute` semantics.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn append(&mut self, child: HtmlNode) {
        self.children.push(child);
    }
}

/// Serialize a node tree to markup. Text is escaped, raw content is not.
pub fn serialize(node: &HtmlNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

pub fn serialize_document(children: &[HtmlNode]) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    for child in children {
        write_node(child, &mut out);
        out.push('\n');
    }
    out
}

fn write_node(node: &HtmlNode, out: &mut String) {
    match node {
        HtmlNode::Text(text) => out.push_str(&escape_text(text)),
        HtmlNode::Raw(raw) => out.push_str(raw),
        HtmlNode::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                return;
            }
            for child in &element.children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Make generated script text safe to embed inside a `<script>` element.
///
/// Every `</script>` becomes `<\/script>`. A regex or string literal that
/// genuinely contains that sequence is altered too; that is accepted.
pub fn escape_script_content(script: &str) -> String {
    script.replace("</script>", "<\\/script>")
}

/// Same treatment for `<style>` content.
pub fn escape_style_content(css: &str) -> String {
    css.replace("</style>", "<\\/style>")
}
