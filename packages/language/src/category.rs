use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract structural role a child group can require of its members.
///
/// The set is closed; which node types fill each role is decided by the
/// [`Registry`](crate::Registry) at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeCategory {
    // JavaScript
    Statement,
    Expression,
    ExpressionToken,
    DeclaredIdentifier,
    ComponentPropertyDeclaration,

    // HTML
    DomNode,
    HtmlAttribute,
    HtmlAttributeValue,

    // Styles
    StyleSheetStatement,
    StyleSheetSelector,
    StyleSheetProperty,

    // Python
    PythonStatement,
    PythonExpression,
    PythonExpressionToken,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 14] = [
        NodeCategory::Statement,
        NodeCategory::Expression,
        NodeCategory::ExpressionToken,
        NodeCategory::DeclaredIdentifier,
        NodeCategory::ComponentPropertyDeclaration,
        NodeCategory::DomNode,
        NodeCategory::HtmlAttribute,
        NodeCategory::HtmlAttributeValue,
        NodeCategory::StyleSheetStatement,
        NodeCategory::StyleSheetSelector,
        NodeCategory::StyleSheetProperty,
        NodeCategory::PythonStatement,
        NodeCategory::PythonExpression,
        NodeCategory::PythonExpressionToken,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Statement => "statement",
            NodeCategory::Expression => "expression",
            NodeCategory::ExpressionToken => "expression-token",
            NodeCategory::DeclaredIdentifier => "declared-identifier",
            NodeCategory::ComponentPropertyDeclaration => "component-property",
            NodeCategory::DomNode => "dom-node",
            NodeCategory::HtmlAttribute => "html-attribute",
            NodeCategory::HtmlAttributeValue => "html-attribute-value",
            NodeCategory::StyleSheetStatement => "stylesheet-statement",
            NodeCategory::StyleSheetSelector => "stylesheet-selector",
            NodeCategory::StyleSheetProperty => "stylesheet-property",
            NodeCategory::PythonStatement => "python-statement",
            NodeCategory::PythonExpression => "python-expression",
            NodeCategory::PythonExpressionToken => "python-expression-token",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
