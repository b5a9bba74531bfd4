//! HTML content-model table used to decide which tags may nest where.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Metadata,
    Flow,
    Phrasing,
    Heading,
    Interactive,
}

/// What an element accepts as children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentModel {
    /// Void element
    Nothing,
    /// Text only (`title`, `script`, `textarea`)
    Text,
    Metadata,
    Flow,
    Phrasing,
    /// An explicit list of child tags
    Tags(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    pub tag: &'static str,
    pub kinds: &'static [ContentKind],
    pub content: ContentModel,
    pub documentation: &'static str,
}

impl TagInfo {
    pub fn is(&self, kind: ContentKind) -> bool {
        self.kinds.contains(&kind)
    }
}

use ContentKind::*;

const FLOW: &[ContentKind] = &[Flow];
const FLOW_PHRASING: &[ContentKind] = &[Flow, Phrasing];
const HEADING: &[ContentKind] = &[Flow, Heading];
const META: &[ContentKind] = &[Metadata];

macro_rules! tag {
    ($tag:literal, $kinds:expr, $content:expr, $doc:literal) => {
        TagInfo {
            tag: $tag,
            kinds: $kinds,
            content: $content,
            documentation: $doc,
        }
    };
}

pub const TAGS: &[TagInfo] = &[
    tag!("html", &[], ContentModel::Tags(&["head", "body"]), "The root of an HTML document."),
    tag!("head", &[], ContentModel::Metadata, "Machine-readable information about the document."),
    tag!("title", META, ContentModel::Text, "The document's title, shown in the browser tab."),
    tag!("meta", META, ContentModel::Nothing, "Metadata that other head elements cannot represent."),
    tag!("link", META, ContentModel::Nothing, "A relationship to an external resource, such as a stylesheet."),
    tag!("style", META, ContentModel::Text, "Style information for the document."),
    tag!("script", &[Metadata, Flow, Phrasing], ContentModel::Text, "Embedded executable code."),
    tag!("body", &[], ContentModel::Flow, "The content of the document."),
    tag!("div", FLOW, ContentModel::Flow, "A generic container for flow content."),
    tag!("section", FLOW, ContentModel::Flow, "A standalone section of a document."),
    tag!("article", FLOW, ContentModel::Flow, "A self-contained composition."),
    tag!("header", FLOW, ContentModel::Flow, "Introductory content for its nearest section."),
    tag!("footer", FLOW, ContentModel::Flow, "A footer for its nearest section."),
    tag!("nav", FLOW, ContentModel::Flow, "A section of navigation links."),
    tag!("main", FLOW, ContentModel::Flow, "The dominant content of the body."),
    tag!("form", FLOW, ContentModel::Flow, "A section containing interactive controls for submitting information."),
    tag!("p", FLOW, ContentModel::Phrasing, "A paragraph."),
    tag!("pre", FLOW, ContentModel::Phrasing, "Preformatted text."),
    tag!("h1", HEADING, ContentModel::Phrasing, "A level 1 section heading."),
    tag!("h2", HEADING, ContentModel::Phrasing, "A level 2 section heading."),
    tag!("h3", HEADING, ContentModel::Phrasing, "A level 3 section heading."),
    tag!("h4", HEADING, ContentModel::Phrasing, "A level 4 section heading."),
    tag!("ul", FLOW, ContentModel::Tags(&["li", "script"]), "An unordered list of items."),
    tag!("ol", FLOW, ContentModel::Tags(&["li", "script"]), "An ordered list of items."),
    tag!("li", &[], ContentModel::Flow, "An item in a list."),
    tag!("table", FLOW, ContentModel::Tags(&["thead", "tbody", "tr"]), "Tabular data."),
    tag!("thead", &[], ContentModel::Tags(&["tr"]), "The header rows of a table."),
    tag!("tbody", &[], ContentModel::Tags(&["tr"]), "The body rows of a table."),
    tag!("tr", &[], ContentModel::Tags(&["td", "th"]), "A row of table cells."),
    tag!("td", &[], ContentModel::Flow, "A data cell of a table."),
    tag!("th", &[], ContentModel::Flow, "A header cell of a table."),
    tag!("hr", FLOW, ContentModel::Nothing, "A thematic break between paragraphs."),
    tag!("span", FLOW_PHRASING, ContentModel::Phrasing, "A generic inline container."),
    tag!("a", &[Flow, Phrasing, Interactive], ContentModel::Flow, "A hyperlink."),
    tag!("strong", FLOW_PHRASING, ContentModel::Phrasing, "Strong importance."),
    tag!("em", FLOW_PHRASING, ContentModel::Phrasing, "Stress emphasis."),
    tag!("code", FLOW_PHRASING, ContentModel::Phrasing, "A fragment of computer code."),
    tag!("br", FLOW_PHRASING, ContentModel::Nothing, "A line break."),
    tag!("img", FLOW_PHRASING, ContentModel::Nothing, "An image."),
    tag!("label", &[Flow, Phrasing, Interactive], ContentModel::Phrasing, "A caption for a form control."),
    tag!("input", &[Flow, Phrasing, Interactive], ContentModel::Nothing, "An interactive form control."),
    tag!("button", &[Flow, Phrasing, Interactive], ContentModel::Phrasing, "A clickable button."),
    tag!("textarea", &[Flow, Phrasing, Interactive], ContentModel::Text, "A multi-line plain-text editing control."),
    tag!("select", &[Flow, Phrasing, Interactive], ContentModel::Tags(&["option"]), "A control offering a menu of options."),
    tag!("option", &[], ContentModel::Text, "An option in a select element."),
];

/// Tags that have node types of their own.
const DEDICATED_TAGS: &[&str] = &["script", "style"];

pub fn lookup(tag: &str) -> Option<&'static TagInfo> {
    TAGS.iter().find(|info| info.tag == tag)
}

/// Whether `tag` may appear as a child of `parent`. Unknown parents accept
/// flow content.
pub fn is_tag_valid_with_parent(tag: &str, parent: &str) -> bool {
    let Some(info) = lookup(tag) else {
        return false;
    };
    let model = lookup(parent)
        .map(|parent| parent.content)
        .unwrap_or(ContentModel::Flow);
    match model {
        ContentModel::Nothing | ContentModel::Text => false,
        ContentModel::Metadata => info.is(Metadata),
        ContentModel::Flow => info.is(Flow),
        ContentModel::Phrasing => info.is(Phrasing),
        ContentModel::Tags(tags) => tags.contains(&tag),
    }
}

/// Generic element tags valid under `parent`, in table order.
pub fn valid_child_tags(parent: &str) -> Vec<&'static TagInfo> {
    TAGS.iter()
        .filter(|info| !DEDICATED_TAGS.contains(&info.tag))
        .filter(|info| is_tag_valid_with_parent(info.tag, parent))
        .collect()
}
