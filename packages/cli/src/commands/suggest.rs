use super::resolve;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sprout_editor::{Cursor, Document};
use sprout_language::{suggest as query, NodeCategory, Registry, SuggestedNode, SuggestionContext};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Category to query (e.g. "statement", "expression-token", "dom-node")
    pub category: String,

    /// Typed text
    #[arg(default_value = "")]
    pub text: String,

    /// Query at the end of this document's body, so its declarations are in
    /// scope
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Include candidates that do not match the text
    #[arg(long)]
    pub all: bool,
}

pub fn suggest(args: SuggestArgs, cwd: &str) -> Result<()> {
    let category = parse_category(&args.category)?;
    let registry = Registry::standard()?;

    let suggestions = match &args.file {
        Some(file) => {
            let document = Document::load(resolve(cwd, file), registry)?;
            let cursor = Cursor::append(document.tree(), document.root(), "body");
            let ctx = SuggestionContext::at(document.registry(), cursor.position(document.tree()));
            query(&ctx, category, &args.text)
        }
        None => query(&SuggestionContext::detached(&registry), category, &args.text),
    };

    let shown: Vec<&SuggestedNode> = suggestions
        .iter()
        .filter(|s| args.all || s.matches(&args.text))
        .collect();

    if shown.is_empty() {
        println!("{}", format!("No {} suggestions", category).yellow());
        return Ok(());
    }

    for suggestion in shown {
        let marker = if suggestion.valid { "✓".green() } else { "✗".red() };
        println!(
            "  {} {} {}",
            marker,
            suggestion.title.bright_white(),
            format!("({})", suggestion.node_type()).dimmed()
        );
        if let Some(documentation) = &suggestion.documentation {
            println!("      {}", documentation.dimmed());
        }
    }

    Ok(())
}

fn parse_category(name: &str) -> Result<NodeCategory> {
    NodeCategory::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = NodeCategory::ALL.iter().map(|c| c.as_str()).collect();
        anyhow!("Unknown category: {}. Use one of: {}", name, known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("dom-node").unwrap(), NodeCategory::DomNode);
        assert_eq!(
            parse_category("python-expression-token").unwrap(),
            NodeCategory::PythonExpressionToken
        );

        let err = parse_category("widget").unwrap_err();
        assert!(err.to_string().contains("expression-token"));
    }
}
