use super::resolve;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sprout_editor::Document;
use sprout_language::{NodeTree, Registry};
use sprout_layout::{Layout, Line};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Serialized document to lay out
    pub file: PathBuf,

    /// Print the full layout as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn layout(args: LayoutArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = Registry::standard()?;
    let document = Document::load(resolve(cwd, &args.file), registry)?;
    let layout = document.layout(&config.layout)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    print_lines(document.tree(), &layout);
    println!();
    println!(
        "{} lines, height {}",
        layout.lines.len(),
        layout.height()
    );
    Ok(())
}

fn print_lines(tree: &NodeTree, layout: &Layout) {
    for line in &layout.lines {
        println!("{}", describe_line(tree, line));
    }
}

/// `y  indent  PARENT.group[index]  NODE_TYPE  width` for one line.
fn describe_line(tree: &NodeTree, line: &Line) -> String {
    let parent_type = tree.node_type(line.parent).unwrap_or("?");
    let slot = format!("{}.{}[{}]", parent_type, line.group, line.index);

    let node = match &line.node {
        Some(node) => format!("{} {}", node.node_type.bright_white(), line.width()),
        None => "(append)".dimmed().to_string(),
    };
    let anchor = if line.cursor_anchor { "|" } else { " " };

    format!(
        "{:>6} {:>6} {} {} {}",
        line.y,
        line.indent,
        anchor,
        slot.cyan(),
        node
    )
}
