use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sprout_language::types::{js, literals};
use sprout_language::SerializedNode;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Target to emit (js, html, python, all)
    #[arg(short, long, default_value = "all")]
    pub target: String,

    /// Source directory
    #[arg(short, long, default_value = "src")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

/// `let greeting = "hello";` as a serialized document.
fn example_document() -> SerializedNode {
    let declaration = SerializedNode::new(js::VARIABLE_DECLARATION)
        .with_children(
            "identifier",
            vec![SerializedNode::new(js::DECLARED_IDENTIFIER).with_property("identifier", "greeting")],
        )
        .with_children(
            "init",
            vec![SerializedNode::new(js::SPLOOT_EXPRESSION).with_children(
                "tokens",
                vec![SerializedNode::new(literals::STRING_LITERAL).with_property("value", "hello")],
            )],
        );
    SerializedNode::new(js::JAVASCRIPT_FILE).with_children("body", vec![declaration])
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "🌱 Initializing Sprout project...".bright_blue().bold());

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("main.json");
    if !example_file.exists() {
        fs::write(&example_file, example_document().to_json_pretty()?)?;
        println!("  {} Created main.json", "✓".green());
    }

    let mut config = Config {
        src_dir: args.src_dir.clone(),
        ..Config::default()
    };
    if args.target != "all" {
        config.emit = vec![args.target.clone()];
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: sprout layout {}/main.json", args.src_dir);
    println!("  2. Run: sprout compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
