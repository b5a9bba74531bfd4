use super::resolve;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use sprout_editor::Document;
use sprout_language::types::{HTML_DOCUMENT, JAVASCRIPT_FILE, PYTHON_FILE};
use sprout_language::{GenerateOptions, Registry};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Document or directory to compile (defaults to the configured srcDir)
    pub path: Option<PathBuf>,

    /// Target language; `auto` picks it from each document's root type
    #[arg(short, long, value_enum, default_value_t = Target::Auto)]
    pub target: Target,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Auto,
    Js,
    Html,
    Python,
}

impl Target {
    /// Target a root type generates to.
    pub fn for_root_type(root_type: &str) -> Option<Self> {
        match root_type {
            JAVASCRIPT_FILE => Some(Target::Js),
            HTML_DOCUMENT => Some(Target::Html),
            PYTHON_FILE => Some(Target::Python),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Target::Auto => "txt",
            Target::Js => "js",
            Target::Html => "html",
            Target::Python => "py",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Target::Auto => "auto",
            Target::Js => "js",
            Target::Html => "html",
            Target::Python => "python",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{root_type} document cannot be compiled to {target}")]
    TargetMismatch { root_type: String, target: Target },

    #[error("no target generates {0} documents")]
    UnsupportedRoot(String),
}

/// What happened to one document.
#[derive(Debug, PartialEq)]
enum Outcome {
    Written(PathBuf),
    Stdout,
    /// Target not listed in the config's `emit`
    Skipped(Target),
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = Registry::standard()?;

    let input = match &args.path {
        Some(path) => resolve(cwd, path),
        None => config.get_src_dir(cwd),
    };
    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let (src_dir, documents) = if input.is_file() {
        let parent = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (parent, vec![input.clone()])
    } else {
        (input.clone(), find_document_files(&input))
    };

    if documents.is_empty() {
        println!("{}", "⚠️  No documents found".yellow());
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    if !args.stdout {
        println!("{}", "🌱 Compiling Sprout documents...".bright_blue().bold());
        println!("Found {} files", documents.len());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &documents {
        let relative_path = file.strip_prefix(&src_dir).unwrap_or(file);
        match compile_file(file, relative_path, &args, &config, &registry, &out_dir) {
            Ok(Outcome::Written(output_path)) => {
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_path.display()
                );
            }
            Ok(Outcome::Stdout) => success_count += 1,
            Ok(Outcome::Skipped(target)) => {
                println!(
                    "  {} {} {}",
                    "-".dimmed(),
                    relative_path.display(),
                    format!("({} not emitted)", target).dimmed()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} documents failed to compile", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} files successfully",
            "✅".green(),
            success_count
        );
    } else {
        println!(
            "{} Compiled {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

/// Serialized documents under `dir`, skipping the config file.
fn find_document_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .filter(|path| path.file_name().and_then(|s| s.to_str()) != Some(DEFAULT_CONFIG_NAME))
        .collect();
    files.sort();
    files
}

/// Pick the target for a document, honouring an explicit `--target`.
fn resolve_target(requested: Target, root_type: &str) -> Result<Target, CompileError> {
    let native = Target::for_root_type(root_type)
        .ok_or_else(|| CompileError::UnsupportedRoot(root_type.to_string()))?;
    match requested {
        Target::Auto => Ok(native),
        target if target == native => Ok(target),
        target => Err(CompileError::TargetMismatch {
            root_type: root_type.to_string(),
            target,
        }),
    }
}

fn compile_file(
    file_path: &Path,
    relative_path: &Path,
    args: &CompileArgs,
    config: &Config,
    registry: &Arc<Registry>,
    out_dir: &Path,
) -> Result<Outcome> {
    let document = Document::load(file_path.to_path_buf(), registry.clone())?;
    let target = resolve_target(args.target, document.root_type())?;

    if args.target == Target::Auto && !config.emits(target.name()) {
        debug!(path = %file_path.display(), %target, "target not in emit list");
        return Ok(Outcome::Skipped(target));
    }

    let output = document.generate(&GenerateOptions::default())?;

    if args.stdout {
        print!("{}", output);
        return Ok(Outcome::Stdout);
    }

    let output_file = out_dir.join(relative_path).with_extension(target.extension());
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;
    info!(path = %output_file.display(), "wrote output");

    Ok(Outcome::Written(output_file))
}
