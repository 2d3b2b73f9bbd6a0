//! Boxwood CLI
//!
//! Check stylesheets and inspect layout without a window.
//!
//! - `boxwood check theme.bss` - compile a sheet, print diagnostics
//! - `boxwood layout theme.bss tree.json` - lay out a described tree and
//!   print the committed rectangles as JSON

mod describe;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boxwood_dom::ElementTree;
use boxwood_style::{Sheet, Size, StyleError, UiDocument};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use describe::{NodeDescription, dump};

/// Boxwood - style cascade and box layout inspector
#[derive(Parser, Debug)]
#[command(name = "boxwood")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Report every diagnostic in a stylesheet
    boxwood check theme.bss

    # Lay out a tree in an 800x600 viewport
    boxwood layout theme.bss tree.json

    # Custom viewport, indented output
    boxwood layout theme.bss tree.json --width 1920 --height 1080 --pretty
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a stylesheet and report diagnostics
    Check {
        /// Stylesheet to compile
        #[arg(value_name = "SHEET")]
        sheet: PathBuf,
    },
    /// Lay out a JSON tree description against a stylesheet
    Layout {
        /// Stylesheet to apply
        #[arg(value_name = "SHEET")]
        sheet: PathBuf,

        /// JSON tree description
        #[arg(value_name = "TREE")]
        tree: PathBuf,

        /// Viewport width
        #[arg(long, default_value = "800")]
        width: f32,

        /// Viewport height
        #[arg(long, default_value = "600")]
        height: f32,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check { sheet } => check(&sheet),
        Command::Layout {
            sheet,
            tree,
            width,
            height,
            pretty,
        } => layout(&sheet, &tree, Size::new(width, height), pretty),
    }
}

/// Compile `path`, printing each diagnostic. Fails if there was any.
fn check(path: &Path) -> Result<()> {
    let (sheet, diagnostics) = compile(path)?;
    if diagnostics.is_empty() {
        println!(
            "{} {}: {} definitions",
            "ok".green().bold(),
            path.display(),
            sheet.definitions().len()
        );
        return Ok(());
    }

    for diagnostic in &diagnostics {
        print_diagnostic(path, diagnostic, "error");
    }
    anyhow::bail!("{} diagnostic(s) in {}", diagnostics.len(), path.display())
}

fn layout(sheet_path: &Path, tree_path: &Path, viewport: Size, pretty: bool) -> Result<()> {
    let (sheet, diagnostics) = compile(sheet_path)?;
    for diagnostic in &diagnostics {
        print_diagnostic(sheet_path, diagnostic, "warning");
    }

    let json = fs::read_to_string(tree_path)
        .with_context(|| format!("failed to read {}", tree_path.display()))?;
    let description: NodeDescription = serde_json::from_str(&json)
        .with_context(|| format!("invalid tree description in {}", tree_path.display()))?;

    let mut tree = ElementTree::new();
    let root = description.build(&mut tree);
    let mut doc = UiDocument::new(tree);
    doc.add_sheet(sheet);
    doc.update_layout(viewport);

    let output = dump(&doc, root);
    let text = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}

fn compile(path: &Path) -> Result<(Sheet, Vec<StyleError>)> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut diagnostics: Vec<StyleError> = Vec::new();
    let sheet = Sheet::compile(&source, &mut diagnostics);
    Ok((sheet, diagnostics))
}

fn print_diagnostic(path: &Path, diagnostic: &StyleError, level: &str) {
    let level = if level == "error" {
        level.red().bold().to_string()
    } else {
        level.yellow().bold().to_string()
    };
    eprintln!(
        "{}:{}:{}: {level}: {}",
        path.display(),
        diagnostic.line,
        diagnostic.column,
        diagnostic.message
    );
}
