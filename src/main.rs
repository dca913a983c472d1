//! PDF Outliner CLI
//!
//! Bidirectional converter between PDF outlines (bookmarks) and indented
//! plain-text TOC files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_outliner::{
    document::OutlineSource, export::export_outline, import::add_toc_outline, pdf::PdfDocument,
    tree,
};
use std::path::PathBuf;

/// PDF Outliner - convert between PDF outlines and indented TOC text
#[derive(Parser)]
#[command(name = "pdf-outliner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an outline to a PDF from an indented TOC text file
    Import {
        /// Path to the source PDF
        document: PathBuf,

        /// Path to the TOC text file (UTF-8, one entry per line)
        toc: PathBuf,

        /// Offset added to every page number, correcting for front matter
        #[arg(allow_negative_numbers = true)]
        page_offset: i64,
    },

    /// Export a PDF's outline to an indented TOC text file
    Export {
        /// Path to the source PDF
        document: PathBuf,

        /// Destination text file (overwritten if present)
        output: PathBuf,
    },

    /// Display a PDF's outline tree
    Show {
        /// Path to the PDF
        document: PathBuf,

        /// Output as JSON instead of a formatted tree
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            document,
            toc,
            page_offset,
        } => report(add_toc_outline(&document, &toc, page_offset)),
        Commands::Export { document, output } => report(export_outline(&document, &output)),
        Commands::Show { document, json } => cmd_show(document, json),
    }
}

/// Import and export report through their result message either way; the
/// error string is the outcome, not a process failure.
fn report(result: pdf_outliner::Result<String>) -> Result<()> {
    match result {
        Ok(message) => println!("{message}"),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn cmd_show(document: PathBuf, json: bool) -> Result<()> {
    if !document.exists() {
        println!("Error: No such file: {}", document.display());
        return Ok(());
    }

    let doc = PdfDocument::open(&document).context("Failed to open document")?;
    let outline = doc.outline().context("Failed to read outline")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else {
        println!(
            "{} ({} pages, {} outline entries)",
            document.display(),
            doc.page_count(),
            tree::entry_count(&outline)
        );
        print!("{}", tree::format_outline(&outline));
    }

    Ok(())
}
