use std::path::PathBuf;

use clap::Parser;

mod build;
mod commands;

/// Build a structured JSON data package from CSS reference pages.
#[derive(Parser)]
struct Args {
    /// Root path to scan for pages: a directory, or a single index.md
    root: PathBuf,

    /// Directory to write the data bundle to
    #[arg(short, long, default_value = "build")]
    output: PathBuf,

    /// Path to a JSON table of CSS value syntaxes (formal syntax is
    /// omitted from all records when not given)
    #[arg(short, long)]
    syntaxes: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    commands::build::run(&args)
}
