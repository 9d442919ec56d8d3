use crate::Args;
use crate::build::{Builder, SyntaxTable};

pub fn run(args: &Args) -> Result<(), anyhow::Error> {
    // Verbatim bundle files (license, readme) are taken from the
    // working directory
    let base_path = std::env::current_dir()?;

    let mut builder = Builder::new(args.root.clone(), args.output.clone(), base_path);
    if let Some(path) = &args.syntaxes {
        builder = builder.with_syntaxes(Box::new(SyntaxTable::from_path(path)?));
    }

    let result = builder.build()?;

    println!(
        "Built {} page record(s) to {}",
        result.pages,
        result.output_dir.display()
    );
    if !result.skipped.is_empty() {
        eprintln!("{} page(s) skipped due to errors:", result.skipped.len());
        for path in &result.skipped {
            eprintln!("  - {}", path.display());
        }
    }

    Ok(())
}
