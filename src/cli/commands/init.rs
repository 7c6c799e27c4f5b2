use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use sourcelines::config::project::CONFIG_FILE;
use sourcelines::SourceLines;

pub fn handle(path: &Path) -> Result<()> {
    println!("{}", "Initializing sourcelines...".bright_blue().bold());

    let config_path = path.join(CONFIG_FILE);
    let existed = config_path.exists();
    SourceLines::init(path).context("Failed to initialize sourcelines in the specified directory")?;

    if existed {
        println!("  {} Kept existing {}", "✓".bright_green(), config_path.display());
    } else {
        println!("  {} Created {}", "✓".bright_green(), config_path.display());
    }

    println!("\n{}", "Quick start:".bright_blue().bold());
    println!("  1. Export an analysis report as JSON");
    println!("  2. Run {}", "sourcelines decorate report.json -o lines.jsonl".bright_yellow());
    println!("  3. Run {} to list files with inconsistent data", "sourcelines check report.json".bright_yellow());

    Ok(())
}
