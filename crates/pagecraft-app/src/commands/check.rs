use super::load_page;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Page or document JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn check(args: CheckArgs) -> Result<()> {
    let mut failed = 0;

    for file in &args.files {
        let page = match load_page(file) {
            Ok(page) => page,
            Err(e) => {
                failed += 1;
                eprintln!("  {} {} - {:#}", "✗".red(), file.display(), e);
                continue;
            }
        };

        let violations = page.content.violations();
        if violations.is_empty() {
            println!(
                "  {} {} ({} elements)",
                "✓".green(),
                file.display(),
                page.content.len()
            );
        } else {
            failed += 1;
            println!("  {} {}", "✗".red(), file.display());
            for violation in violations {
                println!("      {violation}");
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{failed} of {} files failed the check", args.files.len()));
    }
    Ok(())
}
