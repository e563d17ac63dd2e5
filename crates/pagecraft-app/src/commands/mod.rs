pub mod check;
pub mod edit;
pub mod example;
pub mod render;

pub use check::{check, CheckArgs};
pub use edit::{drop_element, seo, DropArgs, SeoArgs};
pub use example::{example, ExampleArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use pagecraft_core::{Document, Page};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Load a page file. A bare `{ "elements": [...] }` document is accepted
/// too and wrapped in a new draft page.
pub fn load_page(path: &Path) -> Result<Page> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_page(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_page(json: &str) -> Result<Page> {
    match Page::from_json(json) {
        Ok(page) => Ok(page),
        Err(page_err) => {
            let document = Document::from_json(json).map_err(|_| page_err)?;
            log::debug!("input is a bare document, wrapping it in a new page");
            let mut page = Page::new("Untitled", "untitled");
            page.content = document;
            Ok(page)
        }
    }
}

/// Write `contents` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&PathBuf>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{contents}"),
    }
    Ok(())
}

/// A buffered writer for `output`, or stdout when no path is given.
pub fn open_output(output: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
