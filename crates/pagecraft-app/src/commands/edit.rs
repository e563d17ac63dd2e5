//! Commands that edit a page file through a builder session.

use super::{load_page, write_output};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use pagecraft_core::{
    BuilderConfig, Canvas, DragEvent, DragSource, DropTarget, ElementId, ElementKind, TemplateSeoGenerator,
};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DropArgs {
    /// Page or document JSON file
    pub file: PathBuf,

    /// Add a new element of this type (Section, Grid, Heading, Text, Button, Image)
    #[arg(
        long = "new",
        value_parser = palette_kind,
        conflicts_with = "move_id",
        required_unless_present = "move_id"
    )]
    pub new_kind: Option<ElementKind>,

    /// Move the element with this id
    #[arg(long = "move")]
    pub move_id: Option<String>,

    /// Droppable id to drop on: `placeholder-root`, `placeholder-<id>` or `<id>`
    #[arg(long)]
    pub target: String,

    /// Allow a Grid right next to another Grid
    #[arg(long)]
    pub allow_adjacent_grids: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse a palette item. Columns only come with their Grid.
fn palette_kind(s: &str) -> Result<ElementKind, String> {
    let kind: ElementKind = s.parse()?;
    if kind.in_palette() {
        return Ok(kind);
    }
    let offered: Vec<&str> = ElementKind::PALETTE.iter().map(|(kind, _)| kind.name()).collect();
    Err(format!("{kind} is not in the palette (expected one of {})", offered.join(", ")))
}

pub fn drop_element(args: DropArgs) -> Result<()> {
    let page = load_page(&args.file)?;
    let config = BuilderConfig {
        reject_adjacent_grids: !args.allow_adjacent_grids,
        ..BuilderConfig::default()
    };
    let mut canvas = Canvas::new(page, config);

    let source = match (args.new_kind, args.move_id) {
        (Some(kind), _) => DragSource::Palette(kind),
        (None, Some(id)) => DragSource::Existing(ElementId::from(id)),
        (None, None) => return Err(anyhow!("either --new or --move is required")),
    };

    canvas.handle_drag(DragEvent::Start(source))?;
    let placed = canvas
        .handle_drag(DragEvent::Drop(Some(DropTarget::parse(&args.target))))?
        .ok_or_else(|| anyhow!("drop was not applied"))?;
    log::info!("placed {placed}");

    write_output(args.output.as_ref(), &canvas.page().to_json()?)
}

#[derive(Debug, Args)]
pub struct SeoArgs {
    /// Page JSON file
    pub file: PathBuf,

    /// Site name used in the generated metadata
    #[arg(long)]
    pub site: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn seo(args: SeoArgs) -> Result<()> {
    let page = load_page(&args.file)?;
    let mut canvas = Canvas::new(page, BuilderConfig::default());

    let request = canvas.seo_request(&args.site);
    let metadata = TemplateSeoGenerator::new()
        .build(&request)
        .context("Could not generate metadata")?;
    canvas.apply_seo(Ok(metadata));
    log::info!("SEO score {}", canvas.page().seo.ai_seo_score);

    write_output(args.output.as_ref(), &canvas.page().to_json()?)
}
