use super::{load_page, open_output};
use anyhow::{anyhow, Result};
use clap::Args;
use pagecraft_render::{HtmlOptions, HtmlRenderer, RenderContext};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page or document JSON file
    pub file: PathBuf,

    /// Render the builder canvas instead of the public page
    #[arg(long)]
    pub editable: bool,

    /// Element to show as selected (editable mode)
    #[arg(long)]
    pub selected: Option<String>,

    /// Element to show as hovered (editable mode)
    #[arg(long)]
    pub hovered: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit HTML on a single line
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs) -> Result<()> {
    if !args.editable && (args.selected.is_some() || args.hovered.is_some()) {
        return Err(anyhow!("--selected and --hovered only apply with --editable"));
    }

    let page = load_page(&args.file)?;
    let options = if args.compact {
        HtmlOptions::compact()
    } else {
        HtmlOptions::default()
    };
    let renderer = HtmlRenderer::new(options);

    let mut out = open_output(args.output.as_ref())?;
    if args.editable {
        if let Some(id) = &args.selected {
            if !page.content.contains(id) {
                log::warn!("selected element {id} is not in the page");
            }
        }
        let ctx = RenderContext::editable(&page.content)
            .with_selected(args.selected.as_deref())
            .with_hovered(args.hovered.as_deref());
        renderer.render_to(&ctx, &mut out)?;
    } else {
        out.write_all(renderer.render_live_page(&page).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}
