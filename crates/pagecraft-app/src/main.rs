//! `pagecraft` command line tool.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, drop_element, example, render, seo, CheckArgs, DropArgs, ExampleArgs, RenderArgs, SeoArgs};

/// PageCraft - render, check and edit page builder documents
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a page as the live HTML page or the editable canvas
    Render(RenderArgs),

    /// Report structural problems in page files
    Check(CheckArgs),

    /// Drop a new or existing element into a page
    Drop(DropArgs),

    /// Fill in SEO metadata for a page
    Seo(SeoArgs),

    /// Print an example page
    Example(ExampleArgs),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{:?}", cli.command);

    let result = match cli.command {
        Command::Render(args) => render(args),
        Command::Check(args) => check(args),
        Command::Drop(args) => drop_element(args),
        Command::Seo(args) => seo(args),
        Command::Example(args) => example(args),
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}
