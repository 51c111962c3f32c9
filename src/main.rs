use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use core_types::{ContainerId, Size};
use layout::{FixedAdvanceMeasurer, LayoutSurface};
use truncate::{Content, Ellipsis, EllipsisOptions, OptionsError};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Truncate text or inline markup to fit a fixed-size box.
#[derive(Parser, Debug)]
#[command(name = "ellipsis")]
#[command(author, version, about = "Content-aware ellipsis truncation demo", long_about = None)]
struct Cli {
    /// TOML file with truncation options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parse TEXT as inline markup instead of plain text
    #[arg(short, long)]
    markup: bool,

    /// Container width in px
    #[arg(long, default_value = "160")]
    width: f32,

    /// Container height in px
    #[arg(long, default_value = "40")]
    height: f32,

    /// Content to truncate
    text: String,
}

fn load_options(path: Option<&Path>) -> Result<EllipsisOptions, OptionsError> {
    match path {
        Some(path) => EllipsisOptions::load(path),
        None => Ok(EllipsisOptions::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = match load_options(cli.config.as_deref()) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("ellipsis: {err}");
            return ExitCode::FAILURE;
        }
    };

    let content = if cli.markup {
        Content::markup(cli.text)
    } else {
        Content::from(cli.text)
    };
    let surface = LayoutSurface::new(
        ContainerId::from_raw(1),
        Size::new(cli.width, cli.height),
        FixedAdvanceMeasurer::default(),
    );
    let mut ellipsis = Ellipsis::new(surface, content, options);
    let report = ellipsis.mount().unwrap_or_else(|| ellipsis.apply_ellipsis());

    println!("{}", ellipsis.surface().content().to_markup());
    match report.truncated_at {
        Some(kept) => println!("truncated at {kept} chars ({} renders)", report.renders),
        None if report.overflowing => println!("overflowing, truncation disabled"),
        None => println!("fits ({} renders)", report.renders),
    }
    for line in ellipsis.surface_mut().lines() {
        let text: String = line.fragments.iter().map(|f| f.text.as_str()).collect();
        println!("| {text}");
    }
    ExitCode::SUCCESS
}
