//! CLI tool for rendering student name cards from roster workbooks.

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::{ClassGroup, Mode, ThemeRegistry};
use roster_render::CardRenderer;
use std::path::{Path, PathBuf};

/// Render one printable name card per class group in an Excel roster.
#[derive(Parser, Debug)]
#[command(name = "roster-cards")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input roster workbook (.xlsx)
    input: PathBuf,

    /// Column layout: "English Program" groups by Class, anything else by Stream
    #[arg(short, long, default_value = "English Program")]
    mode: String,

    /// Card color theme
    #[arg(short, long, default_value = "green-yellow")]
    theme: String,

    /// Number of student rows per card
    #[arg(short = 'n', long, default_value = "15")]
    per_card: usize,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// JSON file with extra themes (name -> {header, subheader, alt_row})
    #[arg(long)]
    themes: Option<PathBuf>,

    /// Font file to load; the first one is used for card text
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Print the class groups as JSON instead of rendering
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let themes = load_themes(args.themes.as_deref())?;
    // Fail on a bad theme name before reading the workbook
    themes.get(&args.theme)?;

    let mode = Mode::from_label(&args.mode);
    log::debug!("Loading {} in {} mode", args.input.display(), mode.label());

    let groups = roster_xlsx::load_classgroups(&args.input, mode, args.per_card)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    let renderer = CardRenderer::with_font_files(&args.fonts)
        .context("Failed to set up fonts")?
        .with_themes(themes);

    let written = render_all(&renderer, &groups, &args.output, &args.theme)?;
    println!(
        "Rendered {} card(s) to {}",
        written.len(),
        args.output.display()
    );

    Ok(())
}

/// Built-in themes plus any from `path`.
fn load_themes(path: Option<&Path>) -> Result<ThemeRegistry> {
    let mut themes = ThemeRegistry::builtin();
    if let Some(path) = path {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let count = themes
            .extend_from_json(&json)
            .with_context(|| format!("Invalid theme file {}", path.display()))?;
        log::debug!("Loaded {} theme(s) from {}", count, path.display());
    }
    Ok(themes)
}

/// Render every group in order, numbering cards from 1 across the whole run.
fn render_all(
    renderer: &CardRenderer,
    groups: &[ClassGroup],
    output: &Path,
    theme: &str,
) -> Result<Vec<PathBuf>> {
    let total = groups.len();
    let mut written = Vec::with_capacity(total);

    for (i, group) in groups.iter().enumerate() {
        let index = i + 1;
        let path = renderer
            .render_class_card(group, output, index, theme)
            .with_context(|| {
                format!("Failed to render card {} for {}/{}", index, group.cohort, group.name)
            })?;
        eprintln!("[{}/{}] {}", index, total, path.display());
        written.push(path);
    }

    Ok(written)
}
