use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use titlecard::{CardRenderer, FrontMatter, LayoutConfig};
use titlecard_core::logging;
use titlecard_text::FontFamily;

/// Generate title card images from the front matter of Markdown files.
#[derive(Parser, Debug)]
#[command(name = "titlecard", author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the font family's files
    #[arg(short = 'f', long = "fontDir")]
    font_dir: Option<PathBuf>,

    /// Output directory, or a .png path when a single file is given
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Template image the card is drawn on
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Layout config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Markdown files to render
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_level(cli.verbose);

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            tracing::error!("{} of {} file(s) failed", failed, cli.files.len());
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Render every input and return how many failed.
fn run(cli: &Cli) -> Result<usize> {
    let mut config = match &cli.config {
        Some(path) => LayoutConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    if let Some(font_dir) = &cli.font_dir {
        config.font_dir = Some(font_dir.clone());
    }
    if let Some(template) = &cli.template {
        config.template = Some(template.clone());
    }

    let Some(font_dir) = config.font_dir.clone() else {
        bail!("no font directory given; pass --fontDir or set fontDir in the config");
    };
    let Some(template_path) = config.template.clone() else {
        bail!("no template given; pass --template or set template in the config");
    };

    let single_file = is_png_path(&cli.output);
    if single_file && cli.files.len() > 1 {
        bail!(
            "--output {} is a file but {} inputs were given",
            cli.output.display(),
            cli.files.len()
        );
    }

    let family = FontFamily::from_dir(&font_dir)
        .with_context(|| format!("failed to load fonts from {}", font_dir.display()))?;
    tracing::info!("Using font family '{}'", family.name());
    let template = image::open(&template_path)
        .with_context(|| format!("failed to open template {}", template_path.display()))?;

    let out_dir = if single_file {
        cli.output.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        cli.output.clone()
    };
    if !out_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
    }

    let renderer = CardRenderer::new(Arc::new(family), config);
    let now = chrono::Local::now().fixed_offset();

    let mut failed = 0;
    for file in &cli.files {
        let output = if single_file {
            cli.output.clone()
        } else {
            output_path(&cli.output, file)
        };
        match render_one(&renderer, &template, file, &output, now) {
            Ok(()) => tracing::info!("Saved {}", output.display()),
            Err(err) => {
                tracing::error!("{}: {:#}", file.display(), err);
                failed += 1;
            }
        }
    }
    Ok(failed)
}

fn render_one(
    renderer: &CardRenderer,
    template: &image::DynamicImage,
    file: &Path,
    output: &Path,
    now: chrono::DateTime<chrono::FixedOffset>,
) -> Result<()> {
    let front_matter =
        FrontMatter::from_path(file, now).context("failed to parse front matter")?;
    renderer
        .render_to_file(&front_matter, template, output)
        .context("failed to render card")?;
    Ok(())
}

fn is_png_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// `<dir>/<file stem>.png`
fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".png");
    dir.join(name)
}
