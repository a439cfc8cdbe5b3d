use anyhow::Context;
use clap::Parser;
use log::info;
use regionmap::{Config, DensityMode, HeatmapRenderer, Region};
use std::path::{Path, PathBuf};

/// Render a previously exported region.csv as a heatmap.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Exported region file (lat,long,density,hasstop)
    input: PathBuf,

    /// Target image path
    output: PathBuf,

    /// Color by exported density instead of cell presence
    #[arg(long)]
    show_density: bool,

    /// JSON configuration file (TOML with the `toml` feature)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;

    #[cfg(feature = "toml")]
    if path.extension().is_some_and(|ext| ext == "toml") {
        return Ok(Config::from_toml(&text)?);
    }

    Ok(Config::from_json(&text)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let mode = if args.show_density {
        DensityMode::Density
    } else {
        DensityMode::Presence
    };

    info!("Loading {} ({:?})", args.input.display(), mode);
    let region = Region::from_density_file(&args.input, mode)
        .with_context(|| format!("loading {}", args.input.display()))?;

    HeatmapRenderer::new(config.render)
        .render_to_file(&region, &args.output)
        .with_context(|| format!("rendering {}", args.output.display()))?;

    Ok(())
}
