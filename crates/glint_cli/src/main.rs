mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{SceneDescription, TextureCache};
use glint_renderer::build_raytracer;
use log::LevelFilter;
use std::path::Path;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(level) = args.log_level {
        logger.filter_level(level.into());
    } else if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
    }
    logger.init();

    log::info!("Starting Glint");

    let mut description = SceneDescription::from_path(&args.scene)
        .with_context(|| format!("Failed to read scene {}", args.scene.display()))?;

    if let Some(width) = args.width {
        description.width = width;
    }
    if let Some(height) = args.height {
        description.height = height;
    }
    if let Some(max_depth) = args.max_depth {
        description.max_depth = Some(max_depth);
    }

    let base_dir = args.scene.parent().unwrap_or_else(|| Path::new(""));
    let mut textures = TextureCache::with_base_dir(base_dir);
    let raytracer = build_raytracer(&description, &mut textures)
        .with_context(|| format!("Failed to build scene {}", args.scene.display()))?;

    let frame = raytracer.render();

    frame
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
