/*
 * Movers
 *
 * Opens a window full of movers that chase the pointer, each pulled by a
 * force whose strength is read from a Perlin noise field. The animation
 * itself runs on its own drive thread; the window only presents frames.
 *
 * Controls: Space pauses / resumes, S stops / starts, D toggles the debug
 * overlay. The panel exposes the same actions plus target FPS and the
 * attraction strength.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use movers::app::{self, Scene};
use movers::{logging, SceneConfig};

#[derive(Parser, Debug)]
#[command(about = "Force-steered 2D movers")]
struct Args {
    /// Scene description in YAML; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured target frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Override the configured number of bodies
    #[arg(long)]
    bodies: Option<usize>,
}

// load here to keep main clean
fn load_scene_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => SceneConfig::default(),
    };

    if let Some(fps) = args.fps {
        config.target_fps = fps;
    }
    if let Some(count) = args.bodies {
        config.bodies.count = count;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    logging::init();

    let args = Args::parse();
    let config = load_scene_config(&args)?;

    app::stage(Scene::build(config)?);

    nannou::app(app::model).update(app::update).run();

    Ok(())
}
