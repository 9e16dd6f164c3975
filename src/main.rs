use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use kiss3d::light::Light;
use kiss3d::window::Window;

use rust_gsim::cli::{default_scene_path, load_simulator, PhysicsArgs};
use rust_gsim::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use rust_gsim::gui::Simulation;

/// Interactive 2D gravity simulator
#[derive(Debug, Parser)]
struct Args {
    /// Scene file listing the initial bodies
    #[arg(default_value_os_t = default_scene_path())]
    scene: PathBuf,

    #[command(flatten)]
    physics: PhysicsArgs,

    /// Window width in pixels
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    height: u32,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let simulator = load_simulator(&args.scene, &args.physics)?;
    log::info!(
        "Loaded {} bodies from {}",
        simulator.len(),
        args.scene.display()
    );

    let mut window = Window::new_with_size("Gravity", args.width, args.height);
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));

    let simulation = Simulation::new(simulator, &mut window);
    window.render_loop(simulation);
    Ok(())
}
