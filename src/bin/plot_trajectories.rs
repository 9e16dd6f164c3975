use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use nalgebra::{Point2, Point3};
use plotters::prelude::*;

use rust_gsim::cli::{default_scene_path, load_simulator, PhysicsArgs};
use rust_gsim::model::RenderedBody;

/// Runs a scene without a window and plots where every body went
#[derive(Debug, Parser)]
struct Args {
    /// Scene file listing the initial bodies
    #[arg(default_value_os_t = default_scene_path())]
    scene: PathBuf,

    #[command(flatten)]
    physics: PhysicsArgs,

    /// Number of steps to simulate
    #[arg(long, default_value_t = 1000)]
    steps: usize,

    /// Where to write the image
    #[arg(long, default_value = "plots/trajectories.png")]
    output: PathBuf,

    /// Image size in pixels (square)
    #[arg(long, default_value_t = 800)]
    size: u32,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut simulator = load_simulator(&args.scene, &args.physics)?;

    // Full paths, independent of how many trail points the simulator keeps
    let mut frame = simulator.snapshot();
    let mut paths: Vec<Vec<Point2<f64>>> = frame.iter().map(|b| vec![b.position]).collect();
    for _ in 0..args.steps {
        frame = simulator.render_frame()?;
        for (path, body) in paths.iter_mut().zip(frame.iter()) {
            path.push(body.position);
        }
    }
    log::info!(
        "Simulated {} steps, writing {}",
        simulator.steps_taken(),
        args.output.display()
    );

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    draw_plot(&args.output, &frame, &paths, args.size)
        .map_err(|err| anyhow!("failed to draw {}: {}", args.output.display(), err))
}

fn draw_plot(
    name: &Path,
    bodies: &[RenderedBody],
    paths: &[Vec<Point2<f64>>],
    size: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (x_range, y_range) = bounds(paths.iter().flatten());

    let root = BitMapBackend::new(name, (size, size)).into_drawing_area();
    root.fill(&BLACK)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .axis_style(&WHITE)
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .light_line_style(&BLACK)
        .draw()?;

    for (body, path) in bodies.iter().zip(paths.iter()) {
        let color = to_rgb(&body.color);
        chart.draw_series(LineSeries::new(path.iter().map(|p| (p.x, p.y)), &color))?;
        chart.draw_series(std::iter::once(Circle::new(
            (body.position.x, body.position.y),
            4,
            color.filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn to_rgb(color: &Point3<f32>) -> RGBColor {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(channel(color.x), channel(color.y), channel(color.z))
}

// Square bounds around all the points, so that orbits aren't squashed
fn bounds<'a>(
    points: impl Iterator<Item = &'a Point2<f64>>,
) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let (mut min, mut max) = (
        Point2::new(f64::INFINITY, f64::INFINITY),
        Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    );
    for p in points {
        min = min.inf(p);
        max = max.sup(p);
    }
    if min.x > max.x {
        return (-1.0..1.0, -1.0..1.0);
    }

    let center = nalgebra::center(&min, &max);
    let half_width = ((max - min).amax() / 2.0).max(1.0) * 1.1;
    (
        (center.x - half_width)..(center.x + half_width),
        (center.y - half_width)..(center.y + half_width),
    )
}
