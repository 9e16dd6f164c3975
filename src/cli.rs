use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::consts::DEFAULT_SCENE_FILE;
use crate::file::read_file;
use crate::model::{ForceEvaluation, SimulationConfig, SingularityPolicy, Simulator};

/// Physics settings shared by every binary. Anything given here overrides the
/// scene file's `settings` block.
#[derive(Debug, Clone, Default, Args)]
pub struct PhysicsArgs {
    /// Gravitational constant
    #[arg(long)]
    pub gravity: Option<f64>,

    /// Number of past positions kept per body
    #[arg(long)]
    pub trail_capacity: Option<usize>,

    /// Record a trail point every this many steps
    #[arg(long)]
    pub trail_stride: Option<usize>,

    /// Move bodies one at a time, letting later bodies see earlier ones' new positions
    #[arg(long)]
    pub sequential: bool,

    /// Floor the distance in the force law instead of failing on coincident bodies
    #[arg(long)]
    pub min_distance: Option<f64>,
}

impl PhysicsArgs {
    pub fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(g) = self.gravity {
            config.gravitational_constant = g;
        }
        if let Some(capacity) = self.trail_capacity {
            config.trajectory_capacity = capacity;
        }
        if let Some(stride) = self.trail_stride {
            config.trajectory_stride = stride;
        }
        if self.sequential {
            config.force_evaluation = ForceEvaluation::Sequential;
        }
        if let Some(d) = self.min_distance {
            config.singularity = SingularityPolicy::MinimumDistance(d);
        }
        config
    }
}

pub fn default_scene_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCENE_FILE)
}

/// Reads a scene and builds a simulator holding all of its bodies.
pub fn load_simulator(scene_path: &Path, physics: &PhysicsArgs) -> Result<Simulator> {
    let scene = read_file(scene_path)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;

    let config = physics.apply(scene.settings.unwrap_or_default());
    log::debug!("Simulation settings: {:?}", config);

    let mut simulator = Simulator::with_config(config).context("invalid simulation settings")?;
    simulator
        .load_scene(&scene.bodies)
        .with_context(|| format!("failed to load scene {}", scene_path.display()))?;
    Ok(simulator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = PhysicsArgs {
            gravity: Some(1.0),
            trail_capacity: None,
            trail_stride: Some(4),
            sequential: true,
            min_distance: Some(0.1),
        };
        let config = args.apply(SimulationConfig::default());
        assert_eq!(config.gravitational_constant, 1.0);
        assert_eq!(config.trajectory_capacity, 250);
        assert_eq!(config.trajectory_stride, 4);
        assert_eq!(config.force_evaluation, ForceEvaluation::Sequential);
        assert_eq!(config.singularity, SingularityPolicy::MinimumDistance(0.1));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = SimulationConfig::default().with_gravitational_constant(3.0);
        assert_eq!(PhysicsArgs::default().apply(config.clone()), config);
    }
}
