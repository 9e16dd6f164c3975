use serde::Deserialize;

use super::error::ConfigError;
use crate::consts;

/// Which positions the force sum reads while a step is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceEvaluation {
    /// Every force in a step is computed from the positions at the start of
    /// the step. The result does not depend on body order.
    Snapshot,
    /// Bodies are advanced one after another, and later bodies see the
    /// already-moved positions of earlier ones.
    Sequential,
}

/// What to do when two bodies sit at exactly the same point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingularityPolicy {
    /// Fail the step with `SimulationError::SingularConfiguration`.
    Reject,
    /// Never let the distance in the force law drop below this value.
    /// Coincident bodies exert no force on each other.
    MinimumDistance(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub gravitational_constant: f64,
    pub trajectory_capacity: usize,
    pub trajectory_stride: usize,
    pub force_evaluation: ForceEvaluation,
    pub singularity: SingularityPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravitational_constant: consts::G,
            trajectory_capacity: consts::TRAJ_BUFF_SIZE,
            trajectory_stride: consts::TRAJ_RES,
            force_evaluation: ForceEvaluation::Snapshot,
            singularity: SingularityPolicy::Reject,
        }
    }
}

impl SimulationConfig {
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = self.gravitational_constant;
        if !(g.is_finite() && g > 0.0) {
            return Err(ConfigError::InvalidGravitationalConstant(g));
        }
        if self.trajectory_capacity == 0 {
            return Err(ConfigError::ZeroTrajectoryCapacity);
        }
        if self.trajectory_stride == 0 {
            return Err(ConfigError::ZeroTrajectoryStride);
        }
        if let SingularityPolicy::MinimumDistance(d) = self.singularity {
            if !(d.is_finite() && d > 0.0) {
                return Err(ConfigError::InvalidMinimumDistance(d));
            }
        }
        Ok(())
    }
}
