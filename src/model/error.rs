use thiserror::Error;

use super::body::BodyID;

/// Rejections raised while constructing a body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("initial position and velocity must be finite")]
    NonFiniteState,
    #[error("color components must lie in [0, 1], got ({r}, {g}, {b})")]
    ColorOutOfRange { r: f32, g: f32, b: f32 },
}

/// Numerical failures while advancing the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("bodies {a} and {b} occupy the same position")]
    SingularConfiguration { a: BodyID, b: BodyID },
    #[error("force between bodies {a} and {b} is not finite")]
    NonFiniteForce { a: BodyID, b: BodyID },
    #[error("body has not been added to a simulator")]
    UnregisteredBody,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("gravitational constant must be finite and positive, got {0}")]
    InvalidGravitationalConstant(f64),
    #[error("trajectory capacity must be at least 1")]
    ZeroTrajectoryCapacity,
    #[error("trajectory stride must be at least 1")]
    ZeroTrajectoryStride,
    #[error("minimum distance must be finite and positive, got {0}")]
    InvalidMinimumDistance(f64),
}
