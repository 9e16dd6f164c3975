mod body;
mod config;
mod error;
mod simulator;
mod trajectory;

pub use body::{Body, BodyID, BodyInfo};
pub use config::{ForceEvaluation, SimulationConfig, SingularityPolicy};
pub use error::{BodyError, ConfigError, SimulationError};
pub use simulator::{RenderedBody, Simulator};
pub use trajectory::Trajectory;
