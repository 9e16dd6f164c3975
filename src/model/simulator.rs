use log::{debug, info, trace, warn};
use nalgebra::{Point2, Point3, Vector2};

use super::body::{Body, BodyID};
use super::config::{ForceEvaluation, SimulationConfig, SingularityPolicy};
use super::error::{ConfigError, SimulationError};
use crate::file::{BodyDefinition, SceneError};

/// Everything the renderer needs to draw one body for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBody {
    pub id: BodyID,
    pub position: Point2<f64>,
    pub radius: f64,
    pub color: Point3<f32>,
    pub trajectory: Vec<Point2<f64>>,
}

impl RenderedBody {
    fn from_body(id: BodyID, body: &Body) -> Self {
        let info = body.info();
        RenderedBody {
            id,
            position: body.position(),
            radius: info.radius,
            color: info.color,
            trajectory: body.sample_trajectory(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Simulator {
    // Invariant: bodies[i].id() == Some(BodyID(i))
    bodies: Vec<Body>,
    config: SimulationConfig,
    steps: u64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Simulator {
            bodies: vec![],
            config: SimulationConfig::default(),
            steps: 0,
        }
    }

    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Simulator {
            bodies: vec![],
            config,
            steps: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Registers a body and hands back its id.
    ///
    /// The body gets a fresh trajectory buffer sized and strided by this
    /// simulator's configuration.
    pub fn add_body(&mut self, body: Body) -> BodyID {
        let id = BodyID(self.bodies.len());
        let mut body = body.with_trajectory(
            self.config.trajectory_capacity,
            self.config.trajectory_stride,
        );
        body.assign_id(id);
        debug!(
            "Registered body {} at {} with mass {}",
            id,
            body.position(),
            body.mass()
        );
        self.bodies.push(body);
        id
    }

    /// Builds one body per definition and adds them in order.
    ///
    /// Either every definition becomes a body, or none do.
    pub fn load_scene(&mut self, definitions: &[BodyDefinition]) -> Result<Vec<BodyID>, SceneError> {
        let bodies = definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                definition
                    .to_body()
                    .map_err(|source| SceneError::InvalidBody { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ids = definitions
            .iter()
            .zip(bodies)
            .map(|(definition, body)| {
                info!("Adding {:?}", definition);
                self.add_body(body)
            })
            .collect();
        Ok(ids)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of completed calls to `step`.
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    pub fn pairwise_distance(a: &Body, b: &Body) -> f64 {
        nalgebra::distance(&a.position(), &b.position())
    }

    /// The gravitational pull on `a` due to `b`, pointing from `a` towards `b`.
    pub fn gravitational_force(&self, a: &Body, b: &Body) -> Result<Vector2<f64>, SimulationError> {
        let a_id = a.id().ok_or(SimulationError::UnregisteredBody)?;
        let b_id = b.id().ok_or(SimulationError::UnregisteredBody)?;
        self.force_law(
            (a_id, a.position(), a.mass()),
            (b_id, b.position(), b.mass()),
        )
    }

    fn force_law(
        &self,
        (a_id, a_pos, a_mass): (BodyID, Point2<f64>, f64),
        (b_id, b_pos, b_mass): (BodyID, Point2<f64>, f64),
    ) -> Result<Vector2<f64>, SimulationError> {
        let delta = b_pos - a_pos;
        let separation = delta.norm();

        let distance = match self.config.singularity {
            SingularityPolicy::Reject => {
                if separation == 0.0 {
                    warn!("Bodies {} and {} coincide at {}", a_id, b_id, a_pos);
                    return Err(SimulationError::SingularConfiguration { a: a_id, b: b_id });
                }
                separation
            }
            SingularityPolicy::MinimumDistance(min_distance) => {
                // No direction to pull in
                if separation == 0.0 {
                    return Ok(Vector2::zeros());
                }
                separation.max(min_distance)
            }
        };

        let g = self.config.gravitational_constant;
        let magnitude = g * a_mass * b_mass / (distance * distance);
        let force = delta * (magnitude / separation);

        if !force.iter().all(|f| f.is_finite()) {
            return Err(SimulationError::NonFiniteForce { a: a_id, b: b_id });
        }
        Ok(force)
    }

    /// Sum of the forces every other body exerts on body `i`, with every
    /// position read from `positions` rather than from the bodies themselves.
    fn net_force(&self, i: usize, positions: &[Point2<f64>]) -> Result<Vector2<f64>, SimulationError> {
        let bi = &self.bodies[i];
        let mut total = Vector2::zeros();
        for (j, bj) in self.bodies.iter().enumerate() {
            if bj.id() == bi.id() {
                continue;
            }
            total += self.force_law(
                (BodyID(i), positions[i], bi.mass()),
                (BodyID(j), positions[j], bj.mass()),
            )?;
        }
        Ok(total)
    }

    /// Advances every body by one unit of time.
    ///
    /// Each body's velocity is updated from its acceleration before its
    /// position is updated from the new velocity.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let mut positions: Vec<_> = self.bodies.iter().map(Body::position).collect();

        match self.config.force_evaluation {
            ForceEvaluation::Snapshot => {
                // Work out every acceleration before moving anything, so a
                // failed step leaves the bodies where they were.
                let accelerations = (0..self.bodies.len())
                    .map(|i| {
                        self.net_force(i, &positions)
                            .map(|force| force / self.bodies[i].mass())
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                for (body, acceleration) in self.bodies.iter_mut().zip(accelerations) {
                    body.update_velocity(acceleration);
                    body.update_position();
                }
            }
            ForceEvaluation::Sequential => {
                for i in 0..self.bodies.len() {
                    let acceleration = self.net_force(i, &positions)? / self.bodies[i].mass();
                    let body = &mut self.bodies[i];
                    body.update_velocity(acceleration);
                    body.update_position();
                    positions[i] = body.position();
                }
            }
        }

        self.steps += 1;
        trace!("Finished step {}", self.steps);
        Ok(())
    }

    /// Current drawable state of every body, without stepping.
    pub fn snapshot(&self) -> Vec<RenderedBody> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| RenderedBody::from_body(BodyID(i), body))
            .collect()
    }

    /// Steps once and returns what should be drawn for the new state.
    pub fn render_frame(&mut self) -> Result<Vec<RenderedBody>, SimulationError> {
        self.step()?;
        Ok(self.snapshot())
    }

    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.velocity() * b.mass())
            .sum()
    }

    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        if self.bodies.is_empty() {
            return None;
        }
        let total_mass: f64 = self.bodies.iter().map(Body::mass).sum();
        let weighted: Vector2<f64> = self
            .bodies
            .iter()
            .map(|b| b.position().coords * b.mass())
            .sum();
        Some(Point2::from(weighted / total_mass))
    }
}
