use std::fmt;

use nalgebra::{Point2, Point3, Vector2};

use super::error::BodyError;
use super::trajectory::Trajectory;
use crate::consts;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

impl fmt::Display for BodyID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub mass: f64,
    pub radius: f64,
    pub color: Point3<f32>,
}

#[derive(Debug, Clone)]
pub struct Body {
    id: Option<BodyID>,
    info: BodyInfo,
    position: Point2<f64>,
    velocity: Vector2<f64>,
    trajectory: Trajectory,
    // How many update_position calls happen between trajectory samples
    stride: usize,
    steps: u64,
}

impl Body {
    pub fn new(
        initial_position: Point2<f64>,
        initial_velocity: Vector2<f64>,
        mass: f64,
        radius: f64,
        color: Point3<f32>,
    ) -> Result<Self, BodyError> {
        // Written this way so that NaN is rejected too
        if !(mass > 0.0) {
            return Err(BodyError::NonPositiveMass(mass));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(BodyError::InvalidRadius(radius));
        }
        let finite = initial_position.iter().all(|x| x.is_finite())
            && initial_velocity.iter().all(|v| v.is_finite());
        if !finite {
            return Err(BodyError::NonFiniteState);
        }
        if !color.iter().all(|c| (0.0..=1.0).contains(c)) {
            return Err(BodyError::ColorOutOfRange {
                r: color.x,
                g: color.y,
                b: color.z,
            });
        }

        Ok(Body {
            id: None,
            info: BodyInfo {
                mass,
                radius,
                color,
            },
            position: initial_position,
            velocity: initial_velocity,
            trajectory: Trajectory::new(consts::TRAJ_BUFF_SIZE),
            stride: consts::TRAJ_RES,
            steps: 0,
        })
    }

    /// Replaces the trajectory buffer with an empty one of the given capacity,
    /// sampled every `stride` position updates.
    pub fn with_trajectory(mut self, capacity: usize, stride: usize) -> Self {
        assert!(stride >= 1, "Trajectory stride must be at least 1");
        self.trajectory = Trajectory::new(capacity);
        self.stride = stride;
        self
    }

    /// The id handed out by the simulator, or `None` if the body was never added to one.
    pub fn id(&self) -> Option<BodyID> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: BodyID) {
        self.id = Some(id);
    }

    pub fn info(&self) -> &BodyInfo {
        &self.info
    }

    pub fn mass(&self) -> f64 {
        self.info.mass
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Number of times `update_position` has been called on this body.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Moves the body along its velocity for one unit of time.
    ///
    /// On every `stride`-th call (starting with the first), the position from
    /// before the move is recorded in the trajectory.
    pub fn update_position(&mut self) {
        if self.steps % self.stride as u64 == 0 {
            self.trajectory.record(self.position);
        }
        self.steps += 1;

        self.position += self.velocity;
    }

    pub fn update_velocity(&mut self, delta_v: Vector2<f64>) {
        self.velocity += delta_v;
    }

    /// Returns the recorded positions, oldest first.
    pub fn sample_trajectory(&self) -> Vec<Point2<f64>> {
        self.trajectory.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn white() -> Point3<f32> {
        Point3::new(1.0, 1.0, 1.0)
    }

    fn make_body(position: Point2<f64>, velocity: Vector2<f64>) -> Body {
        Body::new(position, velocity, 1.0, 2.0, white()).unwrap()
    }

    #[test]
    fn test_construction() {
        let body = Body::new(
            Point2::new(1.0, 2.0),
            Vector2::new(3.0, 4.0),
            5.0,
            6.0,
            Point3::new(0.1, 0.2, 0.3),
        )
        .unwrap();

        assert_eq!(body.id(), None);
        assert_eq!(body.position(), Point2::new(1.0, 2.0));
        assert_eq!(body.velocity(), Vector2::new(3.0, 4.0));
        assert_eq!(body.mass(), 5.0);
        assert_eq!(body.info().radius, 6.0);
        assert_eq!(body.info().color, Point3::new(0.1, 0.2, 0.3));
        assert_eq!(body.step_count(), 0);
        assert!(body.trajectory().is_empty());
        assert_eq!(body.trajectory().capacity(), consts::TRAJ_BUFF_SIZE);
        assert_eq!(body.trajectory().write_index(), 0);
    }

    #[test]
    fn test_rejects_bad_mass() {
        let make = |mass| Body::new(Point2::origin(), Vector2::zeros(), mass, 1.0, white());

        assert_eq!(make(0.0).unwrap_err(), BodyError::NonPositiveMass(0.0));
        assert_eq!(make(-3.0).unwrap_err(), BodyError::NonPositiveMass(-3.0));
        assert!(matches!(
            make(f64::NAN).unwrap_err(),
            BodyError::NonPositiveMass(_)
        ));
    }

    #[test]
    fn test_rejects_other_bad_fields() {
        let origin = Point2::origin();
        let still = Vector2::zeros();

        assert_eq!(
            Body::new(origin, still, 1.0, -1.0, white()).unwrap_err(),
            BodyError::InvalidRadius(-1.0)
        );
        assert_eq!(
            Body::new(Point2::new(f64::INFINITY, 0.0), still, 1.0, 1.0, white()).unwrap_err(),
            BodyError::NonFiniteState
        );
        assert_eq!(
            Body::new(origin, still, 1.0, 1.0, Point3::new(0.0, 2.0, 0.0)).unwrap_err(),
            BodyError::ColorOutOfRange {
                r: 0.0,
                g: 2.0,
                b: 0.0
            }
        );
        // Zero radius is fine, it's only used for drawing
        assert!(Body::new(origin, still, 1.0, 0.0, white()).is_ok());
    }

    #[test]
    fn test_update_velocity_accumulates() {
        let mut body = make_body(Point2::origin(), Vector2::new(1.0, 0.0));
        body.update_velocity(Vector2::new(0.5, -2.0));
        body.update_velocity(Vector2::new(1e12, 0.0));
        assert_relative_eq!(body.velocity(), Vector2::new(1e12 + 1.5, -2.0));
    }

    #[test]
    fn test_update_position_records_previous_position() {
        let mut body = make_body(Point2::new(1.0, 1.0), Vector2::new(2.0, -1.0));

        body.update_position();
        assert_eq!(body.position(), Point2::new(3.0, 0.0));
        assert_eq!(body.sample_trajectory(), vec![Point2::new(1.0, 1.0)]);

        body.update_position();
        assert_eq!(body.position(), Point2::new(5.0, -1.0));
        assert_eq!(
            body.sample_trajectory(),
            vec![Point2::new(1.0, 1.0), Point2::new(3.0, 0.0)]
        );
        assert_eq!(body.step_count(), 2);
    }

    #[test]
    fn test_stride_controls_sampling() {
        let mut body =
            make_body(Point2::origin(), Vector2::new(1.0, 0.0)).with_trajectory(10, 3);

        for _ in 0..7 {
            body.update_position();
        }

        // Samples taken on calls 0, 3 and 6, each before the move
        let xs: Vec<f64> = body.sample_trajectory().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 3.0, 6.0]);
    }

    #[test]
    fn test_strides_are_independent_between_bodies() {
        let mut fast = make_body(Point2::origin(), Vector2::new(1.0, 0.0)).with_trajectory(10, 2);
        let mut slow = make_body(Point2::origin(), Vector2::new(1.0, 0.0)).with_trajectory(10, 2);

        // Move one body more often than the other; each keeps its own cadence
        for _ in 0..4 {
            fast.update_position();
        }
        slow.update_position();

        assert_eq!(fast.trajectory().len(), 2);
        assert_eq!(slow.trajectory().len(), 1);
    }

    #[test]
    fn test_trajectory_wraps_after_capacity() {
        let capacity = consts::TRAJ_BUFF_SIZE;
        let extra = 7;
        let mut body = make_body(Point2::origin(), Vector2::new(1.0, 0.0));

        for _ in 0..capacity {
            body.update_position();
        }
        assert!(body.trajectory().is_full());
        assert_eq!(body.trajectory().len(), capacity);

        for _ in 0..extra {
            body.update_position();
        }
        let samples = body.sample_trajectory();
        assert_eq!(samples.len(), capacity);
        // Oldest surviving sample is the one recorded on call number `extra`
        assert_eq!(samples[0], Point2::new(extra as f64, 0.0));
        // Newest is the position right before the last move
        assert_eq!(
            *samples.last().unwrap(),
            Point2::new((capacity + extra - 1) as f64, 0.0)
        );
        assert!(samples.windows(2).all(|w| w[1].x - w[0].x == 1.0));
    }
}
