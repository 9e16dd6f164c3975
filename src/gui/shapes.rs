use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Vector2};

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point2<f32>>
where
    F: Fn(S) -> Point2<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Vertices of a regular polygon approximating a circle, centered on the origin.
pub fn disc_outline(radius: f32, num_segments: usize) -> Vec<Point2<f32>> {
    let f = |theta: f32| Point2::new(radius * theta.cos(), radius * theta.sin());
    let mut points: Vec<_> =
        path_iter_parametric(f, 0.0, std::f32::consts::TAU, num_segments).collect();
    // The last point closes the loop onto the first; a polygon doesn't need it
    points.pop();
    points
}

/// Joins consecutive points with straight segments.
pub fn draw_path(window: &mut Window, points: &[Point2<f32>], color: &Point3<f32>) {
    for segment in points.windows(2) {
        window.draw_planar_line(&segment[0], &segment[1], color);
    }
}

/// Draws a short tick at each point, so that isolated samples stay visible.
pub fn draw_points<I: Iterator<Item = Point2<f32>>>(
    window: &mut Window,
    points: I,
    color: &Point3<f32>,
) {
    let half = Vector2::new(0.5, 0.0);
    for pt in points {
        window.draw_planar_line(&(pt - half), &(pt + half), color);
    }
}

/// Line segments for an arrow of the given length starting at `from` and
/// pointing at `towards`. Returns nothing when the two points coincide.
pub fn arrow_segments(
    from: Point2<f32>,
    towards: Point2<f32>,
    length: f32,
    head_length: f32,
) -> Vec<(Point2<f32>, Point2<f32>)> {
    let direction = match (towards - from).try_normalize(1e-6) {
        Some(d) => d,
        None => return vec![],
    };
    let tip = from + direction * length;

    // Arrowhead barbs are 30 degrees either side of the shaft
    let angle = direction.y.atan2(direction.x);
    let barb = |offset: f32| {
        let theta = angle + offset;
        tip - head_length * Vector2::new(theta.cos(), theta.sin())
    };
    let sixth = std::f32::consts::PI / 6.0;

    vec![
        (from, tip),
        (tip, barb(-sixth)),
        (tip, barb(sixth)),
    ]
}
