use std::collections::HashMap;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::{PlanarCamera, Sidescroll};
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::PlanarSceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation2, Vector2};

use super::controller::Controller;
use super::shapes::{arrow_segments, disc_outline, draw_path, draw_points};
use crate::consts::MESH_RES;
use crate::model::{BodyID, RenderedBody, SimulationError, Simulator};

// Fixed arrow size in world units, like the trail points these are only cues
const ARROW_LENGTH: f32 = 50.0;
const ARROW_HEAD_LENGTH: f32 = 20.0;

// Room left for the status text at the right edge, in physical pixels
const STATUS_TEXT_WIDTH: f32 = 500.0;

pub struct View {
    // Object state
    simulator: Simulator,
    frame: Vec<RenderedBody>,
    body_discs: HashMap<BodyID, PlanarSceneNode>,
    last_error: Option<SimulationError>,
    // Camera
    camera: Sidescroll,
}

impl View {
    pub fn new(simulator: Simulator, window: &mut Window) -> Self {
        // Same framing as an orthographic projection over the window, origin at the bottom left
        let mut camera = Sidescroll::new();
        let center = Point2::new(window.width() as f32 / 2.0, window.height() as f32 / 2.0);
        camera.look_at(center, 1.0);

        let frame = simulator.snapshot();
        let body_discs = frame
            .iter()
            .map(|body| (body.id, Self::create_body_object(window, body)))
            .collect();

        let mut view = Self {
            simulator,
            frame,
            body_discs,
            last_error: None,
            camera,
        };
        view.update_scene_objects();
        view
    }

    fn create_body_object(window: &mut Window, body: &RenderedBody) -> PlanarSceneNode {
        let outline = disc_outline(body.radius as f32, MESH_RES);
        let mut disc = window.add_convex_polygon(outline, Vector2::new(1.0, 1.0));
        let color = &body.color;
        disc.set_color(color.x, color.y, color.z);
        disc
    }

    /// Runs the simulation forward, stopping at the first failed step.
    pub fn advance(&mut self, num_steps: usize) -> Result<(), SimulationError> {
        for _ in 0..num_steps {
            match self.simulator.render_frame() {
                Ok(frame) => self.frame = frame,
                Err(err) => {
                    log::error!(
                        "Step {} failed: {}",
                        self.simulator.steps_taken() + 1,
                        err
                    );
                    self.last_error = Some(err.clone());
                    return Err(err);
                }
            }
        }
        self.update_scene_objects();
        Ok(())
    }

    fn update_scene_objects(&mut self) {
        for body in self.frame.iter() {
            if let Some(disc) = self.body_discs.get_mut(&body.id) {
                let position: Point2<f32> = nalgebra::convert(body.position);
                disc.set_local_translation(Translation2::from(position.coords));
            }
        }
    }

    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        if controller.show_trails() {
            self.draw_trails(window);
        }
        if controller.show_forces() {
            self.draw_force_arrows(window);
        }

        // Draw text
        let default_font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.left_hand_text(),
            &Point2::origin(),
            40.0,
            &default_font,
            &text_color,
        );
        window.draw_text(
            &self.status_text(controller),
            &status_text_origin(window.width(), window.scale_factor()),
            40.0,
            &default_font,
            &text_color,
        );
    }

    fn draw_trails(&self, window: &mut Window) {
        for body in self.frame.iter() {
            let points = body.trajectory.iter().map(|p| nalgebra::convert(*p));
            draw_points(window, points, &body.color);
        }
    }

    fn draw_force_arrows(&self, window: &mut Window) {
        let white = Point3::new(1.0, 1.0, 1.0);
        for a in self.frame.iter() {
            for b in self.frame.iter().filter(|b| b.id != a.id) {
                let from: Point2<f32> = nalgebra::convert(a.position);
                let towards: Point2<f32> = nalgebra::convert(b.position);
                for (start, end) in arrow_segments(from, towards, ARROW_LENGTH, ARROW_HEAD_LENGTH) {
                    draw_path(window, &[start, end], &white);
                }
            }
        }
    }

    fn left_hand_text(&self) -> String {
        let momentum = self.simulator.total_momentum();
        let center = self
            .simulator
            .center_of_mass()
            .map(|c| format!("({:.1}, {:.1})", c.x, c.y))
            .unwrap_or_else(|| String::from("N/A"));

        format!(
            "Bodies: {}
Step: {}
Momentum: ({:.3e}, {:.3e})
Center of mass: {}",
            self.simulator.len(),
            self.simulator.steps_taken(),
            momentum.x,
            momentum.y,
            center,
        )
    }

    fn status_text(&self, controller: &Controller) -> String {
        let state = match (&self.last_error, controller.is_paused()) {
            (Some(err), _) => format!("Stopped: {}", err),
            (None, true) => String::from("Paused"),
            (None, false) => String::from("Running"),
        };
        format!(
            "{}
Steps/frame: {}
FPS: {:.0}",
            state,
            controller.steps_per_frame(),
            controller.fps(),
        )
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (None, Some(&mut self.camera), None, None)
    }
}

// Text is positioned in physical pixels, while the window width is logical
fn status_text_origin(logical_width: u32, scale_factor: f64) -> Point2<f32> {
    let physical_width = logical_width as f32 * scale_factor as f32;
    Point2::new((physical_width - STATUS_TEXT_WIDTH).max(0.0), 0.0)
}
