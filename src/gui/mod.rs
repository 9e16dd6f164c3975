use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::model::Simulator;

mod controller;
mod shapes;
mod view;

pub struct Simulation {
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(simulator: Simulator, window: &mut Window) -> Self {
        Self {
            view: View::new(simulator, window),
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.controller.process_event(event);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        let num_steps = self.controller.steps_this_frame();
        if self.view.advance(num_steps).is_err() {
            // Nothing sensible to draw past a failed step; let the user look at it
            self.controller.pause();
        }
        self.view.prerender_scene(window, &self.controller);
        self.controller.end_frame();
    }
}
