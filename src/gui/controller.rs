use std::time::{Duration, Instant};

use kiss3d::event::{Action, Event, Key, WindowEvent};

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_SINGLE_STEP: Key = Key::N;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_TOGGLE_TRAILS: Key = Key::T;
const KEY_TOGGLE_FORCES: Key = Key::F;

const MAX_STEPS_PER_FRAME: usize = 64;

// FPS is averaged over windows at least this long
const FPS_WINDOW: Duration = Duration::from_secs(1);

pub struct Controller {
    steps_per_frame: usize,
    paused: bool,
    pending_single_step: bool,
    show_trails: bool,
    show_forces: bool,
    // Frame rate bookkeeping
    frames_in_window: u32,
    window_start: Instant,
    fps: f64,
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            steps_per_frame: 1,
            paused: false,
            pending_single_step: false,
            show_trails: true,
            show_forces: false,
            frames_in_window: 0,
            window_start: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn process_event(&mut self, event: Event) {
        match event.value {
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            WindowEvent::Key(KEY_SINGLE_STEP, Action::Press, _) => {
                if self.paused {
                    self.pending_single_step = true;
                }
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.steps_per_frame = (self.steps_per_frame * 2).min(MAX_STEPS_PER_FRAME);
                log::info!("Running {} steps per frame", self.steps_per_frame);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.steps_per_frame = (self.steps_per_frame / 2).max(1);
                log::info!("Running {} steps per frame", self.steps_per_frame);
            }
            WindowEvent::Key(KEY_TOGGLE_TRAILS, Action::Press, _) => {
                self.show_trails = !self.show_trails;
            }
            WindowEvent::Key(KEY_TOGGLE_FORCES, Action::Press, _) => {
                self.show_forces = !self.show_forces;
            }
            _ => {}
        }
    }

    /// How many simulation steps to run this frame. Consumes a pending single step.
    pub fn steps_this_frame(&mut self) -> usize {
        if !self.paused {
            return self.steps_per_frame;
        }
        if self.pending_single_step {
            self.pending_single_step = false;
            return 1;
        }
        0
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.pending_single_step = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn steps_per_frame(&self) -> usize {
        self.steps_per_frame
    }

    pub fn show_trails(&self) -> bool {
        self.show_trails
    }

    pub fn show_forces(&self) -> bool {
        self.show_forces
    }

    /// Frames per second over the last completed window.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn end_frame(&mut self) {
        self.frames_in_window += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed >= FPS_WINDOW {
            self.fps = f64::from(self.frames_in_window) / elapsed.as_secs_f64();
            self.frames_in_window = 0;
            self.window_start = Instant::now();
        }
    }
}
