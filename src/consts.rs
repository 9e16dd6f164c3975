// Newton's gravitational constant, truncated the same way the scene files assume
pub const G: f64 = 6.67e-11;

// Trajectory sampling: one sample every TRAJ_RES steps, TRAJ_BUFF_SIZE samples kept
pub const TRAJ_RES: usize = 1;
pub const TRAJ_BUFF_SIZE: usize = 250;

// Number of segments used to approximate a body's disc
pub const MESH_RES: usize = 50;

pub const SCREEN_WIDTH: u32 = 1024;
pub const SCREEN_HEIGHT: u32 = 1024;

pub const DEFAULT_SCENE_FILE: &str = "config.json";
