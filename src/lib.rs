pub mod cli;
pub mod consts;
pub mod file;
pub mod gui;
pub mod model;
