//! BDD step definitions for the NightDriver monitor

pub mod container_steps;
pub mod dashboard_steps;
pub mod refresh_steps;
pub mod shell_steps;
