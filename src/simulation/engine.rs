//! High-level runtime engine settings
//!
//! Selects how a frame is stepped and when the run stops stepping

use crate::configuration::config::{MeetingPullConfig, StepModeConfig};

#[derive(Debug, Clone)]
pub struct Engine {
    pub step_mode: StepModeConfig, // sequential or phased
    pub meeting_pull: MeetingPullConfig, // which outer iterations pull toward the meeting point
    pub stop_distance: Option<f64>, // halt once the designated pair is this close
    pub max_iterations: u64, // frame budget
    pub enforce_max_iterations: bool, // false = budget is informational only
}
