//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]      – stepping mode, meeting-point pull, stop rules
//! - [`ParametersConfig`]  – force law, population, mass drift, seed
//! - [`WorldConfig`]       – page size and DPI that give the world bounds
//! - [`DesignatedConfig`]  – fixed start state for the two designated particles
//! - [`MeetingPointConfig`] – where the designated pair is pulled to
//! - [`RenderConfig`]      – background, palette, circle scale, window size
//! - [`ExportConfig`]      – periodic PNG export of the canvas
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty document is a valid scenario and a
//! file only needs to spell out what it changes.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   step_mode: "sequential"       # or "phased"
//!   meeting_pull: "designated"    # or "every_iteration"
//!   stop_distance: ~              # e.g. 20.0 to halt when the pair meets
//!   max_iterations: 2000
//!   enforce_max_iterations: false
//!
//! parameters:
//!   seed: 42
//!   G: 0.3
//!   k: 5
//!   particle_count: 50
//!   min_distance: 5.0
//!   max_distance: 25.0
//!   amplification: 3.0
//!   mass_drift: 0.1
//!   initial_mass: [0.5, 2.0]
//!   mass_bounds: [0.05, 3.0]
//!   initial_speed: [1.0, 2.0]
//!
//! world:
//!   page_width: 11.7
//!   page_height: 8.3
//!   dpi: 300.0
//!
//! designated:
//!   - position: [0.0, 0.125]      # fractions of the world size
//!     velocity: [3.0, 5.0]
//!     mass: 3.0
//!     mass_bounds: [2.0, 5.0]
//!     color: "#000000"
//!   - position: [1.0, 0.875]
//!     velocity: [-3.0, -5.0]
//!     mass: 3.0
//!     mass_bounds: [2.0, 5.0]
//!     color: [255, 255, 255]
//!
//! meeting_point:
//!   position: [0.75, 0.5]
//!
//! render:
//!   background: "#dbd5b5"
//!   palette: ["#44AF69", [68, 175, 105, 90]]
//!   radius_scale: 10.0
//!
//! export:
//!   every: 100
//!   output_dir: "frames"
//! ```

use serde::Deserialize;

use crate::simulation::color::ColorConfig;

/// How a frame is stepped
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepModeConfig {
    #[default]
    #[serde(rename = "sequential")] // Each particle integrates right after its own forces are applied
    Sequential,

    #[serde(rename = "phased")] // Gather all forces (in parallel), then integrate everything
    Phased,
}

/// Which outer-loop visits pull the designated particles toward the meeting point
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeetingPullConfig {
    #[default]
    #[serde(rename = "designated")] // Only when the visited particle is itself designated
    Designated,

    #[serde(rename = "every_iteration")] // Both designated particles, on every visit
    EveryIteration,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub step_mode: StepModeConfig, // Frame stepping strategy
    pub meeting_pull: MeetingPullConfig, // Meeting-point pull schedule
    pub stop_distance: Option<f64>, // Halt when the designated pair is closer than this; off when absent
    pub max_iterations: u64, // Frame budget; default length of a headless run
    pub enforce_max_iterations: bool, // `true` - stop stepping once the budget is spent
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_mode: StepModeConfig::Sequential,
            meeting_pull: MeetingPullConfig::Designated,
            stop_distance: None,
            max_iterations: 2000,
            enforce_max_iterations: false,
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub seed: u64, // deterministic seed to make runs reproducible
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    pub k: usize, // neighbours per particle
    pub particle_count: usize, // population size, designated pair included
    pub min_distance: f64, // lower distance clamp
    pub max_distance: f64, // upper distance clamp
    pub amplification: f64, // multiplier on designated-pair and meeting-point pulls
    pub mass_drift: f64, // per-frame mass noise amplitude
    pub initial_mass: [f64; 2], // regular particles draw their mass from this range
    pub mass_bounds: [f64; 2], // regular particles keep their mass in this range
    pub initial_speed: [f64; 2], // per-axis speed range, sign chosen at random
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            g: 0.3,
            k: 5,
            particle_count: 50,
            min_distance: 5.0,
            max_distance: 25.0,
            amplification: 3.0,
            mass_drift: 0.1,
            initial_mass: [0.5, 2.0],
            mass_bounds: [0.05, 3.0],
            initial_speed: [1.0, 2.0],
        }
    }
}

/// World size expressed as a printed page
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub page_width: f64, // inches
    pub page_height: f64, // inches
    pub dpi: f64, // pixels per inch
}

impl WorldConfig {
    /// World bounds in simulation units (pixels)
    pub fn size(&self) -> (f64, f64) {
        (self.page_width * self.dpi, self.page_height * self.dpi)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        // A4 landscape at 300 dpi
        Self {
            page_width: 11.7,
            page_height: 8.3,
            dpi: 300.0,
        }
    }
}

/// Fixed start state for one designated particle
#[derive(Deserialize, Debug, Clone)]
pub struct DesignatedConfig {
    pub position: [f64; 2], // fractions of the world width and height
    pub velocity: [f64; 2], // simulation units per frame
    pub mass: f64,
    pub mass_bounds: [f64; 2],
    pub color: ColorConfig,
}

impl DesignatedConfig {
    pub fn defaults() -> Vec<DesignatedConfig> {
        vec![
            DesignatedConfig {
                position: [0.0, 1.0 / 8.0],
                velocity: [3.0, 5.0],
                mass: 3.0,
                mass_bounds: [2.0, 5.0],
                color: ColorConfig::hex("#000000"),
            },
            DesignatedConfig {
                position: [1.0, 7.0 / 8.0],
                velocity: [-3.0, -5.0],
                mass: 3.0,
                mass_bounds: [2.0, 5.0],
                color: ColorConfig::hex("#ffffff"),
            },
        ]
    }
}

/// The fixed attractor of the designated pair
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MeetingPointConfig {
    pub position: [f64; 2], // fractions of the world width and height
    pub mass: Option<f64>, // drawn like a regular particle's mass when absent
}

impl Default for MeetingPointConfig {
    fn default() -> Self {
        Self {
            position: [0.75, 0.5],
            mass: None,
        }
    }
}

/// How frames are drawn
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RenderConfig {
    pub background: ColorConfig,
    pub palette: Vec<ColorConfig>, // regular particles pick one uniformly
    pub radius_scale: f64, // circle radius = mass * radius_scale
    pub window_width: f32, // viewer window width in logical pixels; height follows the world aspect
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: ColorConfig::hex("#dbd5b5"),
            palette: vec![
                ColorConfig::hex("#44AF69"),
                ColorConfig::hex("#F8333C"),
                ColorConfig::hex("#FCAB10"),
                ColorConfig::hex("#2B9EB3"),
                ColorConfig::Components(vec![68, 175, 105, 90]),
                ColorConfig::Components(vec![248, 51, 60, 90]),
                ColorConfig::Components(vec![252, 171, 16, 90]),
                ColorConfig::Components(vec![43, 158, 179, 90]),
            ],
            radius_scale: 10.0,
            window_width: 1170.0,
        }
    }
}

/// Periodic PNG export of the accumulated canvas
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ExportConfig {
    pub enabled: bool,
    pub every: u64, // frames between exports
    pub output_dir: String,
    pub prefix: String, // files are named `{prefix}_{frame:06}.png`
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            every: 100,
            output_dir: "frames".to_string(),
            prefix: "image".to_string(),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub world: WorldConfig, // World bounds
    pub designated: Vec<DesignatedConfig>, // Exactly two entries
    pub meeting_point: MeetingPointConfig, // Target of the designated pair
    pub render: RenderConfig, // Drawing settings
    pub export: ExportConfig, // Frame export settings
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            world: WorldConfig::default(),
            designated: DesignatedConfig::defaults(),
            meeting_point: MeetingPointConfig::default(),
            render: RenderConfig::default(),
            export: ExportConfig::default(),
        }
    }
}
