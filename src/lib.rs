pub mod error;
pub mod simulation;
pub mod configuration;
pub mod render;
pub mod visualization;
pub mod postprocess;
pub mod benchmark;

pub use error::{VectorError, ConfigError, ExportError, ToolError};

pub use simulation::vector::{NVec2, set_magnitude, distance};
pub use simulation::color::{Rgba, ColorConfig, Palette};
pub use simulation::states::{Particle, MassBounds, MeetingPoint, DesignatedPair, PointMass, System, attraction};
pub use simulation::params::{ForceLaw, Parameters};
pub use simulation::engine::Engine;
pub use simulation::neighbors::{Neighbor, nearest_neighbors};
pub use simulation::forces::{Contribution, Interaction, InteractionSet, NeighborGravity, MeetingPull, DesignatedMutual};
pub use simulation::integrator::{step, sequential_step, phased_step};
pub use simulation::snapshot::{FrameSnapshot, ParticleView};
pub use simulation::scenario::{Scenario, HaltReason};

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, WorldConfig, DesignatedConfig, MeetingPointConfig, RenderConfig, ExportConfig, StepModeConfig, MeetingPullConfig};

pub use render::{canvas::Canvas, export::FrameExporter, recorder::FrameRecorder};

pub use visualization::{viewer2d::run_2d, headless::{run_headless, RunSummary}};

pub use postprocess::downsize::{square_thumbnail, downsize_dir};
pub use postprocess::mosaic::{MosaicOptions, MosaicReport, TileLibrary, build_mosaic, make_mosaic};

pub use benchmark::benchmark::{bench_neighbors, bench_step};
