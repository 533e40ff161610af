//! Build a fully-initialized simulation scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario`, which contains:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with every particle at frame 0)
//! - active interaction terms (`InteractionSet`)
//! - the seeded random generator used for the initial state and mass drift
//!
//! The scenario is inserted into Bevy as a `Resource` by the viewer and
//! driven directly by the headless runner

use bevy::prelude::Resource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::{DesignatedConfig, ParametersConfig, ScenarioConfig};
use crate::error::ConfigError;
use crate::simulation::color::{Palette, Rgba};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{DesignatedMutual, InteractionSet, MeetingPull, NeighborGravity};
use crate::simulation::integrator::step;
use crate::simulation::params::{ForceLaw, Parameters};
use crate::simulation::snapshot::FrameSnapshot;
use crate::simulation::states::{DesignatedPair, MassBounds, MeetingPoint, Particle, System};
use crate::simulation::vector::NVec2;

/// Why a scenario stopped stepping
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HaltReason {
    Proximity { distance: f64 }, // designated pair came within `stop_distance`
    IterationBudget { frames: u64 }, // `max_iterations` reached with enforcement on
}

/// Bevy resource representing a fully-initialized simulation
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: InteractionSet,
    pub radius_scale: f64,
    pub rng: ChaCha8Rng,
    pub halted: Option<HaltReason>,
}

fn mass_bounds(range: [f64; 2]) -> Result<MassBounds, ConfigError> {
    let [low, high] = range;
    if !(low > 0.0 && low <= high) {
        return Err(ConfigError::MassBounds { low, high });
    }
    Ok(MassBounds::new(low, high))
}

/// Uniform draw from `[lo, hi)`, or `lo` when the range is empty
fn uniform<R: Rng>(rng: &mut R, [lo, hi]: [f64; 2]) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Both ends finite, and the span too, so `gen_range` cannot overflow
fn finite_range(field: &'static str, [low, high]: [f64; 2]) -> Result<(), ConfigError> {
    if !(low.is_finite() && high.is_finite() && (high - low).is_finite()) {
        return Err(ConfigError::NonFiniteRange { field, low, high });
    }
    Ok(())
}

fn validate(cfg: &ScenarioConfig) -> Result<(), ConfigError> {
    let p = &cfg.parameters;
    if p.particle_count < 2 {
        return Err(ConfigError::PopulationTooSmall(p.particle_count));
    }
    if p.k == 0 {
        return Err(ConfigError::ZeroNeighbors);
    }
    if cfg.designated.len() != 2 {
        return Err(ConfigError::DesignatedCount(cfg.designated.len()));
    }
    if !(p.min_distance > 0.0 && p.min_distance <= p.max_distance) {
        return Err(ConfigError::DistanceClamp { min: p.min_distance, max: p.max_distance });
    }
    let (width, height) = cfg.world.size();
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(ConfigError::WorldSize { width, height });
    }
    if cfg.export.every == 0 {
        return Err(ConfigError::ExportInterval);
    }
    // drift is drawn from (-d, d), whose span must stay finite too
    if !(p.mass_drift >= 0.0 && (2.0 * p.mass_drift).is_finite()) {
        return Err(ConfigError::MassDrift(p.mass_drift));
    }
    finite_range("initial_speed", p.initial_speed)?;
    finite_range("initial_mass", p.initial_mass)?;

    // Regular particles must start inside their bounds
    let bounds = mass_bounds(p.mass_bounds)?;
    for m in p.initial_mass {
        if !bounds.contains(m) {
            return Err(ConfigError::MassOutOfBounds { mass: m, low: bounds.low, high: bounds.high });
        }
    }
    for d in &cfg.designated {
        let bounds = mass_bounds(d.mass_bounds)?;
        if !bounds.contains(d.mass) {
            return Err(ConfigError::MassOutOfBounds { mass: d.mass, low: bounds.low, high: bounds.high });
        }
    }
    Ok(())
}

/// A regular particle at `x` with random velocity, mass and color
fn random_particle(x: NVec2, p: &ParametersConfig, bounds: MassBounds, palette: &Palette, rng: &mut ChaCha8Rng) -> Particle {
    let mut v = NVec2::new(uniform(rng, p.initial_speed), uniform(rng, p.initial_speed));
    // random direction per axis
    if rng.gen_bool(0.5) {
        v.x = -v.x;
    }
    if rng.gen_bool(0.5) {
        v.y = -v.y;
    }
    let m = uniform(rng, p.initial_mass);
    let color = palette.choose(rng);
    Particle::new(x, v, m, bounds, color)
}

fn designated_particle(d: &DesignatedConfig, world: NVec2) -> Result<Particle, ConfigError> {
    Ok(Particle::new(
        NVec2::new(d.position[0] * world.x, d.position[1] * world.y),
        NVec2::new(d.velocity[0], d.velocity[1]),
        d.mass,
        mass_bounds(d.mass_bounds)?,
        Rgba::try_from(&d.color)?,
    ))
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        validate(cfg)?;

        let p_cfg = &cfg.parameters;
        let mut rng = ChaCha8Rng::seed_from_u64(p_cfg.seed);
        let palette = Palette::from_config(&cfg.render.palette)?;
        let regular_bounds = mass_bounds(p_cfg.mass_bounds)?;

        let (width, height) = cfg.world.size();
        let world = NVec2::new(width, height);

        // Population: positions uniform over the world. The array is never
        // reordered after this point, the designated indices depend on it
        let mut particles: Vec<Particle> = Vec::with_capacity(p_cfg.particle_count);
        for _ in 0..p_cfg.particle_count {
            let x = NVec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
            particles.push(random_particle(x, p_cfg, regular_bounds, &palette, &mut rng));
        }

        // Meeting point: stationary, mass drawn like any regular particle
        let mp_cfg = &cfg.meeting_point;
        let drawn_mass = uniform(&mut rng, p_cfg.initial_mass);
        let meeting_point = MeetingPoint {
            x: NVec2::new(mp_cfg.position[0] * width, mp_cfg.position[1] * height),
            m: mp_cfg.mass.unwrap_or(drawn_mass),
        };

        // Designated pair: the first two slots, overridden with fixed state
        let designated = DesignatedPair(0, 1);
        for (slot, d) in designated.indices().into_iter().zip(&cfg.designated) {
            particles[slot] = designated_particle(d, world)?;
        }

        let system = System {
            particles,
            designated,
            meeting_point,
            bounds: world,
            frame: 0,
        };

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            law: ForceLaw {
                g: p_cfg.g,
                min_distance: p_cfg.min_distance,
                max_distance: p_cfg.max_distance,
            },
            k: p_cfg.k,
            amplification: p_cfg.amplification,
            mass_drift: p_cfg.mass_drift,
            seed: p_cfg.seed,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = &cfg.engine;
        let engine = Engine {
            step_mode: e_cfg.step_mode,
            meeting_pull: e_cfg.meeting_pull,
            stop_distance: e_cfg.stop_distance,
            max_iterations: e_cfg.max_iterations,
            enforce_max_iterations: e_cfg.enforce_max_iterations,
        };

        // Forces: neighbours first, then the meeting point, then the pair
        let forces = InteractionSet::new()
            .with(NeighborGravity {
                law: parameters.law,
                k: parameters.k,
            })
            .with(MeetingPull {
                law: parameters.law,
                amplification: parameters.amplification,
                mode: engine.meeting_pull,
            })
            .with(DesignatedMutual {
                law: parameters.law,
                amplification: parameters.amplification,
            });

        log::info!(
            "scenario built: {} particles in {:.0} x {:.0}, k = {}, G = {}, seed = {}",
            system.particles.len(),
            width,
            height,
            parameters.k,
            parameters.law.g,
            parameters.seed
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            radius_scale: cfg.render.radius_scale,
            rng,
            halted: None,
        })
    }

    fn budget_spent(&self) -> bool {
        self.engine.enforce_max_iterations && self.system.frame >= self.engine.max_iterations
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Step one frame unless a stop rule has fired
    ///
    /// Returns `true` when a frame was stepped.
    pub fn advance(&mut self) -> bool {
        if self.halted.is_some() {
            return false;
        }
        if self.budget_spent() {
            self.halted = Some(HaltReason::IterationBudget { frames: self.system.frame });
            return false;
        }

        let Scenario {
            engine,
            parameters,
            system,
            forces,
            rng,
            ..
        } = self;
        step(system, forces, parameters, engine, rng);

        let distance = self.system.designated_distance();
        log::debug!("frame {}: designated distance {:.3}", self.system.frame, distance);

        if let Some(limit) = self.engine.stop_distance {
            if distance < limit {
                log::info!("designated particles met at frame {} (distance {:.3})", self.system.frame, distance);
                self.halted = Some(HaltReason::Proximity { distance });
            }
        }
        if self.halted.is_none() && self.budget_spent() {
            log::info!("iteration budget of {} frames spent", self.engine.max_iterations);
            self.halted = Some(HaltReason::IterationBudget { frames: self.system.frame });
        }
        true
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.system.snapshot(self.radius_scale)
    }
}
