//! Frame steppers for the neighbour-gravity system
//!
//! Two ways to advance one frame, both driven by an `InteractionSet` and
//! `Parameters`:
//! - `sequential_step`: visit particles in order; apply the forces gathered
//!   for particle `i`, then integrate `i` before moving on
//! - `phased_step`: gather every particle's forces in parallel, apply them
//!   all, then integrate every particle

use rand::Rng;
use rayon::prelude::*;

use crate::configuration::config::StepModeConfig;
use super::engine::Engine;
use super::forces::{Contribution, InteractionSet};
use super::params::Parameters;
use super::states::System;

fn apply(sys: &mut System, contributions: &[Contribution]) {
    for c in contributions {
        sys.particles[c.target].apply_force(c.force);
    }
}

/// Advance the system by one frame, visiting particles in sequence order
///
/// Particle `i` is integrated as soon as its own visit is done, so later
/// visits in the same frame already see its new position. Forces that land
/// on `i` after its visit stay in its acceleration until the next frame.
pub fn sequential_step<R: Rng + ?Sized>(sys: &mut System, forces: &InteractionSet, params: &Parameters, rng: &mut R) {
    let n = sys.particles.len();
    if n == 0 { // no particles, nothing to do
        return;
    }

    let bounds = sys.bounds;
    for i in 0..n {
        // Forces are computed from the positions as they are right now
        let contributions = forces.gather(i, sys);
        apply(sys, &contributions);

        sys.particles[i].update(bounds, params.mass_drift, rng);
    }
    sys.frame += 1;
}

/// Advance the system by one frame with a barrier between accumulation and
/// integration
///
/// Gathering only reads the system and runs on the rayon pool. The gathered
/// forces are then applied on this thread in particle order, which keeps the
/// floating point sums identical from run to run. Integration starts only
/// after every force has landed.
pub fn phased_step<R: Rng + ?Sized>(sys: &mut System, forces: &InteractionSet, params: &Parameters, rng: &mut R) {
    let n = sys.particles.len();
    if n == 0 { // no particles, nothing to do
        return;
    }

    // Accumulate: parallel map over a frozen system
    let gathered: Vec<Vec<Contribution>> = {
        let frozen: &System = sys;
        (0..n).into_par_iter().map(|i| forces.gather(i, frozen)).collect()
    };

    // Reduce in sequence order
    for contributions in &gathered {
        apply(sys, contributions);
    }

    // Integrate
    let bounds = sys.bounds;
    for p in sys.particles.iter_mut() {
        p.update(bounds, params.mass_drift, rng);
    }
    sys.frame += 1;
}

/// Advance one frame with the stepper selected by `engine`
pub fn step<R: Rng + ?Sized>(sys: &mut System, forces: &InteractionSet, params: &Parameters, engine: &Engine, rng: &mut R) {
    match engine.step_mode {
        StepModeConfig::Sequential => sequential_step(sys, forces, params, rng),
        StepModeConfig::Phased => phased_step(sys, forces, params, rng),
    }
}
