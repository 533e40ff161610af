use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::ScenarioConfig;
use crate::error::ConfigError;
use crate::simulation::integrator::{phased_step, sequential_step};
use crate::simulation::neighbors::nearest_neighbors;
use crate::simulation::scenario::Scenario;

/// Scenario with `n` particles and default everything else
fn make_scenario(n: usize) -> Result<Scenario, ConfigError> {
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.particle_count = n;
    Scenario::build_scenario(&cfg)
}

/// Time one full neighbour sweep (every particle queries once)
pub fn bench_neighbors() -> Result<(), ConfigError> {
    // Different population sizes to test
    let ns = [50, 100, 200, 400, 800, 1600];

    for n in ns {
        let scenario = make_scenario(n)?;
        let particles = &scenario.system.particles;
        let k = scenario.parameters.k;

        // Warm up
        for i in 0..n {
            let _ = nearest_neighbors(particles, i, k);
        }

        let t0 = Instant::now();
        let mut found = 0;
        for i in 0..n {
            found += nearest_neighbors(particles, i, k).len();
        }
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, sweep = {:8.6} s, neighbours = {found}", dt);
    }
    Ok(())
}

/// Time sequential against phased stepping for a range of n
pub fn bench_step() -> Result<(), ConfigError> {
    let ns = [50, 100, 200, 400, 800, 1600];
    let steps = 10; // frames per measurement

    for n in ns {
        let template = make_scenario(n)?;

        // Sequential
        let mut sys_seq = template.system.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(template.parameters.seed);
        sequential_step(&mut sys_seq, &template.forces, &template.parameters, &mut rng); // warm-up

        let t0 = Instant::now();
        for _ in 0..steps {
            sequential_step(&mut sys_seq, &template.forces, &template.parameters, &mut rng);
        }
        let seq_per_step = t0.elapsed().as_secs_f64() / steps as f64;

        // Phased
        let mut sys_ph = template.system.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(template.parameters.seed);
        phased_step(&mut sys_ph, &template.forces, &template.parameters, &mut rng); // warm-up

        let t1 = Instant::now();
        for _ in 0..steps {
            phased_step(&mut sys_ph, &template.forces, &template.parameters, &mut rng);
        }
        let ph_per_step = t1.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:5}, sequential step = {:8.6} s,   phased step = {:8.6} s", n, seq_per_step, ph_per_step);
    }
    Ok(())
}
