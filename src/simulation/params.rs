//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - the pairwise force law (`G` and the distance clamp),
//! - neighbour count `k` and the designated-pair amplification,
//! - per-frame mass drift,
//! - the seed every random draw derives from

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceLaw {
    pub g: f64, // gravitational constant
    pub min_distance: f64, // distances below this are treated as this
    pub max_distance: f64, // distances above this are treated as this
}

impl ForceLaw {
    /// Distance actually fed into the inverse-square law
    pub fn clamp_distance(&self, d: f64) -> f64 {
        d.clamp(self.min_distance, self.max_distance)
    }
}

impl Default for ForceLaw {
    fn default() -> Self {
        Self {
            g: 0.3,
            min_distance: 5.0,
            max_distance: 25.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub law: ForceLaw, // pairwise attraction
    pub k: usize, // neighbours per particle
    pub amplification: f64, // multiplier on designated-pair and meeting-point pulls
    pub mass_drift: f64, // mass changes by U(-drift, drift) each frame
    pub seed: u64, // deterministic seed
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            law: ForceLaw::default(),
            k: 5,
            amplification: 3.0,
            mass_drift: 0.1,
            seed: 42,
        }
    }
}
