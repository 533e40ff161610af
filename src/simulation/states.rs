//! Core state types for the neighbour-gravity simulation.
//!
//! - `Particle`    – a moving point mass with a display color
//! - `MeetingPoint` – a fixed point mass the designated pair is pulled toward
//! - `System`      – the particle collection, designated indices, world bounds
//!   and frame counter

use rand::Rng;

use crate::error::VectorError;
use crate::simulation::color::Rgba;
use crate::simulation::params::ForceLaw;
use crate::simulation::vector::{set_magnitude, NVec2, distance};

/// Anything that can take part in the attraction law
pub trait PointMass {
    fn position(&self) -> NVec2;
    fn mass(&self) -> f64;
}

/// Inclusive `[low, high]` range a particle's mass is kept in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBounds {
    pub low: f64,
    pub high: f64,
}

impl MassBounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn clamp(&self, m: f64) -> f64 {
        m.clamp(self.low, self.high)
    }

    pub fn contains(&self, m: f64) -> bool {
        self.low <= m && m <= self.high
    }
}

/// Attraction of `b` toward `a`
///
/// The returned vector points from `b` to `a`, so applying it to `b` pulls
/// `b` toward `a`. Its magnitude is `G * ma * mb / d^2` with `d` clamped by
/// `law`. Coincident positions have no direction and yield a zero force
pub fn attraction<A: PointMass, B: PointMass>(a: &A, b: &B, law: &ForceLaw) -> NVec2 {
    let direction = a.position() - b.position();
    let d = law.clamp_distance(direction.norm());
    let strength = law.g * a.mass() * b.mass() / (d * d);

    match set_magnitude(direction, strength) {
        Ok(force) => force,
        Err(VectorError::ZeroLength) => {
            log::trace!("coincident point masses, attraction dropped");
            NVec2::zeros()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration accumulated during the current frame
    pub m: f64, // mass
    pub mass_bounds: MassBounds, // m stays inside these after every update
    pub color: Rgba, // display color
}

impl Particle {
    pub fn new(x: NVec2, v: NVec2, m: f64, mass_bounds: MassBounds, color: Rgba) -> Self {
        Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
            mass_bounds,
            color,
        }
    }

    /// Turn a force into acceleration: `a += f / m`
    pub fn apply_force(&mut self, f: NVec2) {
        self.a += f / self.m;
    }

    /// Force pulling `other` toward `self`; apply it to `other`
    pub fn attraction_force<O: PointMass>(&self, other: &O, law: &ForceLaw) -> NVec2 {
        attraction(self, other, law)
    }

    /// Advance one frame
    ///
    /// Integrates velocity then position, clears the acceleration, lets the
    /// mass drift by `U(-mass_drift, mass_drift)` inside its bounds, and
    /// reflects off the walls of `[0, bounds.x] x [0, bounds.y]`. A reflection
    /// flips the sign of that velocity component and clamps the position back
    /// onto the wall; speed is kept
    pub fn update<R: Rng + ?Sized>(&mut self, bounds: NVec2, mass_drift: f64, rng: &mut R) {
        self.v += self.a;
        self.x += self.v;
        self.a = NVec2::zeros();

        if mass_drift > 0.0 {
            self.m += rng.gen_range(-mass_drift..mass_drift);
        }
        self.m = self.mass_bounds.clamp(self.m);

        for axis in 0..2 {
            let p = self.x[axis];
            if p < 0.0 || p > bounds[axis] {
                self.v[axis] = -self.v[axis];
                self.x[axis] = p.clamp(0.0, bounds[axis]);
            }
        }
    }
}

impl PointMass for Particle {
    fn position(&self) -> NVec2 {
        self.x
    }

    fn mass(&self) -> f64 {
        self.m
    }
}

/// Stationary attractor for the designated pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetingPoint {
    pub x: NVec2, // position
    pub m: f64, // mass
}

impl PointMass for MeetingPoint {
    fn position(&self) -> NVec2 {
        self.x
    }

    fn mass(&self) -> f64 {
        self.m
    }
}

/// The two particles with extra pulls, as indices into `System::particles`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignatedPair(pub usize, pub usize);

impl DesignatedPair {
    pub fn contains(&self, i: usize) -> bool {
        self.0 == i || self.1 == i
    }

    pub fn indices(&self) -> [usize; 2] {
        [self.0, self.1]
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub particles: Vec<Particle>, // fixed order; `designated` indexes into it
    pub designated: DesignatedPair, // set once at build time
    pub meeting_point: MeetingPoint,
    pub bounds: NVec2, // world width and height
    pub frame: u64, // completed frames
}

impl System {
    /// Current distance between the two designated particles
    pub fn designated_distance(&self) -> f64 {
        let DesignatedPair(i, j) = self.designated;
        distance(&self.particles[i].x, &self.particles[j].x)
    }
}
