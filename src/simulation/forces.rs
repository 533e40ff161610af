//! Force contributors for the simulation step
//!
//! Each term implements [`Interaction`]: while the step visits particle `i`,
//! the term reports which particles receive which forces. Terms only read
//! the system, so gathering may run on many threads; applying the gathered
//! forces is left to the integrator.

use crate::configuration::config::MeetingPullConfig;
use crate::simulation::neighbors::nearest_neighbors;
use crate::simulation::params::ForceLaw;
use crate::simulation::states::{attraction, DesignatedPair, System};
use crate::simulation::vector::NVec2;

/// One force destined for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub target: usize, // particle receiving the force
    pub force: NVec2,
}

/// Trait for force sources visited once per outer-loop particle
/// Implementations push their forces into `out` in the order they should be
/// applied
pub trait Interaction {
    fn contributions(&self, i: usize, sys: &System, out: &mut Vec<Contribution>);
}

/// Ordered collection of interaction terms
pub struct InteractionSet {
    terms: Vec<Box<dyn Interaction + Send + Sync>>,
}

impl InteractionSet {
    /// Create an empty interaction set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an interaction term; terms are evaluated in insertion order
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Interaction + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every force produced while visiting particle `i`
    pub fn gather(&self, i: usize, sys: &System) -> Vec<Contribution> {
        let mut out = Vec::new();
        for term in &self.terms {
            term.contributions(i, sys, &mut out);
        }
        out
    }
}

impl Default for InteractionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Attraction from particle `i` onto each of its `k` nearest neighbours
///
/// Only the neighbour is pulled (toward `i`); `i` itself is pulled by these
/// particles only if it shows up in their own neighbour lists. No reaction
/// force is added here.
pub struct NeighborGravity {
    pub law: ForceLaw,
    pub k: usize,
}

impl Interaction for NeighborGravity {
    fn contributions(&self, i: usize, sys: &System, out: &mut Vec<Contribution>) {
        let p = &sys.particles[i];
        for n in nearest_neighbors(&sys.particles, i, self.k) {
            out.push(Contribution {
                target: n.index,
                force: p.attraction_force(&sys.particles[n.index], &self.law),
            });
        }
    }
}

/// Amplified pull of the designated particles toward the meeting point
pub struct MeetingPull {
    pub law: ForceLaw,
    pub amplification: f64,
    pub mode: MeetingPullConfig,
}

impl Interaction for MeetingPull {
    fn contributions(&self, i: usize, sys: &System, out: &mut Vec<Contribution>) {
        let pulled = sys.designated.indices().into_iter().filter(|&d| match self.mode {
            MeetingPullConfig::Designated => d == i,
            MeetingPullConfig::EveryIteration => true,
        });

        for d in pulled {
            let force = attraction(&sys.meeting_point, &sys.particles[d], &self.law);
            out.push(Contribution {
                target: d,
                force: force * self.amplification,
            });
        }
    }
}

/// Amplified attraction between the two designated particles
///
/// Emitted on every outer-loop visit regardless of `i`, so over a frame the
/// pair receives this force once per particle in the population.
pub struct DesignatedMutual {
    pub law: ForceLaw,
    pub amplification: f64,
}

impl Interaction for DesignatedMutual {
    fn contributions(&self, _i: usize, sys: &System, out: &mut Vec<Contribution>) {
        let DesignatedPair(a, b) = sys.designated;
        let pa = &sys.particles[a];
        let pb = &sys.particles[b];

        // b toward a, then a toward b
        out.push(Contribution {
            target: b,
            force: pa.attraction_force(pb, &self.law) * self.amplification,
        });
        out.push(Contribution {
            target: a,
            force: pb.attraction_force(pa, &self.law) * self.amplification,
        });
    }
}
