//! k-nearest-neighbour selection
//!
//! Brute force: every query measures the distance to every other particle
//! and sorts, O(n log n) per query and O(n^2 log n) per frame. That is fine
//! for a few hundred particles; larger populations would want a spatial
//! index (quadtree or uniform grid) in place of this function.

use crate::simulation::states::Particle;
use crate::simulation::vector::distance;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize, // index into the particle slice
    pub distance: f64, // Euclidean distance to the query particle
}

/// The `k` particles closest to `particles[query]`, nearest first
///
/// The query is excluded by index, so another particle sitting on exactly the
/// same spot is still a neighbour. Equal distances keep slice order (the
/// sort is stable). Returns `min(k, n - 1)` entries.
pub fn nearest_neighbors(particles: &[Particle], query: usize, k: usize) -> Vec<Neighbor> {
    let Some(q) = particles.get(query) else {
        return Vec::new();
    };

    let mut candidates: Vec<Neighbor> = particles
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != query)
        .map(|(j, p)| Neighbor {
            index: j,
            distance: distance(&q.x, &p.x),
        })
        .collect();

    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates.truncate(k);
    candidates
}
