pub mod vector;
pub mod color;
pub mod states;
pub mod params;
pub mod engine;
pub mod neighbors;
pub mod forces;
pub mod integrator;
pub mod snapshot;
pub mod scenario;
