//! Read-only view of a frame for renderers

use super::color::Rgba;
use super::states::System;
use super::vector::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: NVec2,
    pub visual_radius: f64, // mass * radius scale
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub bounds: NVec2,
    pub particles: Vec<ParticleView>, // same order as System::particles
}

impl System {
    pub fn snapshot(&self, radius_scale: f64) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            bounds: self.bounds,
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    position: p.x,
                    visual_radius: p.m * radius_scale,
                    color: p.color,
                })
                .collect(),
        }
    }
}
