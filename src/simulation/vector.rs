//! 2D vector helpers on top of nalgebra
//!
//! Add, subtract, scale and `norm` come straight from nalgebra's
//! `Vector2<f64>`. This module adds the two operations nalgebra does not
//! phrase the way the simulation needs: rescaling to a given magnitude and
//! point-to-point distance

use nalgebra::Vector2;

use crate::error::VectorError;

pub type NVec2 = Vector2<f64>;

/// Return `v` rescaled so its magnitude becomes `m`
///
/// A zero vector has no direction to keep, so it is reported as
/// [`VectorError::ZeroLength`] instead of dividing by zero
pub fn set_magnitude(v: NVec2, m: f64) -> Result<NVec2, VectorError> {
    let len = v.norm();
    if len == 0.0 {
        return Err(VectorError::ZeroLength);
    }
    Ok(v * (m / len))
}

/// Euclidean distance between two points
pub fn distance(a: &NVec2, b: &NVec2) -> f64 {
    (a - b).norm()
}
