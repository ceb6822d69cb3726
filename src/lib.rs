pub mod consts;

pub mod vector;
pub mod matrix;
pub mod ray;

pub mod color;
pub mod light;

pub mod intersect;
pub mod shape;

pub mod camera;
pub mod scene;

pub mod config;

use consts::FEQ_EPSILON;

/// Checks whether two floats are equal within the crate-wide tolerance.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() <= FEQ_EPSILON
}

/// Checks whether two floats are equal within a caller-chosen tolerance.
pub fn feq_eps(left: f64, right: f64, epsilon: f64) -> bool {
    (left - right).abs() <= epsilon
}
