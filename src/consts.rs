use cgmath::{Point3, Vector3};

use crate::float::*;

#[cfg(not(feature = "single_precision"))]
pub use self::double::*;
#[cfg(feature = "single_precision")]
pub use self::single::*;

#[cfg(not(feature = "single_precision"))]
mod double {
    use super::*;

    pub const EPSILON: Float = 1e-10;
    pub const INFINITY: Float = std::f64::INFINITY;
}

#[cfg(feature = "single_precision")]
mod single {
    use super::*;

    pub const EPSILON: Float = 1e-5;
    pub const INFINITY: Float = std::f32::INFINITY;
}

/// Origin of the coordinate system.
pub const ORIGIN: Point3<Float> = Point3 {
    x: 0.0,
    y: 0.0,
    z: 0.0,
};

pub const ZERO_VECTOR: Vector3<Float> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 0.0,
};

/// Unit vectors for the conventional GL axes: x grows right, y grows up
/// and z grows out of the screen.
pub const RIGHT: Vector3<Float> = Vector3 {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};

pub const LEFT: Vector3<Float> = Vector3 {
    x: -1.0,
    y: 0.0,
    z: 0.0,
};

pub const UP: Vector3<Float> = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

pub const DOWN: Vector3<Float> = Vector3 {
    x: 0.0,
    y: -1.0,
    z: 0.0,
};

pub const OUT: Vector3<Float> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};

pub const IN: Vector3<Float> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: -1.0,
};
