//! Conversions supporting the switch between f64 and f32 as the
//! primary float type.

use cgmath::{Matrix4, Point3, Vector3, Vector4};

#[cfg(not(feature = "single_precision"))]
pub use self::double::*;
#[cfg(feature = "single_precision")]
pub use self::single::*;

pub trait ToFloat {
    fn to_float(self) -> Float;
}

#[cfg(not(feature = "single_precision"))]
mod double {
    pub type Float = f64;
    use super::*;

    impl ToFloat for f32 {
        fn to_float(self) -> Float {
            self.into()
        }
    }

    impl ToFloat for f64 {
        fn to_float(self) -> Float {
            self
        }
    }
}

#[cfg(feature = "single_precision")]
mod single {
    pub type Float = f32;
    use super::*;

    impl ToFloat for f32 {
        fn to_float(self) -> Float {
            self
        }
    }

    impl ToFloat for f64 {
        fn to_float(self) -> Float {
            self as Float
        }
    }
}

impl ToFloat for u8 {
    fn to_float(self) -> Float {
        self.into()
    }
}

impl ToFloat for u64 {
    fn to_float(self) -> Float {
        self as Float
    }
}

/// Conversion to and from the plain f32 arrays that GL calls expect.
pub trait IntoArray {
    type Array;
    fn into_array(&self) -> Self::Array;
}

pub trait FromArray: IntoArray {
    fn from_array(array: Self::Array) -> Self;
}

impl IntoArray for Matrix4<Float> {
    type Array = [[f32; 4]; 4];

    fn into_array(&self) -> Self::Array {
        [
            self.x.into_array(),
            self.y.into_array(),
            self.z.into_array(),
            self.w.into_array(),
        ]
    }
}

impl IntoArray for Vector4<Float> {
    type Array = [f32; 4];

    fn into_array(&self) -> Self::Array {
        [self.x as f32, self.y as f32, self.z as f32, self.w as f32]
    }
}

impl IntoArray for Vector3<Float> {
    type Array = [f32; 3];

    fn into_array(&self) -> Self::Array {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl FromArray for Vector3<Float> {
    fn from_array(array: Self::Array) -> Self {
        Self::new(
            array[0].to_float(),
            array[1].to_float(),
            array[2].to_float(),
        )
    }
}

impl IntoArray for Point3<Float> {
    type Array = [f32; 3];

    fn into_array(&self) -> Self::Array {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl FromArray for Point3<Float> {
    fn from_array(array: Self::Array) -> Self {
        Self::new(
            array[0].to_float(),
            array[1].to_float(),
            array[2].to_float(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_array_round_trip() {
        let p = Point3::new(1.0, -2.5, 0.25);
        let arr = p.into_array();
        assert_eq!(arr, [1.0, -2.5, 0.25]);
        let back = Point3::from_array(arr);
        assert_eq!(back, p);
    }

    #[test]
    fn matrix_array_is_column_major() {
        let m = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let arr = m.into_array();
        assert_eq!(arr[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(arr[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
