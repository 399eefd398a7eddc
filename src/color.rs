use std::fmt;

use crate::float::*;

/// An RGBA color with components in the [0, 1] range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: Float,
    pub g: Float,
    pub b: Float,
    pub a: Float,
}

impl Color {
    pub const BLACK: Color = Color::with_alpha(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::with_alpha(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::with_alpha(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::with_alpha(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::with_alpha(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::with_alpha(1.0, 1.0, 0.0, 1.0);
    pub const CYAN: Color = Color::with_alpha(0.0, 1.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::with_alpha(1.0, 0.0, 1.0, 1.0);

    /// Opaque color from red, green and blue.
    pub const fn new(r: Float, g: Float, b: Float) -> Color {
        Color::with_alpha(r, g, b, 1.0)
    }

    pub const fn with_alpha(r: Float, g: Float, b: Float, a: Float) -> Color {
        Color { r, g, b, a }
    }

    /// Opaque color from 0-255 byte components.
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Color {
        Color::new(
            r.to_float() / 255.0,
            g.to_float() / 255.0,
            b.to_float() / 255.0,
        )
    }

    /// RGB components as f32, for GL parameters that take three floats.
    pub fn to_array3(&self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// RGBA components as f32.
    pub fn to_array4(&self) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, self.a as f32]
    }
}

impl Default for Color {
    fn default() -> Color {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(R:{},G:{},B:{},alpha:{})",
            self.r, self.g, self.b, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_match_components() {
        let c = Color::with_alpha(0.25, 0.5, 0.75, 0.125);
        assert_eq!(c.to_array3(), [0.25, 0.5, 0.75]);
        assert_eq!(c.to_array4(), [0.25, 0.5, 0.75, 0.125]);
    }

    #[test]
    fn bytes_scale_to_unit_range() {
        let c = Color::from_bytes(255, 0, 51);
        assert!((c.r - 1.0).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn default_is_opaque_white() {
        assert_eq!(Color::default(), Color::WHITE);
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Color::RED), "(R:1,G:0,B:0,alpha:1)");
    }
}
