//! Utilities for OpenGL programs: vertex buffers with configurable channel
//! layout, polygon iteration over the common topologies, ray picking against
//! buffered geometry and small helpers for colors, textures and frame timing.

mod buffer;
mod color;
pub mod consts;
mod error;
mod float;
mod frame_rate;
mod geometry;
mod gpu;
mod intersect;
mod polygon;
mod texture;

pub use crate::buffer::{AttributeBuffer, ColorFormat, LayoutMode, TexCoordFormat, VertexFormat};
pub use crate::color::Color;
pub use crate::error::{Error, Result};
pub use crate::float::{Float, FromArray, IntoArray, ToFloat};
pub use crate::frame_rate::FrameRateCounter;
pub use crate::geometry::{ChannelSelection, Geometry, PolygonCursor, Topology};
pub use crate::gpu::{GpuGeometry, RawVertex};
pub use crate::intersect::{Intersection, IntersectionTester, Ray};
pub use crate::polygon::Polygon;
pub use crate::texture::Texture;
