use cgmath::{Point3, Vector3};

use crate::float::*;

/// Largest face a polygon can hold (a quad).
pub const MAX_VERTICES: usize = 4;

/// One face copied out of a geometry: up to four vertices with their
/// optional texture coordinate, color and normal attributes.
///
/// A polygon is a plain value, so a copy taken with `clone` stays valid
/// after the cursor that produced it moves on. Attribute storage is
/// inline and fixed size; building one never allocates.
#[derive(Clone, Debug)]
pub struct Polygon {
    face_size: usize,
    count: usize,
    positions: [[Float; 3]; MAX_VERTICES],
    tex_coords: [[Float; 4]; MAX_VERTICES],
    tex_components: usize,
    colors: [[Float; 4]; MAX_VERTICES],
    color_components: usize,
    normals: [[Float; 3]; MAX_VERTICES],
}

impl Polygon {
    /// An empty polygon that will hold faces of `face_size` vertices
    /// (3 or 4).
    pub fn new(face_size: usize) -> Polygon {
        assert!(
            face_size == 3 || face_size == 4,
            "face size must be 3 or 4, got {}",
            face_size
        );
        Polygon {
            face_size,
            count: 0,
            positions: [[0.0; 3]; MAX_VERTICES],
            tex_coords: [[0.0; 4]; MAX_VERTICES],
            tex_components: 0,
            colors: [[0.0; 4]; MAX_VERTICES],
            color_components: 0,
            normals: [[0.0; 3]; MAX_VERTICES],
        }
    }

    pub fn face_size(&self) -> usize {
        self.face_size
    }

    /// Vertices added so far.
    pub fn vertex_count(&self) -> usize {
        self.count
    }

    /// Appends the position of the current vertex and advances to the
    /// next one. Panics when the face is already complete.
    pub fn add_vertex(&mut self, position: Point3<Float>) {
        assert!(self.count < self.face_size, "polygon face is complete");
        self.positions[self.count] = [position.x, position.y, position.z];
        self.count += 1;
    }

    /// Records the texture coordinate of the current vertex (2 to 4
    /// components) without advancing it.
    pub fn add_tex_coord(&mut self, tex_coord: &[Float]) {
        assert!(
            (2..=4).contains(&tex_coord.len()),
            "texture coordinates take 2 to 4 components, got {}",
            tex_coord.len()
        );
        assert!(self.count < self.face_size, "polygon face is complete");
        self.tex_coords[self.count][..tex_coord.len()].copy_from_slice(tex_coord);
        self.tex_components = tex_coord.len();
    }

    /// Records the color of the current vertex (3 or 4 components)
    /// without advancing it.
    pub fn add_color(&mut self, color: &[Float]) {
        assert!(
            (3..=4).contains(&color.len()),
            "colors take 3 or 4 components, got {}",
            color.len()
        );
        assert!(self.count < self.face_size, "polygon face is complete");
        self.colors[self.count][..color.len()].copy_from_slice(color);
        self.color_components = color.len();
    }

    /// Records the normal of the current vertex without advancing it.
    pub fn add_normal(&mut self, normal: Vector3<Float>) {
        assert!(self.count < self.face_size, "polygon face is complete");
        self.normals[self.count] = [normal.x, normal.y, normal.z];
    }

    pub fn vertex(&self, i: usize) -> Point3<Float> {
        assert!(i < self.count, "vertex {} out of range", i);
        let p = self.positions[i];
        Point3::new(p[0], p[1], p[2])
    }

    /// Texture coordinate of vertex `i`; empty when none were recorded.
    pub fn tex_coord(&self, i: usize) -> &[Float] {
        assert!(i < self.count, "vertex {} out of range", i);
        &self.tex_coords[i][..self.tex_components]
    }

    /// Color of vertex `i`; empty when none were recorded.
    pub fn color(&self, i: usize) -> &[Float] {
        assert!(i < self.count, "vertex {} out of range", i);
        &self.colors[i][..self.color_components]
    }

    pub fn normal(&self, i: usize) -> Vector3<Float> {
        assert!(i < self.count, "vertex {} out of range", i);
        let n = self.normals[i];
        Vector3::new(n[0], n[1], n[2])
    }

    /// Empties the polygon so it can be refilled with the next face.
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_and_channels_read_back() {
        let mut polygon = Polygon::new(3);
        polygon.add_tex_coord(&[0.0, 0.0]);
        polygon.add_normal(Vector3::new(0.0, 0.0, 1.0));
        polygon.add_vertex(Point3::new(0.0, 0.0, 0.0));
        polygon.add_tex_coord(&[1.0, 0.0]);
        polygon.add_normal(Vector3::new(0.0, 0.0, 1.0));
        polygon.add_vertex(Point3::new(1.0, 0.0, 0.0));
        assert_eq!(polygon.vertex_count(), 2);
        assert_eq!(polygon.vertex(1), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(polygon.tex_coord(1), &[1.0, 0.0]);
        assert_eq!(polygon.normal(0), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn channel_widths_are_preserved() {
        let mut polygon = Polygon::new(3);
        polygon.add_color(&[0.2, 0.4, 0.6]);
        polygon.add_vertex(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(polygon.color(0), &[0.2, 0.4, 0.6]);
    }

    #[test]
    fn clone_outlives_reset() {
        let mut polygon = Polygon::new(3);
        polygon.add_vertex(Point3::new(1.0, 2.0, 3.0));
        polygon.add_vertex(Point3::new(4.0, 5.0, 6.0));
        polygon.add_vertex(Point3::new(7.0, 8.0, 9.0));
        let copy = polygon.clone();
        polygon.reset();
        polygon.add_vertex(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(copy.vertex_count(), 3);
        assert_eq!(copy.vertex(2), Point3::new(7.0, 8.0, 9.0));
    }

    #[test]
    #[should_panic(expected = "polygon face is complete")]
    fn overfull_face_panics() {
        let mut polygon = Polygon::new(3);
        polygon.add_vertex(Point3::new(0.0, 0.0, 0.0));
        polygon.add_vertex(Point3::new(1.0, 0.0, 0.0));
        polygon.add_vertex(Point3::new(0.0, 1.0, 0.0));
        polygon.add_vertex(Point3::new(1.0, 1.0, 0.0));
    }
}
