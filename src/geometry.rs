use crate::buffer::{AttributeBuffer, ColorFormat, TexCoordFormat};
use crate::intersect::{Intersection, IntersectionTester, Ray};
use crate::polygon::Polygon;

/// How the elements of a buffer connect into faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Element 0 is the shared pivot, each further pair closes a triangle.
    TriangleFan,
    /// Each element after the first two closes a triangle with its two
    /// predecessors.
    TriangleStrip,
    /// Every three elements form an independent triangle.
    Triangles,
    /// Every four elements form an independent quad.
    Quads,
}

impl Topology {
    /// Vertices per face.
    pub fn face_size(self) -> usize {
        match self {
            Topology::Quads => 4,
            _ => 3,
        }
    }

    /// Complete faces in a buffer of `size` elements. Trailing elements
    /// that do not close a face are ignored.
    fn face_count(self, size: usize) -> usize {
        match self {
            Topology::TriangleFan | Topology::TriangleStrip => size.saturating_sub(2),
            Topology::Triangles => size / 3,
            Topology::Quads => size / 4,
        }
    }

    /// Logical element of vertex `i` of face `face`.
    fn face_element(self, face: usize, i: usize) -> usize {
        match self {
            Topology::TriangleFan => {
                if i == 0 {
                    0
                } else {
                    face + i
                }
            }
            Topology::TriangleStrip => face + i,
            Topology::Triangles => 3 * face + i,
            Topology::Quads => 4 * face + i,
        }
    }
}

/// Which attribute channels a cursor copies into its polygons.
///
/// Channels absent from the buffer format are skipped regardless of the
/// selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChannelSelection {
    pub tex_coords: bool,
    pub colors: bool,
    pub normals: bool,
}

impl ChannelSelection {
    /// Every channel the buffer carries.
    pub fn all() -> ChannelSelection {
        ChannelSelection {
            tex_coords: true,
            colors: true,
            normals: true,
        }
    }

    /// Positions only. This is what intersection testing walks with.
    pub fn positions_only() -> ChannelSelection {
        ChannelSelection::default()
    }
}

/// An attribute buffer bound to a topology, walkable face by face and
/// testable against rays.
pub struct Geometry {
    buffer: AttributeBuffer,
    topology: Topology,
    tester: IntersectionTester,
}

impl Geometry {
    pub fn new(buffer: AttributeBuffer, topology: Topology) -> Geometry {
        Geometry {
            buffer,
            topology,
            tester: IntersectionTester::new(),
        }
    }

    pub fn buffer(&self) -> &AttributeBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut AttributeBuffer {
        &mut self.buffer
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Complete faces at the buffer's current size.
    pub fn face_count(&self) -> usize {
        self.topology.face_count(self.buffer.size())
    }

    /// Cursor over all faces, copying every channel the buffer carries.
    pub fn polygons(&self) -> PolygonCursor<'_> {
        self.polygons_with(ChannelSelection::all())
    }

    /// Cursor over all faces, copying only the selected channels.
    pub fn polygons_with(&self, selection: ChannelSelection) -> PolygonCursor<'_> {
        PolygonCursor::new(&self.buffer, self.topology, selection)
    }

    /// Tests the ray against every face and reports the closest hit.
    pub fn intersect_closest(&mut self, ray: &Ray) -> Intersection {
        let mut intersection = Intersection::new();
        self.intersect_closest_into(ray, &mut intersection);
        intersection
    }

    /// Tests the ray against the faces until the first hit.
    pub fn intersect_any(&mut self, ray: &Ray) -> Intersection {
        let mut intersection = Intersection::new();
        self.intersect_any_into(ray, &mut intersection);
        intersection
    }

    /// Like `intersect_closest`, reusing a caller-provided result.
    pub fn intersect_closest_into(&mut self, ray: &Ray, intersection: &mut Intersection) -> bool {
        let cursor = PolygonCursor::new(
            &self.buffer,
            self.topology,
            ChannelSelection::positions_only(),
        );
        self.tester.scan(ray, cursor, false, intersection)
    }

    /// Like `intersect_any`, reusing a caller-provided result.
    pub fn intersect_any_into(&mut self, ray: &Ray, intersection: &mut Intersection) -> bool {
        let cursor = PolygonCursor::new(
            &self.buffer,
            self.topology,
            ChannelSelection::positions_only(),
        );
        self.tester.scan(ray, cursor, true, intersection)
    }
}

/// Walks the faces of a buffer in order, materializing each one into a
/// polygon.
///
/// The cursor hands out a borrow of its internal polygon, which the next
/// call refills. Callers that need a face beyond the next call clone it.
/// Dropping the cursor and asking the geometry for a new one restarts
/// the walk.
pub struct PolygonCursor<'a> {
    buffer: &'a AttributeBuffer,
    topology: Topology,
    selection: ChannelSelection,
    polygon: Polygon,
    face: usize,
    face_count: usize,
}

impl<'a> PolygonCursor<'a> {
    pub(crate) fn new(
        buffer: &'a AttributeBuffer,
        topology: Topology,
        selection: ChannelSelection,
    ) -> PolygonCursor<'a> {
        let format = buffer.format();
        let selection = ChannelSelection {
            tex_coords: selection.tex_coords && format.tex_coords != TexCoordFormat::None,
            colors: selection.colors && format.colors != ColorFormat::None,
            normals: selection.normals && format.normals,
        };
        PolygonCursor {
            buffer,
            topology,
            selection,
            polygon: Polygon::new(topology.face_size()),
            face: 0,
            face_count: topology.face_count(buffer.size()),
        }
    }

    pub fn has_next(&self) -> bool {
        self.face < self.face_count
    }

    /// Refills the internal polygon with the next face, or None when the
    /// walk is done.
    pub fn next_polygon(&mut self) -> Option<&Polygon> {
        if self.face >= self.face_count {
            return None;
        }
        self.polygon.reset();
        for i in 0..self.topology.face_size() {
            let element = self.topology.face_element(self.face, i);
            let v = self.buffer.element_index(element);
            if self.selection.tex_coords {
                self.polygon.add_tex_coord(self.buffer.tex_coord(v));
            }
            if self.selection.colors {
                self.polygon.add_color(self.buffer.color(v));
            }
            if self.selection.normals {
                self.polygon.add_normal(self.buffer.normal(v));
            }
            self.polygon.add_vertex(self.buffer.vertex(v));
        }
        self.face += 1;
        Some(&self.polygon)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;
    use crate::buffer::VertexFormat;
    use crate::float::*;

    fn direct_buffer(positions: &[Float]) -> AttributeBuffer {
        let mut buffer =
            AttributeBuffer::new(VertexFormat::default(), positions.len() / 3, 0);
        buffer.add_vertices(positions);
        buffer
    }

    #[test]
    fn fan_shares_the_pivot() {
        // six elements fanned around element 0
        let buffer = direct_buffer(&[
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, //
            -1.0, 1.0, 0.0, //
            -1.0, 0.0, 0.0,
        ]);
        let geometry = Geometry::new(buffer, Topology::TriangleFan);
        assert_eq!(geometry.face_count(), 4);
        let mut cursor = geometry.polygons();
        let mut faces = 0;
        while let Some(polygon) = cursor.next_polygon() {
            assert_eq!(polygon.vertex_count(), 3);
            assert_eq!(polygon.vertex(0), Point3::new(0.0, 0.0, 0.0));
            faces += 1;
        }
        assert_eq!(faces, 4);
        // a fresh cursor restarts from the first face
        let mut cursor = geometry.polygons();
        let first = cursor.next_polygon().unwrap();
        assert_eq!(first.vertex(1), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(first.vertex(2), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn strip_slides_over_consecutive_elements() {
        let buffer = direct_buffer(&[
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 2.0, 0.0,
        ]);
        let geometry = Geometry::new(buffer, Topology::TriangleStrip);
        assert_eq!(geometry.face_count(), 3);
        let mut cursor = geometry.polygons();
        cursor.next_polygon().unwrap();
        let second = cursor.next_polygon().unwrap();
        assert_eq!(second.vertex(0), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(second.vertex(2), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn triangle_array_drops_trailing_elements() {
        // 7 elements make 2 triangles, the last element closes nothing
        let buffer = direct_buffer(&[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            2.0, 0.0, 0.0, 3.0, 0.0, 0.0, 2.0, 1.0, 0.0, //
            9.0, 9.0, 9.0,
        ]);
        let geometry = Geometry::new(buffer, Topology::Triangles);
        assert_eq!(geometry.face_count(), 2);
        let mut cursor = geometry.polygons();
        cursor.next_polygon().unwrap();
        let second = cursor.next_polygon().unwrap();
        assert_eq!(second.vertex(0), Point3::new(2.0, 0.0, 0.0));
        assert!(cursor.next_polygon().is_none());
        assert!(!cursor.has_next());
    }

    #[test]
    fn quad_array_walks_four_at_a_time() {
        let buffer = direct_buffer(&[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
            2.0, 0.0, 0.0, 3.0, 0.0, 0.0, 3.0, 1.0, 0.0, 2.0, 1.0, 0.0,
        ]);
        let geometry = Geometry::new(buffer, Topology::Quads);
        assert_eq!(geometry.face_count(), 2);
        let mut cursor = geometry.polygons();
        let first = cursor.next_polygon().unwrap();
        assert_eq!(first.vertex_count(), 4);
        assert_eq!(first.vertex(3), Point3::new(0.0, 1.0, 0.0));
        let second = cursor.next_polygon().unwrap();
        assert_eq!(second.vertex(0), Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn indexed_faces_resolve_through_the_index_channel() {
        let format = VertexFormat {
            indexed: true,
            ..VertexFormat::default()
        };
        let mut buffer = AttributeBuffer::new(format, 4, 6);
        buffer.add_vertices(&[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        buffer.add_indices(&[0, 1, 2, 0, 2, 3]);
        let geometry = Geometry::new(buffer, Topology::Triangles);
        assert_eq!(geometry.face_count(), 2);
        let mut cursor = geometry.polygons();
        cursor.next_polygon().unwrap();
        let second = cursor.next_polygon().unwrap();
        assert_eq!(second.vertex(0), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(second.vertex(1), Point3::new(1.0, 1.0, 0.0));
        assert_eq!(second.vertex(2), Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn undersized_buffer_yields_no_faces() {
        let buffer = direct_buffer(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let geometry = Geometry::new(buffer, Topology::TriangleStrip);
        assert_eq!(geometry.face_count(), 0);
        let mut cursor = geometry.polygons();
        assert!(cursor.next_polygon().is_none());
    }

    #[test]
    fn selection_limits_the_copied_channels() {
        let format = VertexFormat {
            tex_coords: TexCoordFormat::Float2,
            ..VertexFormat::default()
        };
        let mut buffer = AttributeBuffer::new(format, 3, 0);
        for i in 0..3 {
            let f = i as Float;
            buffer.add_tex_coord(&[f, f]);
            buffer.add_vertex(Point3::new(f, 0.0, 0.0));
        }
        let geometry = Geometry::new(buffer, Topology::Triangles);
        let mut cursor = geometry.polygons();
        let polygon = cursor.next_polygon().unwrap();
        assert_eq!(polygon.tex_coord(1), &[1.0, 1.0]);
        let mut bare = geometry.polygons_with(ChannelSelection::positions_only());
        let polygon = bare.next_polygon().unwrap();
        assert!(polygon.tex_coord(1).is_empty());
    }

    #[test]
    fn cloned_polygon_survives_cursor_advance() {
        let buffer = direct_buffer(&[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            5.0, 0.0, 0.0, 6.0, 0.0, 0.0, 5.0, 1.0, 0.0,
        ]);
        let geometry = Geometry::new(buffer, Topology::Triangles);
        let mut cursor = geometry.polygons();
        let first = cursor.next_polygon().unwrap().clone();
        cursor.next_polygon().unwrap();
        assert_eq!(first.vertex(0), Point3::new(0.0, 0.0, 0.0));
    }
}
