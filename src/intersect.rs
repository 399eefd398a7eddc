//! Ray casting against polygon geometry.

use cgmath::prelude::*;
use cgmath::{Point3, Vector3};

use crate::consts::INFINITY;
use crate::error::{Error, Result};
use crate::float::*;
use crate::geometry::{ChannelSelection, Geometry, PolygonCursor};

/// Scratch capacity for the projected polygon (four vertices).
const INITIAL_SCRATCH: usize = 8;

/// A ray with an origin, a direction and an optional reach.
#[derive(Clone, Debug)]
pub struct Ray {
    pub origin: Point3<Float>,
    pub dir: Vector3<Float>,
    /// Hits farther along than this are ignored. Infinite for an
    /// unbounded ray.
    pub length: Float,
}

impl Ray {
    /// An unbounded ray. The direction does not need to be normalized.
    pub fn new(origin: Point3<Float>, dir: Vector3<Float>) -> Ray {
        Ray {
            origin,
            dir,
            length: INFINITY,
        }
    }

    /// A ray that only reports hits within `length` of the origin.
    pub fn bounded(origin: Point3<Float>, dir: Vector3<Float>, length: Float) -> Ray {
        assert!(
            length > 0.0 && length.is_finite(),
            "ray length must be positive and finite"
        );
        Ray {
            origin,
            dir,
            length,
        }
    }

    /// The segment from one point to another.
    pub fn between(from: Point3<Float>, to: Point3<Float>) -> Ray {
        let dir = to - from;
        Ray {
            origin: from,
            dir,
            length: dir.magnitude(),
        }
    }
}

/// Result of a ray query.
///
/// The hit point, normal and distance are only meaningful while
/// `intersecting` is true; a rejected face may still have scribbled on
/// them.
#[derive(Clone, Debug)]
pub struct Intersection {
    pub intersecting: bool,
    /// Where the ray meets the face plane.
    pub point: Point3<Float>,
    /// Unit normal of the face that was hit.
    pub normal: Vector3<Float>,
    /// Squared distance from the ray origin to the hit point.
    pub distance_squared: Float,
}

impl Intersection {
    pub fn new() -> Intersection {
        Intersection {
            intersecting: false,
            point: Point3::origin(),
            normal: Vector3::zero(),
            distance_squared: 0.0,
        }
    }

    pub fn distance(&self) -> Float {
        self.distance_squared.sqrt()
    }
}

impl Default for Intersection {
    fn default() -> Intersection {
        Intersection::new()
    }
}

/// Casts rays against faces, keeping its scratch storage between
/// queries.
///
/// A tester can serve any number of queries against any number of
/// geometries; one per picking context is enough.
pub struct IntersectionTester {
    work: Intersection,
    working_2d: Vec<Float>,
}

impl IntersectionTester {
    pub fn new() -> IntersectionTester {
        IntersectionTester {
            work: Intersection::new(),
            working_2d: vec![0.0; INITIAL_SCRATCH],
        }
    }

    /// Drops scratch storage grown by large polygons back to its
    /// initial size.
    pub fn clear(&mut self) {
        self.work = Intersection::new();
        self.working_2d = vec![0.0; INITIAL_SCRATCH];
    }

    /// Tests the ray against every face of the geometry and reports the
    /// closest hit.
    pub fn intersect_closest_into(
        &mut self,
        ray: &Ray,
        geometry: &Geometry,
        intersection: &mut Intersection,
    ) -> bool {
        let cursor = geometry.polygons_with(ChannelSelection::positions_only());
        self.scan(ray, cursor, false, intersection)
    }

    /// Tests the ray against the faces of the geometry until the first
    /// hit.
    pub fn intersect_any_into(
        &mut self,
        ray: &Ray,
        geometry: &Geometry,
        intersection: &mut Intersection,
    ) -> bool {
        let cursor = geometry.polygons_with(ChannelSelection::positions_only());
        self.scan(ray, cursor, true, intersection)
    }

    /// Tests the ray against `num_triangles` triangles stored as a flat
    /// coordinate array: the closest hit, or the first one when
    /// `any_intersect` is set.
    pub fn intersect_triangle_array(
        &mut self,
        ray: &Ray,
        coords: &[Float],
        num_triangles: usize,
        any_intersect: bool,
        intersection: &mut Intersection,
    ) -> Result<bool> {
        let needed = num_triangles * 9;
        if coords.len() < needed {
            return Err(Error::InsufficientCoordinates {
                needed,
                actual: coords.len(),
            });
        }
        Ok(self.scan_flat(ray, coords, 3, num_triangles, any_intersect, intersection))
    }

    /// Tests the ray against `num_quads` quads stored as a flat
    /// coordinate array: the closest hit, or the first one when
    /// `any_intersect` is set.
    pub fn intersect_quad_array(
        &mut self,
        ray: &Ray,
        coords: &[Float],
        num_quads: usize,
        any_intersect: bool,
        intersection: &mut Intersection,
    ) -> Result<bool> {
        let needed = num_quads * 12;
        if coords.len() < needed {
            return Err(Error::InsufficientCoordinates {
                needed,
                actual: coords.len(),
            });
        }
        Ok(self.scan_flat(ray, coords, 4, num_quads, any_intersect, intersection))
    }

    /// Tests the ray against a single planar polygon of `num_coords`
    /// vertices. On a miss the result may still carry the plane hit
    /// point of the rejected face.
    pub fn intersect_polygon(
        &mut self,
        ray: &Ray,
        coords: &[Float],
        num_coords: usize,
        intersection: &mut Intersection,
    ) -> Result<bool> {
        let needed = num_coords * 3;
        if coords.len() < needed {
            return Err(Error::InsufficientCoordinates {
                needed,
                actual: coords.len(),
            });
        }
        if num_coords < 3 {
            intersection.intersecting = false;
            return Ok(false);
        }
        let hit = test_polygon(
            &mut self.working_2d,
            ray,
            num_coords,
            |i| point_at(coords, i),
            intersection,
        );
        intersection.intersecting = hit;
        Ok(hit)
    }

    /// Walks the cursor testing each face, tracking the shortest hit.
    /// With `any_intersect` the walk stops at the first hit instead.
    pub(crate) fn scan(
        &mut self,
        ray: &Ray,
        mut polygons: PolygonCursor<'_>,
        any_intersect: bool,
        intersection: &mut Intersection,
    ) -> bool {
        let mut shortest: Option<Float> = None;
        while let Some(polygon) = polygons.next_polygon() {
            let hit = test_polygon(
                &mut self.working_2d,
                ray,
                polygon.vertex_count(),
                |i| polygon.vertex(i),
                &mut self.work,
            );
            if hit && shortest.map_or(true, |s| self.work.distance_squared < s) {
                shortest = Some(self.work.distance_squared);
                intersection.clone_from(&self.work);
                if any_intersect {
                    break;
                }
            }
        }
        intersection.intersecting = shortest.is_some();
        intersection.intersecting
    }

    fn scan_flat(
        &mut self,
        ray: &Ray,
        coords: &[Float],
        face_size: usize,
        face_count: usize,
        any_intersect: bool,
        intersection: &mut Intersection,
    ) -> bool {
        let mut shortest: Option<Float> = None;
        for face in 0..face_count {
            let base = face * face_size;
            let hit = test_polygon(
                &mut self.working_2d,
                ray,
                face_size,
                |i| point_at(coords, base + i),
                &mut self.work,
            );
            if hit && shortest.map_or(true, |s| self.work.distance_squared < s) {
                shortest = Some(self.work.distance_squared);
                intersection.clone_from(&self.work);
                if any_intersect {
                    break;
                }
            }
        }
        intersection.intersecting = shortest.is_some();
        intersection.intersecting
    }
}

impl Default for IntersectionTester {
    fn default() -> IntersectionTester {
        IntersectionTester::new()
    }
}

fn point_at(coords: &[Float], i: usize) -> Point3<Float> {
    Point3::new(coords[3 * i], coords[3 * i + 1], coords[3 * i + 2])
}

/// Axis of the largest normal component (0, 1 or 2). Ties resolve to Y
/// over X, and Z only wins outright.
fn dominant_axis(normal: Vector3<Float>) -> usize {
    let abs_x = normal.x.abs();
    let abs_y = normal.y.abs();
    let abs_z = normal.z.abs();
    let mut dom = if abs_x > abs_y { 0 } else { 1 };
    if dom == 0 {
        if abs_x < abs_z {
            dom = 2;
        }
    } else if abs_y < abs_z {
        dom = 2;
    }
    dom
}

/// Tests the ray against one planar polygon.
///
/// The face plane is spanned by the first three vertices. Once the ray
/// meets the plane, the hit point, face normal and squared distance are
/// stored in `out`; the reach and containment checks only decide the
/// return value, so a rejected face leaves its plane hit in `out`.
/// Containment projects the polygon onto the plane most perpendicular
/// to its normal and counts edge crossings around the hit point.
fn test_polygon<F>(
    working_2d: &mut Vec<Float>,
    ray: &Ray,
    vertex_count: usize,
    vertex: F,
    out: &mut Intersection,
) -> bool
where
    F: Fn(usize) -> Point3<Float>,
{
    let v0 = vertex(0);
    let v1 = vertex(1);
    let v2 = vertex(2);
    let normal = (v1 - v0).cross(v2 - v1);
    if normal.magnitude2() == 0.0 {
        // degenerate face, no plane to hit
        return false;
    }
    let nd = normal.dot(ray.dir);
    if nd == 0.0 {
        // ray parallel to the face plane
        return false;
    }
    let d = normal.dot(v0.to_vec());
    let t = (d - normal.dot(ray.origin.to_vec())) / nd;
    if t < 0.0 {
        return false;
    }
    let point = ray.origin + ray.dir * t;
    out.point = point;
    out.distance_squared = (ray.origin - point).magnitude2();
    out.normal = normal.normalize();
    if out.distance_squared > ray.length * ray.length {
        return false;
    }

    if working_2d.len() < vertex_count * 2 {
        working_2d.resize(vertex_count * 2, 0.0);
    }
    let dom = dominant_axis(normal);
    for i in 0..vertex_count {
        let v = vertex(i);
        let (u, w) = match dom {
            0 => (v.y - point.y, v.z - point.z),
            1 => (v.x - point.x, v.z - point.z),
            _ => (v.x - point.x, v.y - point.y),
        };
        working_2d[2 * i] = u;
        working_2d[2 * i + 1] = w;
    }

    // crossing number test around the projected origin
    let mut crossings = 0;
    let mut sh = if working_2d[1] < 0.0 { -1 } else { 1 };
    for i in 0..vertex_count {
        let j = (i + 1) % vertex_count;
        let i_u = working_2d[2 * i];
        let i_v = working_2d[2 * i + 1];
        let j_u = working_2d[2 * j];
        let j_v = working_2d[2 * j + 1];
        let nsh = if j_v < 0.0 { -1 } else { 1 };
        if sh != nsh {
            if i_u > 0.0 && j_u > 0.0 {
                crossings += 1;
            } else if i_u > 0.0 || j_u > 0.0 {
                let dist = i_u - i_v * (j_u - i_u) / (j_v - i_v);
                if dist > 0.0 {
                    crossings += 1;
                }
            }
            sh = nsh;
        }
    }
    crossings % 2 == 1
}
