mod payload;
mod triangle;
mod vertex;

pub use payload::{Tint, TintScale, VertexPayload};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexId};

use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;
use tracing::warn;

use crate::error::{MeshError, Result};
use crate::math::{cross_2d, Point2, PointKey, Segment, TOLERANCE};

/// A 2D triangulation of the walkable region.
///
/// Vertices are deduplicated by position and owned by a slot map; triangles
/// reference them by [`VertexId`]. The mesh is immutable once built.
#[derive(Debug, Clone)]
pub struct Mesh<T> {
    vertices: SlotMap<VertexId, Vertex<T>>,
    by_position: HashMap<PointKey, VertexId>,
    triangles: Vec<Triangle>,
    boundary: Vec<Segment>,
    min_scale: f64,
    max_scale: f64,
}

impl<T: VertexPayload> Default for Mesh<T> {
    fn default() -> Self {
        Self {
            vertices: SlotMap::with_key(),
            by_position: HashMap::new(),
            triangles: Vec::new(),
            boundary: Vec::new(),
            min_scale: 0.0,
            max_scale: 0.0,
        }
    }
}

impl<T: VertexPayload> Mesh<T> {
    /// Builds a mesh from raw triangle corner data.
    ///
    /// Corners that share a position become one vertex; the first payload
    /// seen for a position wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite or a triangle is
    /// degenerate (its corners are collinear).
    pub fn from_triangles<I>(triangles: I) -> Result<Self>
    where
        I: IntoIterator<Item = [Vertex<T>; 3]>,
    {
        let mut mesh = Self::default();
        for corners in triangles {
            mesh.push_triangle(corners)?;
        }
        mesh.boundary = mesh.compute_boundary();
        (mesh.min_scale, mesh.max_scale) = mesh.compute_scale_bounds();
        Ok(mesh)
    }

    fn push_triangle(&mut self, corners: [Vertex<T>; 3]) -> Result<()> {
        for corner in &corners {
            corner.validate()?;
        }
        let [a, b, c] = [
            corners[0].position,
            corners[1].position,
            corners[2].position,
        ];
        if cross_2d(&a, &b, &c).abs() <= TOLERANCE {
            return Err(MeshError::DegenerateTriangle { a, b, c }.into());
        }

        let ids = corners.map(|corner| self.insert_vertex(corner));
        self.triangles.push(Triangle::new(ids, [a, b, c]));
        Ok(())
    }

    fn insert_vertex(&mut self, vertex: Vertex<T>) -> VertexId {
        let key = PointKey::new(&vertex.position);
        if let Some(&id) = self.by_position.get(&key) {
            if self.vertices[id].payload != vertex.payload {
                warn!(
                    x = vertex.position.x,
                    y = vertex.position.y,
                    "conflicting payloads for shared vertex, keeping the first"
                );
            }
            return id;
        }
        let id = self.vertices.insert(vertex);
        self.by_position.insert(key, id);
        id
    }

    /// Edges used by exactly one triangle, in first-seen order.
    fn compute_boundary(&self) -> Vec<Segment> {
        let mut uses: HashMap<(VertexId, VertexId), usize> = HashMap::new();
        let mut order = Vec::new();
        for tri in &self.triangles {
            let [a, b, c] = tri.vertex_ids();
            for (i, (p, q)) in [(a, b), (b, c), (c, a)].into_iter().enumerate() {
                let key = if p < q { (p, q) } else { (q, p) };
                let count = uses.entry(key).or_insert(0);
                if *count == 0 {
                    order.push((key, tri.edges()[i]));
                }
                *count += 1;
            }
        }
        order
            .into_iter()
            .filter(|(key, _)| uses.get(key) == Some(&1))
            .map(|(_, edge)| edge)
            .collect()
    }

    fn compute_scale_bounds(&self) -> (f64, f64) {
        let mut magnitudes = self.vertices.values().map(|v| v.payload.scale_magnitude());
        let Some(first) = magnitudes.next() else {
            return (0.0, 0.0);
        };
        magnitudes.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)))
    }

    pub(crate) fn set_scale_bounds(&mut self, min_scale: f64, max_scale: f64) {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
    }

    /// Returns the triangle whose closed region contains `point`.
    #[must_use]
    pub fn find_triangle(&self, point: &Point2) -> Option<&Triangle> {
        self.triangles.iter().find(|tri| tri.contains(point))
    }

    /// Returns `true` if `point` lies in the walkable region.
    #[must_use]
    pub fn is_walkable(&self, point: &Point2) -> bool {
        self.find_triangle(point).is_some()
    }

    /// Barycentric interpolation of the vertex payloads of `triangle` at `point`.
    ///
    /// `triangle` must belong to this mesh.
    #[must_use]
    pub fn interpolate(&self, triangle: &Triangle, point: &Point2) -> T {
        let weights = triangle.barycentric(point);
        triangle
            .vertex_ids()
            .iter()
            .zip(weights)
            .fold(T::default(), |acc, (&id, w)| {
                acc.add(&self.vertices[id].payload.multiply(w))
            })
    }

    /// Interpolated payload at `point`, or `None` outside the walkable region.
    #[must_use]
    pub fn payload_at(&self, point: &Point2) -> Option<T> {
        self.find_triangle(point).map(|tri| self.interpolate(tri, point))
    }

    /// Returns `point` if walkable, otherwise the closest point on the
    /// mesh boundary. `None` for an empty mesh.
    #[must_use]
    pub fn nearest_walkable_point(&self, point: &Point2) -> Option<Point2> {
        if self.is_walkable(point) {
            return Some(*point);
        }
        self.boundary
            .iter()
            .map(|edge| edge.closest_point(point))
            .min_by(|p, q| {
                nalgebra::distance_squared(p, point)
                    .total_cmp(&nalgebra::distance_squared(q, point))
            })
    }

    /// Returns the vertex with the given ID.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.vertices.get(id)
    }

    /// Returns the vertex at exactly `position`.
    #[must_use]
    pub fn vertex_at(&self, position: &Point2) -> Option<&Vertex<T>> {
        self.by_position
            .get(&PointKey::new(position))
            .and_then(|&id| self.vertices.get(id))
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> {
        self.vertices.values()
    }

    /// Returns the number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns all triangles.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the corner vertices of `triangle`.
    ///
    /// `triangle` must belong to this mesh.
    #[must_use]
    pub fn corners(&self, triangle: &Triangle) -> [&Vertex<T>; 3] {
        triangle.vertex_ids().map(|id| &self.vertices[id])
    }

    /// Edges that belong to exactly one triangle.
    #[must_use]
    pub fn boundary_edges(&self) -> &[Segment] {
        &self.boundary
    }

    /// Distinct endpoints of the boundary edges, in first-seen order.
    #[must_use]
    pub fn boundary_vertices(&self) -> Vec<Point2> {
        let mut seen = HashSet::new();
        self.boundary
            .iter()
            .flat_map(|edge| [edge.a, edge.b])
            .filter(|point| seen.insert(PointKey::new(point)))
            .collect()
    }

    /// Smallest scale magnitude across all vertex payloads.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Largest scale magnitude across all vertex payloads.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::math::Vector2;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64, scale: f64) -> Vertex<f64> {
        Vertex::new(Point2::new(x, y), scale)
    }

    /// Unit square split along its diagonal.
    fn square() -> Mesh<f64> {
        Mesh::from_triangles([
            [v(0.0, 0.0, 1.0), v(10.0, 0.0, 2.0), v(10.0, 10.0, 3.0)],
            [v(0.0, 0.0, 1.0), v(10.0, 10.0, 3.0), v(0.0, 10.0, 4.0)],
        ])
        .unwrap()
    }

    #[test]
    fn shared_vertices_are_deduplicated() {
        let mesh = square();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangles().len(), 2);
        let [a, _, c] = mesh.triangles()[0].vertex_ids();
        let [a2, c2, _] = mesh.triangles()[1].vertex_ids();
        assert_eq!(a, a2);
        assert_eq!(c, c2);
    }

    #[test]
    fn scale_bounds_cover_all_vertices() {
        let mesh = square();
        assert_relative_eq!(mesh.min_scale(), 1.0);
        assert_relative_eq!(mesh.max_scale(), 4.0);
    }

    #[test]
    fn empty_mesh_has_zero_bounds() {
        let mesh = Mesh::<f64>::from_triangles([]).unwrap();
        assert_relative_eq!(mesh.min_scale(), 0.0);
        assert_relative_eq!(mesh.max_scale(), 0.0);
        assert!(!mesh.is_walkable(&Point2::new(0.0, 0.0)));
        assert!(mesh.nearest_walkable_point(&Point2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        let err = Mesh::from_triangles([[v(0.0, 0.0, 1.0), v(1.0, 1.0, 1.0), v(2.0, 2.0, 1.0)]])
            .unwrap_err();
        assert!(matches!(
            err,
            NavError::Mesh(MeshError::DegenerateTriangle { .. })
        ));
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let err = Mesh::from_triangles([[
            v(0.0, 0.0, 1.0),
            v(f64::NAN, 1.0, 1.0),
            v(2.0, 0.0, 1.0),
        ]])
        .unwrap_err();
        assert!(matches!(err, NavError::Geometry(_)));
    }

    #[test]
    fn boundary_excludes_shared_diagonal() {
        let mesh = square();
        let diagonal = Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        assert_eq!(mesh.boundary_edges().len(), 4);
        assert!(!mesh.boundary_edges().contains(&diagonal));
        assert_eq!(mesh.boundary_vertices().len(), 4);
    }

    #[test]
    fn find_triangle_includes_boundary() {
        let mesh = square();
        assert!(mesh.find_triangle(&Point2::new(5.0, 5.0)).is_some());
        assert!(mesh.find_triangle(&Point2::new(10.0, 3.0)).is_some());
        assert!(mesh.find_triangle(&Point2::new(0.0, 0.0)).is_some());
        assert!(mesh.find_triangle(&Point2::new(10.5, 3.0)).is_none());
    }

    #[test]
    fn interpolate_is_exact_at_vertices() {
        let mesh = square();
        for tri in mesh.triangles() {
            for corner in mesh.corners(tri) {
                let value = mesh.interpolate(tri, &corner.position);
                assert_relative_eq!(value, corner.payload, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn interpolate_blends_inside() {
        let mesh = square();
        // Midpoint of the bottom edge: halfway between scale 1 and 2.
        assert_relative_eq!(mesh.payload_at(&Point2::new(5.0, 0.0)).unwrap(), 1.5);
        assert!(mesh.payload_at(&Point2::new(-1.0, 0.0)).is_none());
    }

    #[test]
    fn interpolate_tint_scale_payload() {
        let tinted = |x: f64, y: f64, tint: Tint, s: f64| {
            Vertex::new(Point2::new(x, y), TintScale::new(tint, Vector2::new(s, s)))
        };
        let mesh = Mesh::from_triangles([[
            tinted(0.0, 0.0, Tint::new(1.0, 0.0, 0.0, 1.0), 1.0),
            tinted(3.0, 0.0, Tint::new(0.0, 1.0, 0.0, 1.0), 1.0),
            tinted(0.0, 3.0, Tint::new(0.0, 0.0, 1.0, 1.0), 4.0),
        ]])
        .unwrap();
        let centroid = mesh.payload_at(&Point2::new(1.0, 1.0)).unwrap();
        assert_relative_eq!(centroid.tint.r, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(centroid.tint.g, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(centroid.tint.a, 1.0, epsilon = 1e-12);
        assert_relative_eq!(centroid.scale.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn nearest_walkable_point_snaps_to_boundary() {
        let mesh = square();
        let inside = Point2::new(3.0, 4.0);
        assert_eq!(mesh.nearest_walkable_point(&inside), Some(inside));
        let snapped = mesh.nearest_walkable_point(&Point2::new(15.0, 5.0)).unwrap();
        assert_relative_eq!(snapped.x, 10.0);
        assert_relative_eq!(snapped.y, 5.0);
    }

    #[test]
    fn vertex_lookup_by_position() {
        let mesh = square();
        let vertex = mesh.vertex_at(&Point2::new(0.0, 10.0)).unwrap();
        assert_relative_eq!(vertex.payload, 4.0);
        assert!(mesh.vertex_at(&Point2::new(5.0, 5.0)).is_none());
    }
}
