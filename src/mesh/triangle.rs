use crate::math::{cross_2d, Point2, Segment, EPSILON};

use super::VertexId;

/// A mesh triangle: three vertex references plus its cached edges.
///
/// `edges[i]` runs from corner `i` to corner `(i + 1) % 3`.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [VertexId; 3],
    edges: [Segment; 3],
    double_area: f64,
}

impl Triangle {
    /// Creates a triangle. The caller guarantees the corners are not collinear.
    pub(crate) fn new(vertices: [VertexId; 3], corners: [Point2; 3]) -> Self {
        let [a, b, c] = corners;
        Self {
            vertices,
            edges: [Segment::new(a, b), Segment::new(b, c), Segment::new(c, a)],
            double_area: cross_2d(&a, &b, &c),
        }
    }

    /// Returns the IDs of the three vertices.
    #[must_use]
    pub fn vertex_ids(&self) -> [VertexId; 3] {
        self.vertices
    }

    /// Returns the three corner positions.
    #[must_use]
    pub fn corners(&self) -> [Point2; 3] {
        [self.edges[0].a, self.edges[1].a, self.edges[2].a]
    }

    /// Returns the three edges.
    #[must_use]
    pub fn edges(&self) -> &[Segment; 3] {
        &self.edges
    }

    /// Returns the unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.double_area.abs() * 0.5
    }

    /// Barycentric weights of `point` with respect to the three corners.
    ///
    /// The weights sum to 1 and are exact at the corners. They are negative
    /// for points outside the triangle.
    #[must_use]
    pub fn barycentric(&self, point: &Point2) -> [f64; 3] {
        let [a, b, c] = self.corners();
        let w1 = cross_2d(point, &b, &c) / self.double_area;
        let w2 = cross_2d(&a, point, &c) / self.double_area;
        [w1, w2, 1.0 - w1 - w2]
    }

    /// Returns `true` if `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.barycentric(point).iter().all(|&w| w >= -EPSILON)
    }
}
