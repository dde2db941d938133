use super::{nearly_equal, Point2, Vector2, TOLERANCE};

/// A line segment between two points.
///
/// Equality is undirected: `a→b` equals `b→a`.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// First endpoint.
    pub a: Point2,
    /// Second endpoint.
    pub b: Point2,
}

impl Segment {
    /// Creates a segment from two endpoints.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Returns the direction vector `b - a` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.b - self.a
    }

    /// Returns the length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Returns the point at parameter `t` (`0` at `a`, `1` at `b`).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.a + self.direction() * t
    }

    /// Returns `true` if `point` lies on the segment within [`EPSILON`](super::EPSILON).
    ///
    /// Compares `|a - p| + |p - b|` against `|a - b|` with
    /// [`nearly_equal`], so points on the boundary are contained.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        let via = (point - self.a).norm() + (self.b - point).norm();
        nearly_equal(via, self.length())
    }

    /// Returns the intersection point if the line `from`–`to` strictly crosses
    /// the interior of this segment.
    ///
    /// Parallel lines (zero determinant) never cross. Parameters within
    /// [`EPSILON`](super::EPSILON) of `0` or `1` are snapped before the open-interval test,
    /// so touching at an endpoint is not a crossing.
    #[must_use]
    pub fn crosses(&self, from: &Point2, to: &Point2) -> Option<Point2> {
        let d1 = self.direction();
        let d2 = to - from;

        let det = d1.x * d2.y - d1.y * d2.x;
        #[allow(clippy::float_cmp)]
        let parallel = det == 0.0;
        if parallel {
            return None;
        }

        let dx = from.x - self.a.x;
        let dy = from.y - self.a.y;
        let r = snap_parameter((dx * d2.y - dy * d2.x) / det);
        let s = snap_parameter((dx * d1.y - dy * d1.x) / det);

        if r > 0.0 && r < 1.0 && s > 0.0 && s < 1.0 {
            Some(self.point_at(r))
        } else {
            None
        }
    }

    /// Returns the parameter of the projection of `point` onto the infinite
    /// line through the segment, or `None` for a zero-length segment.
    #[must_use]
    pub fn project(&self, point: &Point2) -> Option<f64> {
        let d = self.direction();
        let len_sq = d.norm_squared();
        if len_sq < TOLERANCE * TOLERANCE {
            return None;
        }
        Some((point - self.a).dot(&d) / len_sq)
    }

    /// Returns the closest point on the segment to `point`.
    #[must_use]
    pub fn closest_point(&self, point: &Point2) -> Point2 {
        match self.project(point) {
            Some(t) => self.point_at(t.clamp(0.0, 1.0)),
            None => self.a,
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

fn snap_parameter(t: f64) -> f64 {
    if nearly_equal(t, 0.0) {
        0.0
    } else if nearly_equal(t, 1.0) {
        1.0
    } else {
        t
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::points_nearly_equal;
    use approx::assert_relative_eq;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn equality_is_undirected() {
        assert_eq!(seg(0.0, 0.0, 1.0, 2.0), seg(1.0, 2.0, 0.0, 0.0));
        assert_ne!(seg(0.0, 0.0, 1.0, 2.0), seg(0.0, 0.0, 2.0, 1.0));
    }

    #[test]
    fn contains_endpoints_and_interior() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        assert!(s.contains(&Point2::new(0.0, 0.0)));
        assert!(s.contains(&Point2::new(10.0, 0.0)));
        assert!(s.contains(&Point2::new(4.0, 0.0)));
        assert!(!s.contains(&Point2::new(4.0, 1.0)));
        assert!(!s.contains(&Point2::new(11.0, 0.0)));
    }

    #[test]
    fn contains_agrees_with_closest_point() {
        let s = seg(10.0, 10.0, 450.0, 350.0);
        let probes = [
            Point2::new(10.0, 10.0),
            Point2::new(230.0, 180.0),
            Point2::new(450.0, 350.0),
            Point2::new(230.0, 200.0),
            Point2::new(0.0, 0.0),
            Point2::new(500.0, 350.0),
        ];
        for p in &probes {
            let closest = s.closest_point(p);
            assert_eq!(s.contains(p), points_nearly_equal(&closest, p), "p={p}");
        }
    }

    #[test]
    fn crosses_interior() {
        let s = seg(0.0, 0.0, 2.0, 2.0);
        let hit = s.crosses(&Point2::new(0.0, 2.0), &Point2::new(2.0, 0.0)).unwrap();
        assert_relative_eq!(hit.x, 1.0);
        assert_relative_eq!(hit.y, 1.0);
    }

    #[test]
    fn touching_endpoint_is_not_crossing() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        // Line ends exactly on the segment.
        assert!(s.crosses(&Point2::new(1.0, 1.0), &Point2::new(1.0, 0.0)).is_none());
        // Line passes through the segment's endpoint.
        assert!(s.crosses(&Point2::new(2.0, 1.0), &Point2::new(2.0, -1.0)).is_none());
    }

    #[test]
    fn near_endpoint_snaps_to_no_crossing() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        assert!(s
            .crosses(&Point2::new(1.999_999_9, 1.0), &Point2::new(1.999_999_9, -1.0))
            .is_none());
    }

    #[test]
    fn collinear_never_crosses() {
        let s = seg(0.0, 0.0, 4.0, 0.0);
        assert!(s.crosses(&Point2::new(1.0, 0.0), &Point2::new(3.0, 0.0)).is_none());
        assert!(s.crosses(&Point2::new(-1.0, 0.0), &Point2::new(5.0, 0.0)).is_none());
    }

    #[test]
    fn parallel_never_crosses() {
        let s = seg(0.0, 0.0, 4.0, 0.0);
        assert!(s.crosses(&Point2::new(0.0, 1.0), &Point2::new(4.0, 1.0)).is_none());
    }

    #[test]
    fn closest_point_clamps() {
        let s = seg(0.0, 0.0, 2.0, 0.0);
        assert_eq!(s.closest_point(&Point2::new(1.0, 1.0)), Point2::new(1.0, 0.0));
        assert_eq!(s.closest_point(&Point2::new(-3.0, 1.0)), Point2::new(0.0, 0.0));
        assert_eq!(s.closest_point(&Point2::new(5.0, -1.0)), Point2::new(2.0, 0.0));
    }

    #[test]
    fn closest_point_degenerate_segment() {
        let s = seg(3.0, 4.0, 3.0, 4.0);
        assert_eq!(s.closest_point(&Point2::new(0.0, 0.0)), Point2::new(3.0, 4.0));
        assert!(s.project(&Point2::new(0.0, 0.0)).is_none());
    }
}
