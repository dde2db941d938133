pub mod segment;

pub use segment::Segment;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance for degeneracy checks (collinear triangles, zero-length segments).
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for walkability classification and near-equality.
///
/// Boundary points must classify as contained, so every containment and
/// crossing test in the crate goes through this value.
pub const EPSILON: f64 = 1e-5;

/// Relative-epsilon float comparison.
///
/// Falls back to an absolute comparison against [`EPSILON`] when either
/// operand is near zero; otherwise compares `|a - b| / (|a| + |b|)`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn nearly_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    let abs_a = a.abs();
    let abs_b = b.abs();
    if abs_a < EPSILON || abs_b < EPSILON {
        return diff < EPSILON;
    }
    diff / (abs_a + abs_b) < EPSILON
}

/// Exact-position hash key for a point.
///
/// Built from the coordinate bit patterns with `-0.0` folded into `0.0`, so
/// two keys are equal iff the positions are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey(u64, u64);

impl PointKey {
    /// Creates the key for `point`.
    #[must_use]
    pub fn new(point: &Point2) -> Self {
        // Adding 0.0 folds -0.0 into +0.0.
        Self((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
    }
}

/// Component-wise [`nearly_equal`] on two points.
#[must_use]
pub fn points_nearly_equal(a: &Point2, b: &Point2) -> bool {
    nearly_equal(a.x, b.x) && nearly_equal(a.y, b.y)
}

/// Twice the signed area of triangle `abc` (positive for counter-clockwise).
#[must_use]
pub fn cross_2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}
