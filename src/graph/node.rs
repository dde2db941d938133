use std::hash::{Hash, Hasher};

use crate::math::{Point2, PointKey};

/// A graph node, identified by its exact coordinates.
///
/// Equality and hashing use the coordinate bit patterns (with `-0.0`
/// folded into `0.0`), so two nodes are the same node iff their
/// positions are identical.
#[derive(Debug, Clone, Copy)]
pub struct Node(pub Point2);

impl Node {
    /// Creates a node at `(x, y)`.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }

    /// Returns the node position.
    #[must_use]
    pub fn position(&self) -> Point2 {
        self.0
    }

    /// Euclidean distance to another node.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.0, &other.0)
    }

    fn key(&self) -> PointKey {
        PointKey::new(&self.0)
    }
}

impl From<Point2> for Node {
    fn from(point: Point2) -> Self {
        Self(point)
    }
}

impl From<Node> for Point2 {
    fn from(node: Node) -> Self {
        node.0
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
