use crate::error::GeometryError;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a [`Mesh`](super::Mesh).
    pub struct VertexId;
}

/// A mesh vertex: a position and its attached payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<T> {
    /// The 2D position of the vertex.
    pub position: Point2,
    /// Attribute data interpolated across adjacent triangles.
    pub payload: T,
}

impl<T> Vertex<T> {
    /// Creates a new vertex at the given position.
    #[must_use]
    pub fn new(position: Point2, payload: T) -> Self {
        Self { position, payload }
    }

    pub(crate) fn validate(&self) -> Result<(), GeometryError> {
        let p = self.position;
        if p.x.is_finite() && p.y.is_finite() {
            Ok(())
        } else {
            Err(GeometryError::NonFinite { x: p.x, y: p.y })
        }
    }
}

impl<T: Default> Vertex<T> {
    /// Creates a vertex with a default payload.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point2::new(x, y), T::default())
    }
}
