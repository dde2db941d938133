//! Navigation-mesh pathfinding over 2D walkable triangulations.
//!
//! A [`Path`] owns a triangulated walkable region ([`Mesh`]) and a static
//! visibility graph over its boundary vertices. Queries attach the start and
//! end points to that graph and search for the shortest chain of
//! unobstructed straight lines between them.

pub mod error;
pub mod format;
pub mod graph;
pub mod math;
pub mod mesh;
pub mod path;

pub use error::{NavError, Result};
pub use math::{Point2, Segment, Vector2};
pub use mesh::{Mesh, Tint, TintScale, Vertex, VertexPayload};
pub use path::{Path, PathParams};
