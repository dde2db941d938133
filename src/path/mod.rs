mod search;
mod visibility;

pub use search::shortest_path;
pub use visibility::is_visible;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path as FsPath, PathBuf};

use tracing::{debug, info};

use crate::error::{FormatError, Result};
use crate::format::{self, PayloadCodec};
use crate::graph::{DynamicLinks, Node, QueryGraph, StaticLinks};
use crate::math::Point2;
use crate::mesh::{Mesh, Vertex, VertexPayload};

/// Parameters controlling path queries and serialization.
#[derive(Debug, Clone, Copy)]
pub struct PathParams {
    /// Multiplier turning Euclidean link lengths into integer search costs.
    pub cost_resolution: f64,
    /// Deflate level (0–9) used when saving.
    pub compression_level: u32,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            cost_resolution: 1000.0,
            compression_level: 6,
        }
    }
}

/// A walkable mesh together with its precomputed visibility graph.
///
/// The mesh and static links are fixed after construction. Each query
/// builds its own dynamic links, so queries only need `&self`.
#[derive(Debug, Clone)]
pub struct Path<T> {
    mesh: Mesh<T>,
    statics: StaticLinks,
    min_scale: f64,
    max_scale: f64,
    params: PathParams,
}

impl<T: VertexPayload> Path<T> {
    /// Wraps `mesh` and computes its static links with default parameters.
    #[must_use]
    pub fn new(mesh: Mesh<T>) -> Self {
        Self::with_params(mesh, PathParams::default())
    }

    /// Wraps `mesh` and computes its static links.
    #[must_use]
    pub fn with_params(mesh: Mesh<T>, params: PathParams) -> Self {
        let nodes = mesh.boundary_vertices().into_iter().map(Node).collect();
        let statics = StaticLinks::calculate(nodes, |a, b| is_visible(&mesh, a, b));
        debug!(
            nodes = statics.nodes().len(),
            links = statics.graph().link_count(),
            "static links computed"
        );
        Self {
            min_scale: mesh.min_scale(),
            max_scale: mesh.max_scale(),
            mesh,
            statics,
            params,
        }
    }

    /// Builds a path from raw triangle corner data.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh cannot be built (see [`Mesh::from_triangles`]).
    pub fn from_triangles<I>(triangles: I) -> Result<Self>
    where
        I: IntoIterator<Item = [Vertex<T>; 3]>,
    {
        Ok(Self::new(Mesh::from_triangles(triangles)?))
    }

    /// Returns `true` if `point` is inside the walkable region.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.mesh.is_walkable(point)
    }

    /// Line-of-sight test used for every link in this path's graphs.
    #[must_use]
    pub fn is_visible(&self, from: &Point2, to: &Point2) -> bool {
        is_visible(&self.mesh, from, to)
    }

    /// Shortest walkable route from `start` to `end`.
    ///
    /// The result starts with `start` and ends with `end`. It is empty if
    /// either point is outside the walkable region or no chain of links
    /// connects them.
    #[must_use]
    pub fn find_path(&self, start: Point2, end: Point2) -> Vec<Point2> {
        let mut dynamic = DynamicLinks::default();
        self.find_path_with(start, end, &mut dynamic)
    }

    /// Like [`find_path`](Self::find_path), reusing `dynamic` as scratch
    /// space for the query's links. Its previous contents are discarded.
    pub fn find_path_with(
        &self,
        start: Point2,
        end: Point2,
        dynamic: &mut DynamicLinks,
    ) -> Vec<Point2> {
        if !self.contains(&start) || !self.contains(&end) {
            debug!(?start, ?end, "path endpoint outside walkable region");
            return Vec::new();
        }

        let (from, to) = (Node(start), Node(end));
        dynamic.recalculate(&self.statics, from, to, |a, b| self.is_visible(a, b));

        let graph = QueryGraph::new(&self.statics, dynamic);
        match shortest_path(&graph, from, to, self.params.cost_resolution) {
            Some(nodes) => {
                let route: Vec<Point2> = nodes.into_iter().map(Point2::from).collect();
                debug!(
                    waypoints = route.len(),
                    length = Self::route_length(&route),
                    "path found"
                );
                route
            }
            None => {
                debug!(?start, ?end, "no path");
                Vec::new()
            }
        }
    }

    /// Total length of a waypoint list.
    #[must_use]
    pub fn route_length(route: &[Point2]) -> f64 {
        route
            .windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]))
            .sum()
    }

    /// Interpolated vertex payload at `point`, or `None` if not walkable.
    #[must_use]
    pub fn payload_at(&self, point: &Point2) -> Option<T> {
        self.mesh.payload_at(point)
    }

    /// Returns `point` if walkable, otherwise the closest boundary point.
    #[must_use]
    pub fn nearest_walkable_point(&self, point: &Point2) -> Option<Point2> {
        self.mesh.nearest_walkable_point(point)
    }

    /// Maps a scale magnitude into `[0, 1]` over this path's scale range.
    #[must_use]
    pub fn normalized_scale(&self, magnitude: f64) -> f64 {
        let range = self.max_scale - self.min_scale;
        if range <= 0.0 {
            return 0.0;
        }
        ((magnitude - self.min_scale) / range).clamp(0.0, 1.0)
    }

    /// The walkable mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh<T> {
        &self.mesh
    }

    /// Links between persistent boundary nodes.
    #[must_use]
    pub fn static_links(&self) -> &StaticLinks {
        &self.statics
    }

    /// Smallest vertex scale magnitude.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Largest vertex scale magnitude.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Query and serialization parameters.
    #[must_use]
    pub fn params(&self) -> &PathParams {
        &self.params
    }
}

impl<T: VertexPayload + PayloadCodec> Path<T> {
    /// Loads a path from a compressed byte stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is corrupt, truncated, has trailing
    /// data, or describes degenerate triangles.
    pub fn load_from_reader<R: Read>(reader: R, params: PathParams) -> Result<Self> {
        let bytes = format::decompress(reader)?;
        let mesh = format::decode_mesh(&bytes)?;
        let path = Self::with_params(mesh, params);
        info!(
            bytes = bytes.len(),
            triangles = path.mesh.triangles().len(),
            nodes = path.statics.nodes().len(),
            links = path.statics.graph().link_count(),
            "path loaded"
        );
        Ok(path)
    }

    /// Loads a path from disk, appending the `.stp` extension when the
    /// plain name does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is found or it cannot be decoded.
    pub fn load_from_file(path: impl AsRef<FsPath>, params: PathParams) -> Result<Self> {
        let resolved = format::resolve_path(path.as_ref())?;
        debug!(path = %resolved.display(), "loading path");
        let file = File::open(&resolved).map_err(FormatError::from)?;
        Self::load_from_reader(BufReader::new(file), params)
    }

    /// Writes the compressed representation to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<W> {
        let bytes = format::encode_mesh(&self.mesh)?;
        let writer = format::compress(&bytes, writer, self.params.compression_level)
            .map_err(FormatError::from)?;
        info!(
            bytes = bytes.len(),
            triangles = self.mesh.triangles().len(),
            "path saved"
        );
        Ok(writer)
    }

    /// Writes the compressed representation to disk, appending the `.stp`
    /// extension if missing. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, path: impl AsRef<FsPath>) -> Result<PathBuf> {
        let target = format::with_extension(path.as_ref());
        let file = File::create(&target).map_err(FormatError::from)?;
        let mut writer = self.save_to_writer(BufWriter::new(file))?;
        writer.flush().map_err(FormatError::from)?;
        Ok(target)
    }
}
