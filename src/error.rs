use std::path::PathBuf;

use thiserror::Error;

use crate::math::Point2;

/// Top-level error type for the navigation engine.
#[derive(Debug, Error)]
pub enum NavError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Errors raised while building a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("degenerate triangle: {a}, {b}, {c} are collinear")]
    DegenerateTriangle { a: Point2, b: Point2, c: Point2 },
}

/// Errors raised while reading or writing the compressed path format.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Neither the given path nor its extended form exists.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Unexpected end of the decompressed stream.
    #[error("unexpected end of data at byte {position}")]
    UnexpectedEof {
        /// Offset in the decompressed stream.
        position: usize,
    },

    /// Triangle count in the header is negative.
    #[error("invalid triangle count: {0}")]
    InvalidTriangleCount(i32),

    /// Triangle count does not fit the 32-bit header field.
    #[error("too many triangles to encode: {0}")]
    TooManyTriangles(usize),

    /// Data remains after the last triangle.
    #[error("{count} trailing bytes after the last triangle")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },

    /// Data follows the end of the compressed stream.
    #[error("{count} bytes after the end of the compressed stream")]
    TrailingStreamBytes {
        /// Number of bytes after the gzip member.
        count: usize,
    },

    /// Header scale bounds are unusable.
    #[error("invalid scale bounds: min {min}, max {max}")]
    InvalidScaleBounds { min: f32, max: f32 },

    /// I/O or decompression failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`NavError`].
pub type Result<T> = std::result::Result<T, NavError>;
