//! Compressed on-disk representation of a walkable mesh.
//!
//! Layout of the decompressed stream (little-endian):
//!
//! ```text
//! [min_scale: f32][max_scale: f32][triangle_count: i32]
//! triangle_count × 3 × ([x: f32][y: f32][payload])
//! ```
//!
//! The whole stream is gzip-compressed. Link graphs are not stored; they are
//! rebuilt from the mesh after loading.

mod reader;

pub use reader::ByteReader;

use std::ffi::OsStr;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{FormatError, Result};
use crate::math::Point2;
use crate::mesh::{Mesh, Vertex, VertexPayload};

/// File extension appended by the loader when missing.
pub const EXTENSION: &str = "stp";

/// Binary encoding of a vertex payload.
pub trait PayloadCodec: Sized {
    /// Appends the encoded payload to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Reads one payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream ends early or holds invalid data.
    fn decode(reader: &mut ByteReader<'_>) -> std::result::Result<Self, FormatError>;
}

impl PayloadCodec for () {
    fn encode(&self, _out: &mut Vec<u8>) {}

    fn decode(_reader: &mut ByteReader<'_>) -> std::result::Result<Self, FormatError> {
        Ok(())
    }
}

impl PayloadCodec for f64 {
    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&(*self as f32).to_le_bytes());
    }

    fn decode(reader: &mut ByteReader<'_>) -> std::result::Result<Self, FormatError> {
        reader.read_f32().map(f64::from)
    }
}

/// Resolves the file to load: `path` itself if it exists, otherwise `path`
/// with [`EXTENSION`] appended.
///
/// # Errors
///
/// Returns [`FormatError::FileNotFound`] if neither exists.
pub fn resolve_path(path: &Path) -> std::result::Result<PathBuf, FormatError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.extension() != Some(OsStr::new(EXTENSION)) {
        let extended = with_extension(path);
        if extended.is_file() {
            return Ok(extended);
        }
    }
    Err(FormatError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Appends [`EXTENSION`] unless `path` already carries it.
#[must_use]
pub fn with_extension(path: &Path) -> PathBuf {
    if path.extension() == Some(OsStr::new(EXTENSION)) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// Serializes `mesh` into the uncompressed byte layout.
///
/// # Errors
///
/// Returns an error if the triangle count does not fit the header.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_mesh<T>(mesh: &Mesh<T>) -> Result<Vec<u8>>
where
    T: VertexPayload + PayloadCodec,
{
    let count = i32::try_from(mesh.triangles().len())
        .map_err(|_| FormatError::TooManyTriangles(mesh.triangles().len()))?;

    let mut out = Vec::new();
    out.extend_from_slice(&(mesh.min_scale() as f32).to_le_bytes());
    out.extend_from_slice(&(mesh.max_scale() as f32).to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    for triangle in mesh.triangles() {
        for vertex in mesh.corners(triangle) {
            out.extend_from_slice(&(vertex.position.x as f32).to_le_bytes());
            out.extend_from_slice(&(vertex.position.y as f32).to_le_bytes());
            vertex.payload.encode(&mut out);
        }
    }
    Ok(out)
}

/// Rebuilds a mesh from the uncompressed byte layout.
///
/// # Errors
///
/// Returns an error if the data is truncated, has trailing bytes, carries
/// an invalid header, or describes degenerate triangles.
pub fn decode_mesh<T>(bytes: &[u8]) -> Result<Mesh<T>>
where
    T: VertexPayload + PayloadCodec,
{
    let mut reader = ByteReader::new(bytes);
    let min_scale = reader.read_f32()?;
    let max_scale = reader.read_f32()?;
    if !min_scale.is_finite() || !max_scale.is_finite() || min_scale > max_scale {
        return Err(FormatError::InvalidScaleBounds {
            min: min_scale,
            max: max_scale,
        }
        .into());
    }

    let count = reader.read_i32()?;
    let count = usize::try_from(count).map_err(|_| FormatError::InvalidTriangleCount(count))?;

    let triangles = (0..count)
        .map(|_| -> std::result::Result<[Vertex<T>; 3], FormatError> {
            Ok([
                read_vertex(&mut reader)?,
                read_vertex(&mut reader)?,
                read_vertex(&mut reader)?,
            ])
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if reader.remaining() > 0 {
        return Err(FormatError::TrailingBytes {
            count: reader.remaining(),
        }
        .into());
    }

    let mut mesh = Mesh::from_triangles(triangles)?;
    mesh.set_scale_bounds(f64::from(min_scale), f64::from(max_scale));
    Ok(mesh)
}

fn read_vertex<T: PayloadCodec>(
    reader: &mut ByteReader<'_>,
) -> std::result::Result<Vertex<T>, FormatError> {
    let x = reader.read_f32()?;
    let y = reader.read_f32()?;
    let payload = T::decode(reader)?;
    Ok(Vertex::new(Point2::new(f64::from(x), f64::from(y)), payload))
}

/// Gzip-compresses `bytes` into `writer`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn compress<W: Write>(bytes: &[u8], writer: W, level: u32) -> std::io::Result<W> {
    let mut encoder = GzEncoder::new(writer, Compression::new(level));
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Reads and gunzips the whole of `reader`.
///
/// The input must hold exactly one gzip member.
///
/// # Errors
///
/// Returns an error if the stream is not valid gzip, is truncated, is
/// followed by further bytes, or reading fails.
pub fn decompress<R: Read>(reader: R) -> std::result::Result<Vec<u8>, FormatError> {
    let mut decoder = GzDecoder::new(BufReader::new(reader));
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;

    let mut rest = Vec::new();
    decoder.into_inner().read_to_end(&mut rest)?;
    if !rest.is_empty() {
        return Err(FormatError::TrailingStreamBytes { count: rest.len() });
    }
    Ok(bytes)
}
