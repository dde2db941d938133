use crate::error::FormatError;
use crate::format::{ByteReader, PayloadCodec};
use crate::math::Vector2;

/// Per-vertex attribute data that can be interpolated across a triangle.
///
/// Barycentric interpolation only needs three capabilities: a neutral value
/// ([`Default`]), scaling by a weight, and summing two weighted payloads.
pub trait VertexPayload: Default + Clone + PartialEq {
    /// Returns this payload scaled by `factor`.
    #[must_use]
    fn multiply(&self, factor: f64) -> Self;

    /// Returns the component-wise sum of `self` and `other`.
    #[must_use]
    fn add(&self, other: &Self) -> Self;

    /// Scalar magnitude of the payload's scale component.
    ///
    /// The mesh tracks the min/max of this value across all vertices.
    fn scale_magnitude(&self) -> f64;
}

impl VertexPayload for () {
    fn multiply(&self, _factor: f64) -> Self {}

    fn add(&self, _other: &Self) -> Self {}

    fn scale_magnitude(&self) -> f64 {
        0.0
    }
}

impl VertexPayload for f64 {
    fn multiply(&self, factor: f64) -> Self {
        self * factor
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale_magnitude(&self) -> f64 {
        self.abs()
    }
}

/// An RGBA tint with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tint {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Tint {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a tint from normalized channels.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a tint from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba.map(|c| f64::from(c) / 255.0);
        Self { r, g, b, a }
    }

    /// Quantizes the tint to 8-bit channels, clamping out-of-range values.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Tint and sprite scale attached to a walkable-mesh vertex.
///
/// Rendering uses the interpolated value to tint and scale an actor by
/// where it stands on the mesh (e.g. depth-based scaling).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TintScale {
    pub tint: Tint,
    pub scale: Vector2,
}

impl TintScale {
    /// Creates a payload from a tint and a scale.
    #[must_use]
    pub fn new(tint: Tint, scale: Vector2) -> Self {
        Self { tint, scale }
    }

    /// White tint with a uniform scale.
    #[must_use]
    pub fn uniform(scale: f64) -> Self {
        Self::new(Tint::WHITE, Vector2::new(scale, scale))
    }
}

impl VertexPayload for TintScale {
    fn multiply(&self, factor: f64) -> Self {
        let t = self.tint;
        Self {
            tint: Tint::new(t.r * factor, t.g * factor, t.b * factor, t.a * factor),
            scale: self.scale * factor,
        }
    }

    fn add(&self, other: &Self) -> Self {
        let (t, o) = (self.tint, other.tint);
        Self {
            tint: Tint::new(t.r + o.r, t.g + o.g, t.b + o.b, t.a + o.a),
            scale: self.scale + other.scale,
        }
    }

    fn scale_magnitude(&self) -> f64 {
        self.scale.norm()
    }
}

impl PayloadCodec for TintScale {
    #[allow(clippy::cast_possible_truncation)]
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.tint.to_rgba8());
        out.extend_from_slice(&(self.scale.x as f32).to_le_bytes());
        out.extend_from_slice(&(self.scale.y as f32).to_le_bytes());
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, FormatError> {
        let rgba = [
            reader.read_u8()?,
            reader.read_u8()?,
            reader.read_u8()?,
            reader.read_u8()?,
        ];
        let sx = reader.read_f32()?;
        let sy = reader.read_f32()?;
        Ok(Self::new(
            Tint::from_rgba8(rgba),
            Vector2::new(f64::from(sx), f64::from(sy)),
        ))
    }
}
