use crate::error::FormatError;

/// Little-endian cursor over a decompressed byte stream.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset from the start of the stream.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Reads exactly `N` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnexpectedEof`] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let end = self.position + N;
        let bytes = self
            .data
            .get(self.position..end)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(FormatError::UnexpectedEof {
                position: self.position,
            })?;
        self.position = end;
        Ok(bytes)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnexpectedEof`] at the end of the stream.
    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a little-endian `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Reads a little-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        self.read_array().map(i32::from_le_bytes)
    }
}
