//! Bounds-checked little-endian reader over an immutable byte buffer

use crate::error::AseError;

/// Sequential reader over a byte slice
///
/// All reads are little-endian and fail with [`AseError::OutOfBounds`]
/// instead of reading past the buffer. The offset only moves forward.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current absolute offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Bytes left after the current offset
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn ensure(&self, n: usize) -> Result<(), AseError> {
        if n > self.remaining() {
            return Err(AseError::OutOfBounds {
                offset: self.pos,
                len: n,
                buffer_len: self.data.len(),
            });
        }
        Ok(())
    }

    /// Advance `n` bytes without reading them
    pub fn skip(&mut self, n: usize) -> Result<(), AseError> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Advance to the absolute offset `target`
    pub fn skip_to(&mut self, target: usize) -> Result<(), AseError> {
        let n = target.checked_sub(self.pos).ok_or(AseError::BackwardSeek {
            from: self.pos,
            to: target,
        })?;
        self.skip(n)
    }

    /// Borrow the next `n` bytes without copying
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], AseError> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Fill `dest` from the buffer
    pub fn read_into(&mut self, dest: &mut [u8]) -> Result<(), AseError> {
        let bytes = self.read_bytes(dest.len())?;
        dest.copy_from_slice(bytes);
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], AseError> {
        let mut buf = [0u8; N];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8, AseError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, AseError> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16(&mut self) -> Result<u16, AseError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, AseError> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, AseError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, AseError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read a string: u16 byte length followed by that many UTF-8 bytes
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn read_string(&mut self) -> Result<String, AseError> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
