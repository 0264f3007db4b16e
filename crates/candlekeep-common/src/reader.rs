//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! little-endian data from a byte slice without copying.

use zerocopy::FromBytes;

use crate::resref::RESREF_SIZE;
use crate::{text, Error, ResRef, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// Positions are absolute within the underlying slice, which matches how
/// resource files address their sections.
///
/// # Example
///
/// ```
/// use candlekeep_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u16().unwrap(), 0x0605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// The whole underlying buffer.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Advance the position by a number of bytes.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                offset: self.position,
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Peek at bytes at an absolute position without moving the cursor.
    #[inline]
    pub fn peek_at(&self, position: usize, count: usize) -> Result<&'a [u8]> {
        let available = self.data.len().saturating_sub(position);
        if available < count {
            return Err(Error::UnexpectedEof {
                offset: position,
                needed: count,
                available,
            });
        }
        Ok(&self.data[position..position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_bytes(2)?;
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an unsigned little-endian integer of 1, 2 or 4 bytes.
    pub fn read_uint(&mut self, width: usize) -> Result<u32> {
        match width {
            1 => self.read_u8().map(u32::from),
            2 => self.read_u16().map(u32::from),
            _ => self.read_u32(),
        }
    }

    /// Read a signed little-endian integer of 1, 2 or 4 bytes.
    pub fn read_int(&mut self, width: usize) -> Result<i32> {
        match width {
            1 => self.read_i8().map(i32::from),
            2 => self.read_i16().map(i32::from),
            _ => self.read_i32(),
        }
    }

    /// Read an 8-byte resource reference.
    pub fn read_resref(&mut self) -> Result<ResRef> {
        self.read_struct::<ResRef>()
    }

    /// Read a string from a fixed-size slot, stopping at the first NUL.
    pub fn read_text(&mut self, width: usize) -> Result<String> {
        let bytes = self.read_bytes(width)?;
        Ok(text::decode(bytes))
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let offset = self.position;
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            offset,
            needed: size,
            available: bytes.len(),
        })
    }

    /// Peek at a u16 at an absolute position.
    #[inline]
    pub fn peek_u16_at(&self, position: usize) -> Result<u16> {
        let bytes = self.peek_at(position, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Peek at a u32 at an absolute position.
    #[inline]
    pub fn peek_u32_at(&self, position: usize) -> Result<u32> {
        let bytes = self.peek_at(position, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Expect a specific signature.
    pub fn expect_signature(&mut self, expected: &[u8]) -> Result<()> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidSignature {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}

const _: () = assert!(RESREF_SIZE == std::mem::size_of::<ResRef>());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32: 0x04030201
            0xFF, 0xFF, // i16: -1
            0x80, // i8: -128
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_i16().unwrap(), -1);
        assert_eq!(reader.read_i8().unwrap(), -128);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_resref_and_text() {
        let data = b"SW1H01\0\0Ajantis\0\0\0";
        let mut reader = BinaryReader::new(data);

        assert_eq!(reader.read_resref().unwrap().to_string(), "SW1H01");
        assert_eq!(reader.read_text(10).unwrap(), "Ajantis");
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x00, 0x00, 0x01, 0x02, 0x03, 0x04];
        let reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_u32_at(2).unwrap(), 0x04030201);
        assert_eq!(reader.peek_u16_at(4).unwrap(), 0x0403);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_eof_error_reports_offset() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = BinaryReader::new_at(&data, 1);

        match reader.read_u32() {
            Err(Error::UnexpectedEof {
                offset,
                needed,
                available,
            }) => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("expected EOF error, got {other:?}"),
        }
    }

    #[test]
    fn test_signature() {
        let data = b"EFF V2.0";
        let mut reader = BinaryReader::new(data);
        assert!(reader.expect_signature(b"EFF ").is_ok());
        assert!(reader.expect_signature(b"V1  ").is_err());
    }
}
