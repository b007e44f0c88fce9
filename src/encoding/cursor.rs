// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Input cursor: bounds-checked reads over an encoded byte slice.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Result as CoreResult};

/// Read cursor with a single-level mark.
///
/// Every read records the offset it started at as the mark, so a decoder that
/// reads a type tag and then needs to hand the stream to another decoder can
/// [`rewind`](InputCursor::rewind) to just before the tag. [`mark`](InputCursor::mark)
/// sets the mark explicitly.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use polycodec::encoding::InputCursor;
///
/// let data = [0x2A, 0x00, 0x00, 0x00];
/// let mut cursor = InputCursor::new(&data);
/// assert_eq!(cursor.read_i32()?, 42);
/// cursor.rewind();
/// assert_eq!(cursor.position(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InputCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Start of the most recent read, or an explicit mark
    mark: usize,
}

impl<'a> InputCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            mark: 0,
        }
    }

    /// Get the current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Record the current position as the mark.
    #[inline]
    pub fn mark(&mut self) {
        self.mark = self.offset;
    }

    /// Return to the mark.
    #[inline]
    pub fn rewind(&mut self) {
        self.offset = self.mark;
    }

    /// Take `count` bytes, recording the read start as the mark.
    fn take(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::truncated(count, self.remaining(), self.offset));
        }
        self.mark = self.offset;
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Read a boolean; any byte other than `0`/`1` is invalid.
    pub fn read_bool(&mut self) -> CoreResult<bool> {
        match self.take(1)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::invalid_data(
                self.mark,
                format!("invalid bool byte 0x{other:02x}"),
            )),
        }
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> CoreResult<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> CoreResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> CoreResult<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    /// Read a u16 value.
    pub fn read_u16(&mut self) -> CoreResult<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> CoreResult<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> CoreResult<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Read an i64 value.
    pub fn read_i64(&mut self) -> CoreResult<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    /// Read a u64 value.
    pub fn read_u64(&mut self) -> CoreResult<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Read an f32 value, bit pattern preserved.
    pub fn read_f32(&mut self) -> CoreResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read an f64 value, bit pattern preserved.
    pub fn read_f64(&mut self) -> CoreResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read a Unicode scalar value.
    pub fn read_char(&mut self) -> CoreResult<char> {
        let raw = self.read_u32()?;
        char::from_u32(raw).ok_or_else(|| {
            CodecError::invalid_data(self.mark, format!("invalid char scalar 0x{raw:x}"))
        })
    }

    /// Read a `u16`-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> CoreResult<String> {
        let start = self.offset;
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        self.mark = start;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| CodecError::invalid_data(start, format!("invalid UTF-8 string: {e}")))
    }

    /// Read an `i32`-prefixed byte blob.
    pub fn read_blob(&mut self) -> CoreResult<Vec<u8>> {
        let start = self.offset;
        let len = self.read_count()?;
        let bytes = self.take(len)?;
        self.mark = start;
        Ok(bytes.to_vec())
    }

    /// Read an `i32` element count; negative counts are invalid.
    pub fn read_count(&mut self) -> CoreResult<usize> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| {
            CodecError::invalid_data(self.mark, format!("negative element count {count}"))
        })
    }

    /// Read raw bytes with no prefix.
    pub fn read_raw(&mut self, count: usize) -> CoreResult<&'a [u8]> {
        self.take(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_width() {
        let data = [0x34, 0x12, 0xFE, 0xFF, 0xFF, 0xFF];
        let mut cursor = InputCursor::new(&data);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_i32().unwrap(), -2);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_truncated_read() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = InputCursor::new(&data);
        let err = cursor.read_u32().unwrap_err();
        assert!(matches!(
            err,
            CodecError::TruncatedStream {
                requested: 4,
                available: 3,
                position: 0
            }
        ));
        // a failed read consumes nothing
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_every_read_sets_mark() {
        let data = [7, 0, 0, 0, 9, 0, 0, 0];
        let mut cursor = InputCursor::new(&data);
        cursor.read_i32().unwrap();
        assert_eq!(cursor.read_i32().unwrap(), 9);
        cursor.rewind();
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.read_i32().unwrap(), 9);
    }

    #[test]
    fn test_explicit_mark() {
        let data = [1, 2, 3, 4];
        let mut cursor = InputCursor::new(&data);
        cursor.read_u8().unwrap();
        cursor.mark();
        cursor.read_u8().unwrap();
        cursor.read_u8().unwrap();
        cursor.rewind();
        // the second read reset the mark to its own start
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_invalid_bool() {
        let mut cursor = InputCursor::new(&[2]);
        let err = cursor.read_bool().unwrap_err();
        assert!(matches!(err, CodecError::InvalidData { position: 0, .. }));
    }

    #[test]
    fn test_invalid_char() {
        let data = 0xD800u32.to_le_bytes();
        let mut cursor = InputCursor::new(&data);
        assert!(matches!(
            cursor.read_char().unwrap_err(),
            CodecError::InvalidData { .. }
        ));
    }

    #[test]
    fn test_read_string() {
        let data = [5, 0, b'h', b'e', b'l', b'l', b'o'];
        let mut cursor = InputCursor::new(&data);
        assert_eq!(cursor.read_string().unwrap(), "hello");
        cursor.rewind();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_string_truncated_payload() {
        let data = [5, 0, b'h', b'e'];
        let mut cursor = InputCursor::new(&data);
        assert!(cursor.read_string().unwrap_err().is_truncation());
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [2, 0, 0xC3, 0x28];
        let mut cursor = InputCursor::new(&data);
        assert!(matches!(
            cursor.read_string().unwrap_err(),
            CodecError::InvalidData { position: 0, .. }
        ));
    }

    #[test]
    fn test_negative_count() {
        let data = (-1i32).to_le_bytes();
        let mut cursor = InputCursor::new(&data);
        assert!(matches!(
            cursor.read_count().unwrap_err(),
            CodecError::InvalidData { .. }
        ));
    }

    #[test]
    fn test_read_blob() {
        let data = [2, 0, 0, 0, 0xAA, 0xBB];
        let mut cursor = InputCursor::new(&data);
        assert_eq!(cursor.read_blob().unwrap(), vec![0xAA, 0xBB]);
        assert_eq!(cursor.remaining(), 0);
    }
}
