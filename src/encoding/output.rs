// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Output cursor: appends the little-endian wire representation of primitives.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::core::{CodecError, Result as CoreResult};

/// Default initial capacity for the output buffer.
const DEFAULT_CAPACITY: usize = 64;

/// Largest string payload in bytes (`u16` length prefix).
pub const MAX_STRING_BYTES: usize = u16::MAX as usize;

/// Largest blob or element count (`i32` prefix).
pub const MAX_COUNT: usize = i32::MAX as usize;

/// Growable byte sink for one encode operation.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use polycodec::encoding::OutputCursor;
///
/// let mut out = OutputCursor::new();
/// out.write_i32(42)?.write_string("hello")?;
/// assert_eq!(out.finish().len(), 11);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OutputCursor {
    buffer: Vec<u8>,
}

impl Default for OutputCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputCursor {
    /// Create an empty cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty cursor with the given initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes written so far.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the cursor and return the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Write a boolean as a single `0`/`1` byte.
    pub fn write_bool(&mut self, value: bool) -> CoreResult<&mut Self> {
        self.buffer.write_u8(u8::from(value))?;
        Ok(self)
    }

    /// Write an 8-bit signed integer.
    pub fn write_i8(&mut self, value: i8) -> CoreResult<&mut Self> {
        self.buffer.write_i8(value)?;
        Ok(self)
    }

    /// Write an 8-bit unsigned integer.
    pub fn write_u8(&mut self, value: u8) -> CoreResult<&mut Self> {
        self.buffer.write_u8(value)?;
        Ok(self)
    }

    /// Write a 16-bit signed integer.
    pub fn write_i16(&mut self, value: i16) -> CoreResult<&mut Self> {
        self.buffer.write_i16::<LittleEndian>(value)?;
        Ok(self)
    }

    /// Write a 16-bit unsigned integer.
    pub fn write_u16(&mut self, value: u16) -> CoreResult<&mut Self> {
        self.buffer.write_u16::<LittleEndian>(value)?;
        Ok(self)
    }

    /// Write a 32-bit signed integer.
    pub fn write_i32(&mut self, value: i32) -> CoreResult<&mut Self> {
        self.buffer.write_i32::<LittleEndian>(value)?;
        Ok(self)
    }

    /// Write a 32-bit unsigned integer.
    pub fn write_u32(&mut self, value: u32) -> CoreResult<&mut Self> {
        self.buffer.write_u32::<LittleEndian>(value)?;
        Ok(self)
    }

    /// Write a 64-bit signed integer.
    pub fn write_i64(&mut self, value: i64) -> CoreResult<&mut Self> {
        self.buffer.write_i64::<LittleEndian>(value)?;
        Ok(self)
    }

    /// Write a 64-bit unsigned integer.
    pub fn write_u64(&mut self, value: u64) -> CoreResult<&mut Self> {
        self.buffer.write_u64::<LittleEndian>(value)?;
        Ok(self)
    }

    /// Write a 32-bit float, bit pattern preserved.
    pub fn write_f32(&mut self, value: f32) -> CoreResult<&mut Self> {
        self.buffer.write_u32::<LittleEndian>(value.to_bits())?;
        Ok(self)
    }

    /// Write a 64-bit float, bit pattern preserved.
    pub fn write_f64(&mut self, value: f64) -> CoreResult<&mut Self> {
        self.buffer.write_u64::<LittleEndian>(value.to_bits())?;
        Ok(self)
    }

    /// Write a character as its Unicode scalar value.
    pub fn write_char(&mut self, value: char) -> CoreResult<&mut Self> {
        self.write_u32(u32::from(value))
    }

    /// Write a `u16` byte length followed by the UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) -> CoreResult<&mut Self> {
        let len = value.len();
        if len > MAX_STRING_BYTES {
            return Err(CodecError::limit_exceeded("string", len, MAX_STRING_BYTES));
        }
        self.write_u16(len as u16)?;
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(self)
    }

    /// Write an `i32` length followed by the raw bytes.
    pub fn write_blob(&mut self, value: &[u8]) -> CoreResult<&mut Self> {
        self.write_count(value.len(), "byte blob")?;
        self.buffer.extend_from_slice(value);
        Ok(self)
    }

    /// Write an `i32` element count.
    pub fn write_count(&mut self, count: usize, what: &str) -> CoreResult<&mut Self> {
        if count > MAX_COUNT {
            return Err(CodecError::limit_exceeded(what, count, MAX_COUNT));
        }
        self.write_i32(count as i32)
    }

    /// Append raw bytes with no prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) -> CoreResult<&mut Self> {
        self.buffer.extend_from_slice(bytes);
        Ok(self)
    }
}
