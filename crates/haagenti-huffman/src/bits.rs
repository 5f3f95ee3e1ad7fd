//! MSB-first bit I/O for the Huffman payload.
//!
//! The first bit of a code lands in the most significant free bit of the
//! current byte. A trailing partial byte is padded with zeros.

use haagenti_core::{Error, Result};

/// Bit writer for the payload.
#[derive(Debug)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u8,
    bit_count: u8,
    written: usize,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create with capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            bit_buf: 0,
            bit_count: 0,
            written: 0,
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.bit_buf = (self.bit_buf << 1) | bit as u8;
        self.bit_count += 1;
        self.written += 1;

        if self.bit_count == 8 {
            self.data.push(self.bit_buf);
            self.bit_buf = 0;
            self.bit_count = 0;
        }
    }

    /// Write bits in order.
    #[inline]
    pub fn write_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> usize {
        self.written
    }

    /// Get current length in bytes, counting a partial byte.
    pub fn len(&self) -> usize {
        self.data.len() + usize::from(self.bit_count > 0)
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Flush remaining bits (pad with zeros).
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.data.push(self.bit_buf << (8 - self.bit_count));
        }
        self.data
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read the next bit, or `None` once the data is exhausted.
    #[inline]
    pub fn next_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.pos / 8)?;
        let bit = (byte >> (7 - (self.pos % 8))) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Read the next bit, failing with [`Error::UnexpectedEof`] when exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        self.next_bit()
            .ok_or_else(|| Error::unexpected_eof(self.data.len()))
    }

    /// Bits consumed so far.
    pub fn bits_read(&self) -> usize {
        self.pos
    }

    /// Bits left to read, padding included.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Check if at end of input.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
