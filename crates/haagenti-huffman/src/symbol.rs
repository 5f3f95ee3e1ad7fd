//! Coding alphabet: the 256 byte values plus an end-of-stream sentinel.

use std::fmt;

/// Wire value of [`Symbol::EndOfStream`]. One past the byte range.
pub const PSEUDO_EOF: u16 = 256;

/// Number of distinct symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 257;

/// A coded symbol.
///
/// Ordering places every byte (ascending) before `EndOfStream`, matching
/// the order of the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A literal byte from the input.
    Byte(u8),
    /// Synthetic terminator appended once per stream.
    EndOfStream,
}

impl Symbol {
    /// Wire value: 0-255 for bytes, [`PSEUDO_EOF`] for the terminator.
    #[inline]
    pub fn to_u16(self) -> u16 {
        match self {
            Symbol::Byte(b) => b as u16,
            Symbol::EndOfStream => PSEUDO_EOF,
        }
    }

    /// Parse a wire value. Returns `None` for values above [`PSEUDO_EOF`].
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0..=255 => Some(Symbol::Byte(value as u8)),
            PSEUDO_EOF => Some(Symbol::EndOfStream),
            _ => None,
        }
    }

    #[inline]
    pub fn is_end_of_stream(self) -> bool {
        matches!(self, Symbol::EndOfStream)
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Byte(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}'", *b as char),
            Symbol::Byte(b) => write!(f, "0x{b:02x}"),
            Symbol::EndOfStream => f.write_str("EOF"),
        }
    }
}
