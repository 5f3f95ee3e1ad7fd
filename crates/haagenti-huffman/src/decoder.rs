//! Tree-guided payload decoding.

use haagenti_core::{Error, Result};

use crate::bits::BitReader;
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Walk `tree` one bit at a time, appending decoded bytes to `output` until
/// the end-of-stream leaf is reached.
///
/// At most `limit` bytes are appended. A stream that would decode more fails
/// with [`Error::LimitExceeded`] before the extra byte is pushed.
///
/// Running out of bits first fails with [`Error::TruncatedPayload`]; bytes
/// decoded up to that point remain in `output`.
///
/// A single-leaf tree consumes no bits: an end-of-stream leaf decodes to
/// nothing and a byte leaf decodes to that byte repeated `count` times.
pub fn decode(
    reader: &mut BitReader<'_>,
    tree: &HuffmanTree,
    output: &mut Vec<u8>,
    limit: usize,
) -> Result<()> {
    if let Node::Leaf { symbol, count } = *tree.root_node() {
        if let Symbol::Byte(byte) = symbol {
            if count > limit as u64 {
                return Err(Error::LimitExceeded {
                    limit,
                    requested: count,
                });
            }
            output.resize(output.len() + count as usize, byte);
        }
        return Ok(());
    }

    let start = output.len();
    let root = tree.root();
    let mut cursor = root;

    loop {
        match *tree.node(cursor) {
            Node::Leaf {
                symbol: Symbol::EndOfStream,
                ..
            } => return Ok(()),
            Node::Leaf {
                symbol: Symbol::Byte(byte),
                ..
            } => {
                let decoded = output.len() - start;
                if decoded == limit {
                    return Err(Error::LimitExceeded {
                        limit,
                        requested: decoded as u64 + 1,
                    });
                }
                output.push(byte);
                cursor = root;
            }
            Node::Internal { zero, one, .. } => {
                let Some(bit) = reader.next_bit() else {
                    return Err(Error::truncated(reader.bits_read(), output.len() - start));
                };
                cursor = if bit { one } else { zero };
            }
        }
    }
}

/// Decode a whole payload into a fresh vector.
pub fn decode_to_vec(payload: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(payload);
    let mut output = Vec::new();
    decode(&mut reader, tree, &mut output, usize::MAX)?;
    Ok(output)
}
