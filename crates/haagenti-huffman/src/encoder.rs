//! Payload encoding.

use haagenti_core::{Error, Result};

use crate::bits::BitWriter;
use crate::code_table::{Code, CodeTable};
use crate::symbol::{Symbol, ALPHABET_SIZE};

/// Write the code of every byte of `input`, then the end-of-stream code.
///
/// `codes` must come from `input`'s own frequency table. A byte (or the
/// end-of-stream symbol) without a code fails with
/// [`Error::SymbolNotInTable`] and leaves `writer` partially filled.
pub fn encode(input: &[u8], codes: &CodeTable, writer: &mut BitWriter) -> Result<()> {
    let mut lookup: [Option<&Code>; ALPHABET_SIZE] = [None; ALPHABET_SIZE];
    for (symbol, code) in codes.iter() {
        lookup[symbol.to_u16() as usize] = Some(code);
    }

    for &byte in input {
        let code = lookup[byte as usize].ok_or(Error::SymbolNotInTable {
            symbol: byte as u16,
        })?;
        writer.write_bits(code.bits());
    }

    let eof = Symbol::EndOfStream.to_u16();
    let code = lookup[eof as usize].ok_or(Error::SymbolNotInTable { symbol: eof })?;
    writer.write_bits(code.bits());

    Ok(())
}

/// Encode into a fresh byte vector. Returns the bytes and the payload length in bits.
pub fn encode_to_vec(input: &[u8], codes: &CodeTable) -> Result<(Vec<u8>, usize)> {
    let mut writer = BitWriter::with_capacity(input.len() / 2 + 1);
    encode(input, codes, &mut writer)?;
    let bits = writer.bit_len();
    Ok((writer.finish(), bits))
}
