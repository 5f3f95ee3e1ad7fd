//! Container framing: marker, frequency header, payload.
//!
//! ## Layout
//!
//! ```text
//! +--------+-------------+----------------------------+-----------+
//! | marker | entry count | entries                    | payload   |
//! | 0xFD   | u16 LE      | n x (symbol u16, count u64)| bits...   |
//! +--------+-------------+----------------------------+-----------+
//! ```
//!
//! Entries are strictly ascending by symbol and must include end-of-stream.
//! Nothing past the marker is parsed unless the marker matches exactly.

use haagenti_core::{Error, Result};
use tracing::warn;

use crate::frequency::FrequencyTable;
use crate::symbol::{Symbol, ALPHABET_SIZE};

/// Leading marker byte, `11111101`.
pub const MAGIC: u8 = 0b1111_1101;

/// Bytes per serialized table entry.
pub const ENTRY_SIZE: usize = 2 + 8;

/// Bytes before the first entry (marker and entry count).
const PREAMBLE_SIZE: usize = 1 + 2;

/// Header size in bytes for a table with `entries` entries.
pub const fn header_size(entries: usize) -> usize {
    PREAMBLE_SIZE + entries * ENTRY_SIZE
}

/// Check the marker and return everything after it.
pub fn strip_marker(input: &[u8]) -> Result<&[u8]> {
    match input.split_first() {
        Some((&MAGIC, rest)) => Ok(rest),
        Some((&found, _)) => {
            warn!("rejecting input without container marker (found {found:#010b})");
            Err(Error::invalid_container(MAGIC, Some(found)))
        }
        None => {
            warn!("rejecting empty input: no container marker");
            Err(Error::invalid_container(MAGIC, None))
        }
    }
}

/// Append the marker and the serialized table to `out`.
pub fn write_header(table: &FrequencyTable, out: &mut Vec<u8>) {
    out.reserve(header_size(table.len()));
    out.push(MAGIC);
    // At most ALPHABET_SIZE entries, always fits.
    out.extend_from_slice(&(table.len() as u16).to_le_bytes());
    for (symbol, count) in table.iter() {
        out.extend_from_slice(&symbol.to_u16().to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
    }
}

/// Validate the marker, parse the table, and return it with the payload.
pub fn read_header(input: &[u8]) -> Result<(FrequencyTable, &[u8])> {
    strip_marker(input)?;
    let mut pos = 1;

    let entries = u16::from_le_bytes(take(input, &mut pos)?) as usize;
    if entries == 0 || entries > ALPHABET_SIZE {
        return Err(Error::corrupted_at(
            format!("entry count {entries} outside 1..={ALPHABET_SIZE}"),
            1,
        ));
    }

    let mut parsed = Vec::with_capacity(entries);
    for _ in 0..entries {
        let at = pos;
        let raw = u16::from_le_bytes(take(input, &mut pos)?);
        let symbol = Symbol::from_u16(raw)
            .ok_or_else(|| Error::corrupted_at(format!("symbol {raw} out of range"), at))?;
        let count = u64::from_le_bytes(take(input, &mut pos)?);
        parsed.push((symbol, count));
    }

    let table = FrequencyTable::from_entries(parsed)?;
    if !table.contains(Symbol::EndOfStream) {
        return Err(Error::corrupted("frequency table has no end-of-stream entry"));
    }

    Ok((table, &input[pos..]))
}

/// Read `N` bytes at `pos` and advance past them.
fn take<const N: usize>(input: &[u8], pos: &mut usize) -> Result<[u8; N]> {
    let bytes: [u8; N] = input
        .get(*pos..*pos + N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| Error::unexpected_eof(input.len()))?;
    *pos += N;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let table = FrequencyTable::from_bytes(b"aab");
        let mut out = Vec::new();
        write_header(&table, &mut out);

        assert_eq!(out.len(), header_size(3));
        assert_eq!(out[0], 0b1111_1101);
        assert_eq!(&out[1..3], &[3, 0]);
        // 'a' = 97, count 2
        assert_eq!(&out[3..5], &[97, 0]);
        assert_eq!(&out[5..13], &2u64.to_le_bytes());
        // EOF = 256, count 1
        assert_eq!(&out[23..25], &[0, 1]);
        assert_eq!(&out[25..33], &1u64.to_le_bytes());
    }

    #[test]
    fn test_header_roundtrip_with_payload() {
        let table = FrequencyTable::from_bytes(b"container test");
        let mut out = Vec::new();
        write_header(&table, &mut out);
        out.extend_from_slice(&[0xAA, 0xBB]);

        let (parsed, payload) = read_header(&out).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(payload, &[0xAA, 0xBB]);
    }

    #[test]
    fn test_marker_mismatch_rejected_before_parsing() {
        // A single wrong bit in the marker.
        let mut out = Vec::new();
        write_header(&FrequencyTable::from_bytes(b"x"), &mut out);
        out[0] = 0b1111_1100;
        assert!(matches!(
            read_header(&out),
            Err(Error::InvalidContainer {
                expected: MAGIC,
                found: Some(0b1111_1100)
            })
        ));

        assert!(matches!(
            read_header(&[]),
            Err(Error::InvalidContainer { found: None, .. })
        ));
        assert!(strip_marker(b"plain text").is_err());
        assert_eq!(strip_marker(&[MAGIC, 7]).unwrap(), &[7]);
    }

    #[test]
    fn test_truncated_header() {
        let mut out = Vec::new();
        write_header(&FrequencyTable::from_bytes(b"abc"), &mut out);

        for cut in 1..out.len() {
            let err = read_header(&out[..cut]).unwrap_err();
            assert!(
                matches!(err, Error::UnexpectedEof { .. }),
                "cut at {cut}: {err:?}"
            );
        }
    }

    #[test]
    fn test_bad_entry_count() {
        assert!(matches!(
            read_header(&[MAGIC, 0, 0]),
            Err(Error::CorruptedData { .. })
        ));
        assert!(matches!(
            read_header(&[MAGIC, 0x02, 0x01]),
            Err(Error::CorruptedData { .. })
        ));
    }

    #[test]
    fn test_symbol_out_of_range() {
        let mut out = vec![MAGIC, 1, 0];
        out.extend_from_slice(&257u16.to_le_bytes());
        out.extend_from_slice(&1u64.to_le_bytes());
        assert!(matches!(read_header(&out), Err(Error::CorruptedData { .. })));
    }

    #[test]
    fn test_missing_end_of_stream() {
        let mut out = vec![MAGIC, 1, 0];
        out.extend_from_slice(&65u16.to_le_bytes());
        out.extend_from_slice(&3u64.to_le_bytes());
        let err = read_header(&out).unwrap_err();
        assert!(err.to_string().contains("end-of-stream"), "{err}");
    }
}
