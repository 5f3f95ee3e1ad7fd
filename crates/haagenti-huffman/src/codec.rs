//! Huffman codec: container-level compress and decompress.

use std::io::{Read, Write};
use std::time::Instant;

use haagenti_core::{
    Codec, CompressionStats, Compressor, Decompressor, Error, Result,
};
use tracing::debug;

use crate::bits::{BitReader, BitWriter};
use crate::code_table::CodeTable;
use crate::config::HuffmanConfig;
use crate::container::{header_size, read_header, write_header};
use crate::decoder::decode;
use crate::encoder::encode;
use crate::frequency::FrequencyTable;
use crate::symbol::ALPHABET_SIZE;
use crate::tree::HuffmanTree;

const ALGORITHM: &str = "huffman";

/// Huffman codec producing self-describing containers.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: HuffmanConfig,
}

impl HuffmanCodec {
    /// Create a codec with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit settings.
    pub fn with_config(config: HuffmanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    fn compress_inner(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();

        let table = FrequencyTable::from_bytes(input);
        let tree = HuffmanTree::build(&table)?;
        let codes = CodeTable::from_tree(&tree);

        let estimated_bits = codes.encoded_bits(&table) as usize;
        let mut output = Vec::with_capacity(header_size(table.len()) + estimated_bits.div_ceil(8));
        write_header(&table, &mut output);
        let header = output.len();

        let mut writer = BitWriter::with_capacity(estimated_bits.div_ceil(8));
        encode(input, &codes, &mut writer)?;
        let payload_bits = writer.bit_len();
        output.extend_from_slice(&writer.finish());

        let stats = CompressionStats {
            algorithm: Some(ALGORITHM),
            original_size: input.len(),
            compressed_size: output.len(),
            header_size: header,
            payload_bits,
            distinct_symbols: table.len(),
            time_us: start.elapsed().as_micros() as u64,
        };

        debug!(
            input = input.len(),
            output = output.len(),
            symbols = table.len(),
            payload_bits,
            max_code_len = codes.max_len(),
            "huffman compress"
        );

        Ok((output, stats))
    }

    fn decompress_inner(&self, input: &[u8]) -> Result<Vec<u8>> {
        let (table, payload) = read_header(input)?;

        let expected = table.byte_total();
        if expected > self.config.max_decoded_size as u64 {
            return Err(Error::LimitExceeded {
                limit: self.config.max_decoded_size,
                requested: expected,
            });
        }

        let tree = HuffmanTree::build(&table)?;

        // Each decoded byte costs at least one payload bit unless the tree
        // is a lone leaf.
        let reachable = if tree.is_single_leaf() {
            expected
        } else {
            (payload.len() as u64).saturating_mul(8)
        };
        let mut output = Vec::with_capacity(expected.min(reachable) as usize);

        let bound = if self.config.verify_length {
            // expected <= max_decoded_size here, so it fits in usize.
            expected as usize
        } else {
            self.config.max_decoded_size
        };

        let mut reader = BitReader::new(payload);
        match decode(&mut reader, &tree, &mut output, bound) {
            Ok(()) => {}
            Err(Error::LimitExceeded { .. }) if self.config.verify_length => {
                return Err(Error::corrupted(format!(
                    "payload decodes past the {expected} bytes the header declares"
                )));
            }
            Err(e) => return Err(e),
        }

        if self.config.verify_length && output.len() as u64 != expected {
            return Err(Error::corrupted(format!(
                "decoded {} bytes, header declares {}",
                output.len(),
                expected
            )));
        }

        debug!(
            input = input.len(),
            output = output.len(),
            symbols = table.len(),
            bits_read = reader.bits_read(),
            "huffman decompress"
        );

        Ok(output)
    }

    /// Read `reader` to the end, compress it, and write the container to `writer`.
    ///
    /// Returns the number of bytes written.
    pub fn compress_stream<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<usize> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        let (output, _) = self.compress_inner(&input)?;
        writer.write_all(&output)?;
        writer.flush()?;
        Ok(output.len())
    }

    /// Read a container from `reader` and write the decoded bytes to `writer`.
    ///
    /// Nothing is written unless the whole container decodes. Returns the
    /// number of bytes written.
    pub fn decompress_stream<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<usize> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        let output = self.decompress_inner(&input)?;
        writer.write_all(&output)?;
        writer.flush()?;
        Ok(output.len())
    }
}

impl Compressor for HuffmanCodec {
    fn name(&self) -> &'static str {
        ALGORITHM
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.compress_inner(input).map(|(output, _)| output)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        // Huffman averages under entropy + 1 bits per symbol, and entropy
        // over the 257-symbol alphabet stays below 9 bits.
        header_size(ALPHABET_SIZE) + (input_len + 1).saturating_mul(10).div_ceil(8)
    }

    fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        self.compress_inner(input)
    }
}

impl Decompressor for HuffmanCodec {
    fn name(&self) -> &'static str {
        ALGORITHM
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompress_inner(input)
    }
}

impl Codec for HuffmanCodec {
    fn new() -> Self {
        HuffmanCodec::new()
    }
}

/// Compress `input` into a container with default settings.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().compress_inner(input).map(|(output, _)| output)
}

/// Decompress a container with default settings.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().decompress_inner(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MAGIC;
    use std::io::Cursor;

    #[test]
    fn test_aab_container() {
        let compressed = compress(b"aab").unwrap();
        assert_eq!(compressed.len(), header_size(3) + 1);
        assert_eq!(compressed[0], MAGIC);
        assert_eq!(*compressed.last().unwrap(), 0b0010_1100);
        assert_eq!(decompress(&compressed).unwrap(), b"aab");
    }

    #[test]
    fn test_empty_input_container() {
        let compressed = compress(&[]).unwrap();
        // Marker + table {EOF: 1}; the lone EOF leaf has an empty code.
        assert_eq!(compressed.len(), header_size(1));
        assert!(decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_container_writes_nothing() {
        let codec = HuffmanCodec::new();
        let mut sink = Vec::new();
        let err = codec
            .decompress_stream(Cursor::new(b"not a container"), &mut sink)
            .unwrap_err();
        assert!(err.is_invalid_container());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_truncated_payload_writes_nothing() {
        let data = b"some text that spans several payload bytes";
        let mut compressed = compress(data).unwrap();
        compressed.truncate(compressed.len() - 3);

        let mut sink = Vec::new();
        let err = HuffmanCodec::new()
            .decompress_stream(Cursor::new(compressed), &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::TruncatedPayload { .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_stream_roundtrip() {
        let data = b"streams are read fully before encoding".repeat(20);
        let codec = HuffmanCodec::new();

        let mut compressed = Vec::new();
        let written = codec.compress_stream(Cursor::new(&data), &mut compressed).unwrap();
        assert_eq!(written, compressed.len());

        let mut restored = Vec::new();
        let written = codec.decompress_stream(Cursor::new(&compressed), &mut restored).unwrap();
        assert_eq!(written, data.len());
        assert_eq!(restored, data);
    }

    #[test]
    fn test_stats() {
        let data = b"aaaaaaaabbbbccde";
        let (compressed, stats) = HuffmanCodec::new().compress_with_stats(data).unwrap();
        assert_eq!(stats.algorithm, Some("huffman"));
        assert_eq!(stats.original_size, data.len());
        assert_eq!(stats.compressed_size, compressed.len());
        assert_eq!(stats.distinct_symbols, 6);
        assert_eq!(stats.header_size, header_size(6));
        assert_eq!(
            compressed.len(),
            stats.header_size + stats.payload_bits.div_ceil(8)
        );
    }

    #[test]
    fn test_limit_exceeded() {
        let compressed = compress(&[7u8; 100]).unwrap();
        let codec = HuffmanCodec::with_config(HuffmanConfig::default().with_max_decoded_size(99));
        let err = codec.decompress(&compressed).unwrap_err();
        assert!(matches!(
            err,
            Error::LimitExceeded {
                limit: 99,
                requested: 100
            }
        ));

        let exact = HuffmanCodec::with_config(HuffmanConfig::default().with_max_decoded_size(100));
        assert_eq!(exact.decompress(&compressed).unwrap(), vec![7u8; 100]);
    }

    /// Container for `{a: count, EOF: 1}` followed by `payload`.
    fn forged(count: u64, payload: &[u8]) -> Vec<u8> {
        let table = FrequencyTable::from_entries([
            (crate::symbol::Symbol::Byte(b'a'), count),
            (crate::symbol::Symbol::EndOfStream, 1),
        ])
        .unwrap();
        let mut out = Vec::new();
        write_header(&table, &mut out);
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn test_huge_declared_count_tiny_payload() {
        // 2^30 - 1 declared bytes, one payload byte. EOF sorts first among
        // the two leaves and takes the zero branch, so 0xFF is eight 'a's.
        // Decoding must fail on the payload, not on reserving the declared size.
        let input = forged((1 << 30) - 1, &[0xFF]);
        assert_eq!(input.len(), header_size(2) + 1);

        let err = HuffmanCodec::new().decompress(&input).unwrap_err();
        assert!(matches!(err, Error::TruncatedPayload { decoded: 8, .. }), "{err:?}");
    }

    #[test]
    fn test_limit_enforced_while_decoding() {
        // Header says one 'a'; the payload keeps producing 'a' for 8000 bytes.
        let mut payload = vec![0u8; 1000];
        payload.push(0x80);
        let input = forged(1, &payload);

        let lenient = HuffmanCodec::with_config(
            HuffmanConfig::default()
                .with_max_decoded_size(10)
                .with_verify_length(false),
        );
        assert!(matches!(
            lenient.decompress(&input),
            Err(Error::LimitExceeded { limit: 10, .. })
        ));

        let strict = HuffmanCodec::with_config(HuffmanConfig::default().with_max_decoded_size(10));
        let err = strict.decompress(&input).unwrap_err();
        assert!(matches!(err, Error::CorruptedData { .. }), "{err:?}");
        assert!(err.to_string().contains("declares"));

        let unbounded = HuffmanCodec::with_config(HuffmanConfig::default().with_verify_length(false));
        assert_eq!(unbounded.decompress(&input).unwrap().len(), 8000);
    }

    #[test]
    fn test_length_mismatch_detected() {
        // Header claims 'a' twice and 'b' once, payload encodes only "a" + EOF.
        let mut compressed = compress(b"aab").unwrap();
        let last = compressed.len() - 1;
        compressed[last] = 0b0110_0000;

        let err = decompress(&compressed).unwrap_err();
        assert!(matches!(err, Error::CorruptedData { .. }), "{err:?}");

        let lenient = HuffmanCodec::with_config(HuffmanConfig::default().with_verify_length(false));
        assert_eq!(lenient.decompress(&compressed).unwrap(), b"a");
    }

    #[test]
    fn test_max_compressed_size_bounds_output() {
        let codec = HuffmanCodec::new();
        for data in [
            Vec::new(),
            b"a".to_vec(),
            (0..=255u8).collect::<Vec<_>>(),
            b"skewed".repeat(1000),
        ] {
            let compressed = codec.compress(&data).unwrap();
            assert!(compressed.len() <= codec.max_compressed_size(data.len()));
        }
    }

    #[test]
    fn test_codec_trait_helpers() {
        let codec = <HuffmanCodec as Codec>::new();
        assert!(codec.verify_roundtrip(b"trait roundtrip").unwrap());

        let ratio = codec.measure_ratio(&b"zzzzzzzz".repeat(512)).unwrap();
        assert!(ratio.is_effective());

        let mut buf = vec![0u8; 4];
        assert!(matches!(
            codec.compress_to(b"abc", &mut buf),
            Err(Error::BufferTooSmall { .. })
        ));
    }
}
