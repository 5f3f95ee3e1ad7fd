//! End-to-end scenarios for the Huffman container.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use haagenti_core::{Compressor, Decompressor, Error};
use haagenti_huffman::container::{header_size, read_header};
use haagenti_huffman::{
    compress, decompress, CodeTable, FrequencyTable, HuffmanCodec, HuffmanTree, Symbol, MAGIC,
};

#[test]
fn aab_scenario() {
    let table = FrequencyTable::from_bytes(b"aab");
    assert_eq!(table.get(Symbol::Byte(b'a')), 2);
    assert_eq!(table.get(Symbol::Byte(b'b')), 1);
    assert_eq!(table.get(Symbol::EndOfStream), 1);

    let tree = HuffmanTree::build(&table).unwrap();
    let codes = CodeTable::from_tree(&tree);
    let a = codes.get(Symbol::Byte(b'a')).unwrap().len();
    let b = codes.get(Symbol::Byte(b'b')).unwrap().len();
    let eof = codes.get(Symbol::EndOfStream).unwrap().len();
    assert!(a < b && a < eof, "'a' must get the shortest code");

    assert_eq!(decompress(&compress(b"aab").unwrap()).unwrap(), b"aab");
}

#[test]
fn empty_input_scenario() {
    let compressed = compress(b"").unwrap();
    assert_eq!(compressed[0], MAGIC);

    let (table, payload) = read_header(&compressed).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(Symbol::EndOfStream), 1);
    assert!(payload.is_empty());

    assert_eq!(decompress(&compressed).unwrap(), Vec::<u8>::new());
}

#[test]
fn repeated_single_byte() {
    for n in [0usize, 1, 2, 7, 8, 9, 1000, 65_537] {
        let data = vec![0x5Au8; n];
        let compressed = compress(&data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data, "n = {n}");
        if n >= 1000 {
            // Two leaves: one bit per byte plus the terminator.
            assert_eq!(compressed.len(), header_size(2) + (n + 1).div_ceil(8));
        }
    }
}

#[test]
fn every_byte_value() {
    let data: Vec<u8> = (0..=255u8).rev().chain(0..=255u8).collect();
    let compressed = compress(&data).unwrap();
    let (table, _) = read_header(&compressed).unwrap();
    assert_eq!(table.len(), 257);
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn text_compresses() {
    let text = "It was the best of times, it was the worst of times, it was the age of \
                wisdom, it was the age of foolishness, it was the epoch of belief, it was \
                the epoch of incredulity, it was the season of Light, it was the season of \
                Darkness."
        .repeat(40);
    let codec = HuffmanCodec::new();
    let (compressed, stats) = codec.compress_with_stats(text.as_bytes()).unwrap();

    assert!(stats.ratio().is_effective());
    assert!(stats.bits_per_byte() < 5.0, "{}", stats.bits_per_byte());
    assert_eq!(codec.decompress(&compressed).unwrap(), text.as_bytes());
}

#[test]
fn foreign_files_rejected() {
    let inputs: [&[u8]; 5] = [
        b"",
        b"plain text file",
        &[0x00],
        &[0xFF, 0x03, 0x00],
        // gzip magic
        &[0x1F, 0x8B, 0x08, 0x00],
    ];
    for input in inputs {
        let err = decompress(input).unwrap_err();
        assert!(err.is_invalid_container(), "{input:?}: {err:?}");
        assert!(err.to_string().contains("invalid container"));
    }
}

#[test]
fn corrupted_payload_is_reported() {
    let data = b"the payload below is cut short on purpose".repeat(3);
    let compressed = compress(&data).unwrap();
    let (table, payload) = read_header(&compressed).unwrap();
    let header = header_size(table.len());
    assert_eq!(compressed.len(), header + payload.len());

    let truncated = &compressed[..header + payload.len() / 2];
    assert!(matches!(
        decompress(truncated),
        Err(Error::TruncatedPayload { .. })
    ));

    let header_only = &compressed[..header];
    assert!(matches!(
        decompress(header_only),
        Err(Error::TruncatedPayload { bits_read: 0, decoded: 0 })
    ));
}

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("input.txt");
    let packed = dir.path().join("input.huf");
    let restored = dir.path().join("output.txt");

    let data = b"files go through the stream entry points\n".repeat(100);
    std::fs::write(&original, &data).unwrap();

    let codec = HuffmanCodec::new();
    codec
        .compress_stream(
            BufReader::new(File::open(&original).unwrap()),
            BufWriter::new(File::create(&packed).unwrap()),
        )
        .unwrap();
    codec
        .decompress_stream(
            BufReader::new(File::open(&packed).unwrap()),
            BufWriter::new(File::create(&restored).unwrap()),
        )
        .unwrap();

    assert_eq!(std::fs::read(&restored).unwrap(), data);
    assert!(std::fs::metadata(&packed).unwrap().len() < data.len() as u64);
}

#[test]
fn rejected_file_leaves_output_empty() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.huf");
    let out = dir.path().join("out.txt");
    std::fs::write(&bogus, b"nice try").unwrap();

    let result = HuffmanCodec::new().decompress_stream(
        File::open(&bogus).unwrap(),
        File::create(&out).unwrap(),
    );
    assert!(result.unwrap_err().is_invalid_container());
    assert_eq!(std::fs::metadata(&out).unwrap().len(), 0);
}
