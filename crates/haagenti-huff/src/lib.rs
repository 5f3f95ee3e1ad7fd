//! File-level operations behind the `huff` command.
//!
//! Both operations read the whole input before touching the output path, so
//! a failed run never leaves a partial or empty output file behind.

use std::fs;
use std::path::Path;

use haagenti_core::{CompressionStats, Compressor, Decompressor, Error, Result};
use haagenti_huffman::HuffmanCodec;
use tracing::info;

/// Compress the file at `input` into a container at `output`.
pub fn compress_file(codec: &HuffmanCodec, input: &Path, output: &Path) -> Result<CompressionStats> {
    let data = fs::read(input)?;
    let (compressed, stats) = codec.compress_with_stats(&data)?;
    fs::write(output, &compressed)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        original = stats.original_size,
        compressed = stats.compressed_size,
        "compressed"
    );
    Ok(stats)
}

/// Decompress the container at `input` into `output`.
///
/// Returns the number of bytes written.
pub fn decompress_file(codec: &HuffmanCodec, input: &Path, output: &Path) -> Result<usize> {
    let data = fs::read(input)?;
    let restored = codec.decompress(&data)?;
    fs::write(output, &restored)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = restored.len(),
        "decompressed"
    );
    Ok(restored.len())
}

/// One-line message shown to the user when a command fails.
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::InvalidContainer { .. } => format!("huff: not a huff file ({err})"),
        _ => format!("huff: {err}"),
    }
}
