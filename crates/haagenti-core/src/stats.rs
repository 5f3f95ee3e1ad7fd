//! Statistics for compression operations.

use crate::types::CompressionRatio;

/// Statistics from a compression operation.
#[derive(Debug, Clone, Default)]
pub struct CompressionStats {
    /// Algorithm used.
    pub algorithm: Option<&'static str>,

    /// Original (uncompressed) size in bytes.
    pub original_size: usize,

    /// Compressed size in bytes, framing included.
    pub compressed_size: usize,

    /// Bytes spent on framing (marker and symbol table).
    pub header_size: usize,

    /// Entropy-coded payload length in bits, before byte padding.
    pub payload_bits: usize,

    /// Number of distinct symbols coded, end-of-stream included.
    pub distinct_symbols: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create stats from a completed operation.
    pub fn from_operation(
        algorithm: &'static str,
        original_size: usize,
        compressed_size: usize,
        time_us: u64,
    ) -> Self {
        CompressionStats {
            algorithm: Some(algorithm),
            original_size,
            compressed_size,
            time_us,
            ..Default::default()
        }
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Average payload bits spent per input byte.
    pub fn bits_per_byte(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.payload_bits as f64 / self.original_size as f64
    }

    /// Get throughput in bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        self.throughput_bps() / 1_000_000.0
    }

    /// Get space savings as percentage.
    pub fn savings_percent(&self) -> f64 {
        self.ratio().savings_percent()
    }
}
