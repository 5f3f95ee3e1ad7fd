//! # Haagenti Huffman
//!
//! Lossless Huffman coding over byte streams, wrapped in a small
//! self-describing container.
//!
//! ## Pipeline
//!
//! ```text
//! compress:   bytes -> FrequencyTable -> HuffmanTree -> CodeTable -> encode
//!             output = marker | frequency header | payload bits
//!
//! decompress: check marker -> read header -> rebuild HuffmanTree -> decode
//! ```
//!
//! Every stream ends with a synthetic end-of-stream symbol, so the decoder
//! needs no bit count and ignores byte padding after it.
//!
//! ## Example
//!
//! ```ignore
//! use haagenti_core::{Compressor, Decompressor};
//! use haagenti_huffman::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new();
//! let compressed = codec.compress(b"aab")?;
//! assert_eq!(codec.decompress(&compressed)?, b"aab");
//! ```

pub mod bits;
pub mod code_table;
pub mod codec;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod symbol;
pub mod tree;

// Re-export main types
pub use code_table::{Code, CodeTable};
pub use codec::{compress, decompress, HuffmanCodec};
pub use config::HuffmanConfig;
pub use container::MAGIC;
pub use frequency::FrequencyTable;
pub use symbol::{Symbol, PSEUDO_EOF};
pub use tree::{HuffmanTree, Node, NodeId};
