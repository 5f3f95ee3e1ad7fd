//! Codec configuration.

use std::fs;
use std::path::Path;

use haagenti_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Decompression limits and integrity checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanConfig {
    /// Largest output a container header may declare (bytes).
    #[serde(default = "default_max_decoded_size")]
    pub max_decoded_size: usize,

    /// Reject payloads whose decoded length differs from the header's byte total.
    #[serde(default = "default_verify_length")]
    pub verify_length: bool,
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self {
            max_decoded_size: default_max_decoded_size(),
            verify_length: default_verify_length(),
        }
    }
}

impl HuffmanConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::CorruptedData {
            message: "invalid huffman config".to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Set the output size limit.
    pub fn with_max_decoded_size(mut self, limit: usize) -> Self {
        self.max_decoded_size = limit;
        self
    }

    /// Enable or disable the decoded length check.
    pub fn with_verify_length(mut self, verify: bool) -> Self {
        self.verify_length = verify;
        self
    }
}

fn default_max_decoded_size() -> usize {
    1024 * 1024 * 1024 // 1GB
}

fn default_verify_length() -> bool {
    true
}
