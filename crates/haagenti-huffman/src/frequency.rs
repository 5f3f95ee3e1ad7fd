//! Symbol frequency analysis.

use std::collections::BTreeMap;
use std::fmt;

use haagenti_core::{Error, Result};

use crate::symbol::Symbol;

/// Occurrence counts per symbol, always including one end-of-stream.
///
/// Entries iterate in ascending symbol order. Zero counts are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    /// Count every byte of `data`, then add a single end-of-stream.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut histogram = [0u64; 256];
        for &byte in data {
            histogram[byte as usize] += 1;
        }
        Self::from_histogram(&histogram)
    }

    fn from_histogram(histogram: &[u64; 256]) -> Self {
        let mut counts: BTreeMap<Symbol, u64> = histogram
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (Symbol::Byte(byte as u8), count))
            .collect();
        counts.insert(Symbol::EndOfStream, 1);
        Self { counts }
    }

    /// Build a table from explicit entries, as read back from a header.
    ///
    /// Entries must be strictly ascending and every count nonzero.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, u64)>,
    {
        let mut counts = BTreeMap::new();
        let mut last: Option<Symbol> = None;
        for (index, (symbol, count)) in entries.into_iter().enumerate() {
            if count == 0 {
                return Err(Error::corrupted(format!(
                    "zero count for symbol {symbol} (entry {index})"
                )));
            }
            if last.is_some_and(|prev| prev >= symbol) {
                return Err(Error::corrupted(format!(
                    "symbol {symbol} out of order (entry {index})"
                )));
            }
            last = Some(symbol);
            counts.insert(symbol, count);
        }
        Ok(Self { counts })
    }

    /// Count for `symbol`, zero if absent.
    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols, end-of-stream included.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.counts.contains_key(&symbol)
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Sum of all counts, end-of-stream included. Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, &count| acc.saturating_add(count))
    }

    /// Number of input bytes the table describes. Saturates at `u64::MAX`.
    pub fn byte_total(&self) -> u64 {
        self.iter()
            .filter(|(symbol, _)| !symbol.is_end_of_stream())
            .fold(0u64, |acc, (_, count)| acc.saturating_add(count))
    }
}

/// Renders as `{97:2, 98:1, 256:1}` using wire values.
impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (symbol, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{}", symbol.to_u16(), count)?;
        }
        f.write_str("}")
    }
}
