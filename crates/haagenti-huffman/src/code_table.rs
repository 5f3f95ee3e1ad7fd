//! Symbol to bit-path mapping derived from a tree.

use std::collections::BTreeMap;
use std::fmt;

use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Root-to-leaf path. `false` follows the zero branch, `true` the one branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path extended by one more branch.
    fn child(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }

    /// Bits in the order they are written (first branch first).
    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<&str> for Code {
    /// Parses `"0110"`. Characters other than `'1'` read as zero.
    fn from(path: &str) -> Self {
        Self {
            bits: path.chars().map(|c| c == '1').collect(),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code for every leaf of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    /// Walk `tree` depth-first, zero branch before one branch, and record
    /// the path to each leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(tree.root(), Code::new())];

        while let Some((id, path)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol, path);
                }
                Node::Internal { zero, one, .. } => {
                    stack.push((one, path.child(true)));
                    stack.push((zero, path.child(false)));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // Sorted lexicographically, a prefix sorts directly before some
        // code it prefixes, so checking neighbours is enough.
        let mut codes: Vec<&Code> = self.codes.values().collect();
        codes.sort_unstable_by(|a, b| a.bits.cmp(&b.bits));
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// Payload length in bits for the stream `table` was counted from.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| code.len() as u64 * count))
            .sum()
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }
}
