use std::fmt;

use log::debug;

use super::tree::HuffmanTree;
use super::{Symbol, ALPHABET_SIZE, SENTINEL};
use crate::error::Error;

/// Growable sequence of bits, packed most significant bit first.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Code {
    bytes: Vec<u8>,
    len: usize,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, bit: bool) {
        let index = self.len;
        self.set(index, bit);
    }

    /// Sets the bit at `index`, growing the sequence with zeros if needed.
    pub fn set(&mut self, index: usize, bit: bool) {
        let byte_index = index / 8;
        if byte_index >= self.bytes.len() {
            self.bytes.resize(byte_index + 1, 0);
        }
        let mask = 0b1000_0000_u8 >> (index % 8);
        if bit {
            self.bytes[byte_index] |= mask;
        } else {
            self.bytes[byte_index] &= !mask;
        }
        self.len = self.len.max(index + 1);
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0b1000_0000_u8 >> (index % 8)) > 0)
    }

    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.len = len;
        self.bytes.truncate(len.div_ceil(8));
        if len % 8 != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= !(0xFF_u8 >> (len % 8));
            }
        }
    }

    /// bits packed into bytes, the last byte is zero padded
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|index| self.bytes[index / 8] & (0b1000_0000_u8 >> (index % 8)) > 0)
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl From<&[bool]> for Code {
    fn from(value: &[bool]) -> Self {
        let mut code = Code::new();
        value.iter().for_each(|&bit| code.push(bit));
        code
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Per-symbol codes read off a [`HuffmanTree`]: 0 for every step to a left
/// child, 1 for every step to a right child.
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {
    pub fn derive(tree: &HuffmanTree) -> CodeTable {
        let mut codes = [const { None }; ALPHABET_SIZE];
        let mut path = Code::new();
        // pre-order, left before right: (node, parent path length, branch taken)
        let mut stack: Vec<(usize, usize, Option<bool>)> = vec![(tree.root(), 0, None)];
        while let Some((index, parent_len, branch)) = stack.pop() {
            path.truncate(parent_len);
            if let Some(bit) = branch {
                path.push(bit);
            }
            match (tree.children(index), tree.symbol(index)) {
                (Some((left, right)), _) => {
                    stack.push((right, path.len(), Some(true)));
                    stack.push((left, path.len(), Some(false)));
                }
                (None, Some(symbol)) => codes[symbol as usize] = Some(path.clone()),
                (None, None) => panic!("unreachable, tree node without children or symbol"),
            }
        }
        let table = CodeTable { codes };
        debug!(
            "Derived {} codes, longest is {} bits",
            table.len(),
            table.max_code_length()
        );
        table
    }

    pub fn code(&self, symbol: Symbol) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// symbols that have a code, in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as Symbol, c)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_code_length(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Exact number of payload bits for `data` followed by the sentinel.
    pub fn encoded_bit_count(&self, data: &[u8]) -> crate::Result<usize> {
        let sentinel_length = self.code(SENTINEL).ok_or(Error::MissingSentinel)?.len();
        data.iter().try_fold(sentinel_length, |sum, &symbol| {
            self.code(symbol)
                .map(|code| sum + code.len())
                .ok_or(Error::SymbolWithoutCode(symbol))
        })
    }
}
