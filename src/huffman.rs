//! Huffman coding over the byte alphabet.
//!
//! A [`FrequencyTable`] is estimated from a reference sample, a
//! [`HuffmanTree`] is merged from it, and a [`CodeTable`] is derived from the
//! tree for encoding. Decoding walks the tree directly. Every encoded stream
//! ends with the code of [`SENTINEL`], so no length header is needed.
//!
//! The sentinel shares its slot with the byte value `0x04`. A literal `0x04`
//! in the data is indistinguishable from the terminator and cuts the decoded
//! output short at that point.

pub mod code;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod queue;
pub mod tree;

pub use code::{Code, CodeTable};
pub use decoder::{decode_to_vec, DecodeSummary, HuffmanDecoder};
pub use encoder::{encode_to_vec, HuffmanEncoder};
pub use frequency::FrequencyTable;
pub use tree::HuffmanTree;

pub type Symbol = u8;
pub type Weight = u64;

/// number of distinct byte values, each one a leaf of a full tree
pub const ALPHABET_SIZE: usize = Symbol::MAX as usize + 1;

/// ASCII end-of-transmission
pub const SENTINEL: Symbol = 0x04;

/// weight every symbol starts with before the sample is counted
pub const SMOOTHING_FLOOR: Weight = 1;

pub const SCALE_FACTOR: Weight = 1000;
