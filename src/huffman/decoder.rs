use std::io::{Read, Write};

use log::debug;

use super::tree::HuffmanTree;
use super::SENTINEL;
use crate::binary_stream::BitReader;
use crate::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DecodeSummary {
    pub decoded_bytes: usize,
    pub consumed_bits: usize,
    /// bits after the sentinel code in its final byte
    pub padding_bits: usize,
}

/// Walks a [`HuffmanTree`] bit by bit: 0 steps to the left child, 1 to the
/// right one. Every leaf emits its symbol and restarts at the root, the
/// sentinel leaf ends the stream.
pub struct HuffmanDecoder<'a> {
    tree: &'a HuffmanTree,
}

impl<'a> HuffmanDecoder<'a> {
    pub fn new(tree: &'a HuffmanTree) -> crate::Result<Self> {
        if !tree.contains_symbol(SENTINEL) {
            return Err(Error::MissingSentinel);
        }
        Ok(HuffmanDecoder { tree })
    }

    pub fn decode<R: Read, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> crate::Result<DecodeSummary> {
        let mut bits = BitReader::new(reader);
        let root = self.tree.root();
        let mut position = root;
        let mut decoded_bytes = 0;
        loop {
            position = match (self.tree.children(position), self.tree.symbol(position)) {
                (Some((left, right)), _) => match bits.read_bit()? {
                    Some(true) => right,
                    Some(false) => left,
                    None if position == root => {
                        return Err(Error::TruncatedStream { decoded_bytes })
                    }
                    None => return Err(Error::IncompleteCodeWord { decoded_bytes }),
                },
                (None, Some(SENTINEL)) => break,
                (None, Some(symbol)) => {
                    writer.write_all(&[symbol])?;
                    decoded_bytes += 1;
                    root
                }
                (None, None) => panic!("unreachable, tree node without children or symbol"),
            };
        }
        writer.flush()?;
        let summary = DecodeSummary {
            decoded_bytes,
            consumed_bits: bits.bits_read(),
            padding_bits: bits.bits_left_in_byte(),
        };
        debug!(
            "Decoded {} bytes from {} bits, {} padding bits discarded",
            summary.decoded_bytes, summary.consumed_bits, summary.padding_bits
        );
        Ok(summary)
    }
}

/// Decodes `data` up to its sentinel into a byte vector.
pub fn decode_to_vec(data: &[u8], tree: &HuffmanTree) -> crate::Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffmanDecoder::new(tree)?.decode(data, &mut output)?;
    Ok(output)
}
