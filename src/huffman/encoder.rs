use crate::binary_stream::BitWriter;
use crate::error::Error;
use log::{debug, warn};
use std::io::{self, Write};

use super::code::CodeTable;
use super::SENTINEL;

/// Packs the codes of a byte stream into a [`BitWriter`].
///
/// Nothing but code bits is written: no header, no table. The stream is
/// terminated by [`HuffmanEncoder::finish`], which appends the sentinel code
/// and pads the last byte with zeros.
pub struct HuffmanEncoder<'a, 'w, T: Write> {
    writer: &'a mut BitWriter<'w, T>,
    code_table: &'a CodeTable,
    bytes_encoded: usize,
    sentinel_seen: bool,
}

impl<'a, 'w, T: Write> HuffmanEncoder<'a, 'w, T> {
    pub fn new(writer: &'a mut BitWriter<'w, T>, code_table: &'a CodeTable) -> crate::Result<Self> {
        if code_table.code(SENTINEL).is_none() {
            return Err(Error::MissingSentinel);
        }
        Ok(HuffmanEncoder {
            writer,
            code_table,
            bytes_encoded: 0,
            sentinel_seen: false,
        })
    }

    pub fn encode(&mut self, data: &[u8]) -> crate::Result<()> {
        for &symbol in data {
            let code = self
                .code_table
                .code(symbol)
                .ok_or(Error::SymbolWithoutCode(symbol))?;
            if symbol == SENTINEL && !self.sentinel_seen {
                self.sentinel_seen = true;
                warn!(
                    "Input byte {} equals the end-of-transmission sentinel, decoding will stop there",
                    self.bytes_encoded
                );
            }
            self.writer.write_bits(code.as_bytes(), code.len())?;
            self.bytes_encoded += 1;
        }
        Ok(())
    }

    pub fn bytes_encoded(&self) -> usize {
        self.bytes_encoded
    }

    /// Appends the sentinel code and flushes. Returns the number of payload
    /// bits, padding excluded.
    pub fn finish(self) -> crate::Result<usize> {
        let sentinel = self
            .code_table
            .code(SENTINEL)
            .ok_or(Error::MissingSentinel)?;
        self.writer.write_bits(sentinel.as_bytes(), sentinel.len())?;
        let payload_bits = self.writer.bits_written();
        self.writer.flush()?;
        debug!(
            "Encoded {} bytes into {} bits",
            self.bytes_encoded, payload_bits
        );
        Ok(payload_bits)
    }
}

impl<T: Write> Write for HuffmanEncoder<'_, '_, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encode(buf).map_err(|e| match e {
            Error::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        })?;
        Ok(buf.len())
    }

    /// Passes the flush on without padding; [`HuffmanEncoder::finish`] pads.
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush_writer()
    }
}

/// Encodes `data` and its terminating sentinel into a byte vector.
pub fn encode_to_vec(data: &[u8], code_table: &CodeTable) -> crate::Result<Vec<u8>> {
    let mut output: Vec<u8> = Vec::new();
    let mut writer = BitWriter::new(&mut output);
    let mut encoder = HuffmanEncoder::new(&mut writer, code_table)?;
    encoder.encode(data)?;
    encoder.finish()?;
    Ok(output)
}
