use std::io;
use std::io::{Read, Write};

/// State for writing individual bits to a Writer
pub struct BitWriter<'a, T: Write> {
    /// the underlying output stream
    writer: &'a mut T,
    /// buffer of individual bits not yet written
    buffer: u8,
    /// how many bits are waiting to be written
    buffer_space_used: u8,
    /// total number of bits accepted so far, padding excluded
    bits_written: usize,
}

impl<'a, T: Write> BitWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> BitWriter<'a, T> {
        BitWriter {
            writer,
            buffer: 0,
            buffer_space_used: 0,
            bits_written: 0,
        }
    }

    /// write a non-byte-aligned number of bits
    ///
    /// buf: a byte array containing a contigous block, MSb first
    /// count: how many bits of buf to write
    ///
    /// returns the number of byte writes incurred onto
    /// the underlying stream, but does not guarantee that
    /// all bits have been written, use flush to write
    /// any remaining bits.
    pub fn write_bits(&mut self, buf: &[u8], count: usize) -> Result<usize, io::Error> {
        let mut remaining_bits_offset = 0;
        let mut bytes_written = 0;
        if self.buffer_space_used == 0 {
            // whole bytes can go straight through
            let quick_byte_count = count / 8;
            self.writer.write_all(&buf[0..quick_byte_count])?;
            bytes_written = quick_byte_count;
            remaining_bits_offset = quick_byte_count * 8;
        }
        for bit_index in remaining_bits_offset..count {
            let byte_index = bit_index / 8;
            let bit_index = bit_index % 8;
            let bit_val: bool = (buf[byte_index] & 0b10000000_u8.rotate_right(bit_index as u32)) > 0;
            if bit_val {
                self.buffer |= 0b10000000_u8.rotate_right(self.buffer_space_used as u32);
            } else {
                self.buffer &= 0b01111111_u8.rotate_right(self.buffer_space_used as u32);
            }
            self.buffer_space_used += 1;
            if self.buffer_space_used == 8 {
                self.writer.write_all(&[self.buffer])?;
                bytes_written += 1;
                self.buffer_space_used = 0;
                self.buffer = 0; // depended upon in flush()
            }
        }
        self.bits_written += count;
        Ok(bytes_written)
    }

    pub fn bits_written(&self) -> usize {
        self.bits_written
    }

    /// Flushes the underlying writer only. Bits short of a full byte stay
    /// buffered, so the stream can continue without padding.
    pub fn flush_writer(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }
}

impl<T: Write> Write for BitWriter<'_, T> {
    /// Writing of byte arrays into the bit writer
    ///
    /// Warning: Even when the returned number in the result equals
    ///          the length of the input buffer, not all bits of the
    ///          input may have been written (because of possible
    ///          single bits in BitWriters buffer)
    fn write(&mut self, buf: &[u8]) -> Result<usize, io::Error> {
        self.write_bits(buf, buf.len() * 8)?;
        Ok(buf.len())
    }

    /// Flush all bits and the underlying writer;
    ///
    /// If there are non-byte-aligned bits still
    /// in the buffer, they will be written to the output
    /// with 0 padding to the next byte;
    fn flush(&mut self) -> Result<(), io::Error> {
        if self.buffer_space_used != 0 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.buffer_space_used = 0;
        }
        self.writer.flush()
    }
}

/// State for reading individual bits, MSb first, from a Reader
pub struct BitReader<R: Read> {
    reader: R,
    buffer: u8,
    /// how many bits of buffer have not been handed out yet
    bits_available: u8,
    bits_read: usize,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> BitReader<R> {
        BitReader {
            reader,
            buffer: 0,
            bits_available: 0,
            bits_read: 0,
        }
    }

    /// returns None once the underlying reader is exhausted
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.bits_available == 0 {
            match self.read_byte()? {
                Some(byte) => {
                    self.buffer = byte;
                    self.bits_available = 8;
                }
                None => return Ok(None),
            }
        }
        self.bits_available -= 1;
        self.bits_read += 1;
        Ok(Some(self.buffer & (1 << self.bits_available) > 0))
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn bits_read(&self) -> usize {
        self.bits_read
    }

    /// bits of the current byte that were fetched but not consumed
    pub fn bits_left_in_byte(&self) -> usize {
        self.bits_available as usize
    }
}
