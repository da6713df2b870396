use std::io::{self, Read};

use log::debug;

use super::{Symbol, Weight, ALPHABET_SIZE, SCALE_FACTOR, SENTINEL, SMOOTHING_FLOOR};
use crate::error::Error;

/// Smoothed and scaled byte weights of a reference sample.
///
/// Every weight is at least one, so each byte value ends up as a leaf with a
/// finite code even when it never occurs in the sample.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrequencyTable {
    weights: [Weight; ALPHABET_SIZE],
}

impl FrequencyTable {
    pub fn from_sample(sample: &[u8]) -> FrequencyTable {
        let mut counter = FrequencyCounter::new();
        counter.count(sample);
        counter.finish()
    }

    /// Reads the reference sample to exhaustion.
    pub fn from_reader<R: Read>(mut reader: R) -> crate::Result<FrequencyTable> {
        let mut counter = FrequencyCounter::new();
        let mut buffer = [0; 8192];
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => counter.count(&buffer[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::UnableToReadReferenceSample(e)),
            }
        }
        Ok(counter.finish())
    }

    pub fn weight(&self, symbol: Symbol) -> Weight {
        self.weights[symbol as usize]
    }

    pub fn weights(&self) -> &[Weight; ALPHABET_SIZE] {
        &self.weights
    }

    pub fn total_weight(&self) -> Weight {
        self.weights
            .iter()
            .fold(0, |sum: Weight, &weight| sum.saturating_add(weight))
    }

    /// symbol and weight pairs in ascending symbol order
    pub fn entries(&self) -> impl Iterator<Item = (Symbol, Weight)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(|(symbol, &weight)| (symbol as Symbol, weight))
    }
}

struct FrequencyCounter {
    counts: [Weight; ALPHABET_SIZE],
    sample_length: usize,
}

impl FrequencyCounter {
    fn new() -> Self {
        let mut counts = [SMOOTHING_FLOOR; ALPHABET_SIZE];
        counts[SENTINEL as usize] += 1;
        Self {
            counts,
            sample_length: 0,
        }
    }

    fn count(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let slot = &mut self.counts[byte as usize];
            *slot = slot.saturating_add(1);
        }
        self.sample_length += bytes.len();
    }

    fn finish(self) -> FrequencyTable {
        let weights = self.counts.map(|count| match count.saturating_mul(SCALE_FACTOR) {
            0 => SMOOTHING_FLOOR,
            weight => weight,
        });
        debug!(
            "Counted {} reference bytes, {} slots above the smoothing floor",
            self.sample_length,
            self.counts
                .iter()
                .filter(|&&count| count > SMOOTHING_FLOOR)
                .count()
        );
        FrequencyTable { weights }
    }
}

#[cfg(test)]
mod test {
    use std::io;

    use super::FrequencyTable;
    use crate::error::Error;
    use crate::huffman::{SCALE_FACTOR, SENTINEL};

    #[test]
    fn test_empty_sample_is_smoothed() {
        let table = FrequencyTable::from_sample(&[]);
        for (symbol, weight) in table.entries() {
            if symbol == SENTINEL {
                assert_eq!(weight, 2 * SCALE_FACTOR, "Sentinel weight");
            } else {
                assert_eq!(weight, SCALE_FACTOR, "Weight of symbol {}", symbol);
            }
        }
    }

    #[test]
    fn test_counts_are_scaled() {
        let table = FrequencyTable::from_sample(b"aaab");
        assert_eq!(table.weight(b'a'), 4 * SCALE_FACTOR);
        assert_eq!(table.weight(b'b'), 2 * SCALE_FACTOR);
        assert_eq!(table.weight(b'c'), SCALE_FACTOR);
        assert!(table.weight(b'a') > table.weight(b'b'));
    }

    #[test]
    fn test_sentinel_occurrences_add_to_extra_count() {
        let table = FrequencyTable::from_sample(&[SENTINEL, SENTINEL]);
        assert_eq!(table.weight(SENTINEL), 4 * SCALE_FACTOR);
    }

    #[test]
    fn test_no_zero_weights() {
        let table = FrequencyTable::from_sample(b"hello world");
        assert!(table.weights().iter().all(|&weight| weight >= 1));
        assert_eq!(table.entries().count(), 256);
    }

    #[test]
    fn test_total_weight() {
        let table = FrequencyTable::from_sample(b"xyz");
        assert_eq!(table.total_weight(), (256 + 1 + 3) * SCALE_FACTOR);
    }

    #[test]
    fn test_reader_and_slice_agree() {
        let sample = b"the quick brown fox jumps over the lazy dog";
        let from_reader = FrequencyTable::from_reader(&sample[..]).unwrap();
        assert_eq!(from_reader, FrequencyTable::from_sample(sample));
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken sample"))
        }
    }

    #[test]
    fn test_unreadable_sample_is_reported() {
        match FrequencyTable::from_reader(FailingReader) {
            Err(Error::UnableToReadReferenceSample(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::Other)
            }
            other => panic!("Expected read failure, got {:?}", other),
        }
    }
}
