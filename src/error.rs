use std::fmt::Display;

use crate::huffman::Symbol;

#[derive(Debug)]
pub enum Error {
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToReadReferenceSample(std::io::Error),
    EmptyAlphabet,
    DuplicateSymbol(Symbol),
    WeightOverflow,
    MissingSentinel,
    SymbolWithoutCode(Symbol),
    TruncatedStream { decoded_bytes: usize },
    IncompleteCodeWord { decoded_bytes: usize },
    Io(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToReadReferenceSample(error) => {
                write!(f, "Unable to read reference sample: {}", error)
            }
            Self::EmptyAlphabet => {
                write!(f, "Huffman tree needs at least one symbol with non-zero weight")
            }
            Self::DuplicateSymbol(symbol) => {
                write!(f, "Symbol {} occurs more than once in the weight list", symbol)
            }
            Self::WeightOverflow => {
                write!(f, "Sum of symbol weights exceeds the weight range")
            }
            Self::MissingSentinel => {
                write!(
                    f,
                    "Huffman tree has no leaf for the end-of-transmission sentinel"
                )
            }
            Self::SymbolWithoutCode(symbol) => {
                write!(f, "Symbol {} has no code in the code table", symbol)
            }
            Self::TruncatedStream { decoded_bytes } => {
                write!(
                    f,
                    "Encoded stream ended without sentinel after {} decoded bytes",
                    decoded_bytes
                )
            }
            Self::IncompleteCodeWord { decoded_bytes } => {
                write!(
                    f,
                    "Encoded stream ended inside a code word after {} decoded bytes",
                    decoded_bytes
                )
            }
            Self::Io(error) => write!(f, "I/O error: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::UnableToReadReferenceSample(error)
            | Self::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
