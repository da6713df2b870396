use std::{
    fmt::Display,
    fs::{self, File, OpenOptions},
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use clap::{builder::PossibleValue, ValueEnum};
use log::{info, warn};

use binary_stream::BitWriter;
pub use cli::CLIParser;
pub use error::Error;
use huffman::{CodeTable, FrequencyTable, HuffmanDecoder, HuffmanEncoder, HuffmanTree};

pub mod binary_stream;
mod cli;
mod error;
pub mod huffman;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Encode,
    Decode,
}

impl ValueEnum for Mode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Encode, Self::Decode]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Encode => Some(PossibleValue::new("encode").help(
                "Compress INPUT_FILE with the code of REFERENCE_FILE into OUTPUT_FILE",
            )),
            Self::Decode => Some(PossibleValue::new("decode").help(
                "Restore INPUT_FILE with the code of REFERENCE_FILE into OUTPUT_FILE",
            )),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode => write!(f, "Encoding"),
            Self::Decode => write!(f, "Decoding"),
        }
    }
}

pub struct Arguments {
    mode: Mode,
    reference_file: PathBuf,
    input_file: PathBuf,
    output_file: PathBuf,
}

impl Arguments {
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Statistics {
    pub mode: Mode,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

impl Statistics {
    /// One line summary for the terminal
    pub fn report(&self, arguments: &Arguments) -> String {
        match self.mode {
            Mode::Encode => format!(
                "{} bytes read from {}. {} bytes used in encoded form.",
                self.bytes_read,
                arguments.input_file.display(),
                self.bytes_written
            ),
            Mode::Decode => format!(
                "File decoded successfully, {} bytes written to {}.",
                self.bytes_written,
                arguments.output_file.display()
            ),
        }
    }
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Packs every byte of `input` plus the terminating sentinel into `output`.
pub fn encode_file<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    code_table: &CodeTable,
) -> Result<Statistics> {
    let mut bit_writer = BitWriter::new(&mut output);
    let mut encoder = HuffmanEncoder::new(&mut bit_writer, code_table)?;
    let mut buffer = [0; 8192];
    loop {
        match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => encoder.encode(&buffer[..n])?,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    let bytes_read = encoder.bytes_encoded();
    let payload_bits = encoder.finish()?;
    Ok(Statistics {
        mode: Mode::Encode,
        bytes_read,
        bytes_written: payload_bits.div_ceil(8),
    })
}

/// Restores the bytes of `input` up to its sentinel into `output`.
pub fn decode_file<R: Read, W: Write>(
    input: R,
    mut output: W,
    tree: &HuffmanTree,
) -> Result<Statistics> {
    let summary = HuffmanDecoder::new(tree)?.decode(input, &mut output)?;
    Ok(Statistics {
        mode: Mode::Decode,
        bytes_read: summary.consumed_bits.div_ceil(8),
        bytes_written: summary.decoded_bytes,
    })
}

pub fn run(arguments: &Arguments) -> Result<Statistics> {
    let reference_file = open_input_file(&arguments.reference_file)?;
    let input_file = open_input_file(&arguments.input_file)?;
    let output_file = open_output_file(&arguments.output_file)?;

    let frequency_table = FrequencyTable::from_reader(BufReader::new(reference_file))?;
    let tree = HuffmanTree::from_frequency_table(&frequency_table);
    info!(
        "Huffman tree for {} has depth {}",
        arguments.reference_file.display(),
        tree.depth()
    );

    let input = BufReader::new(input_file);
    let mut output = BufWriter::new(output_file);
    let result = match arguments.mode {
        Mode::Encode => {
            let code_table = CodeTable::derive(&tree);
            logger::log_code_table(&code_table);
            encode_file(input, &mut output, &code_table)
        }
        Mode::Decode => decode_file(input, &mut output, &tree),
    }
    .and_then(|statistics| {
        output.flush()?;
        Ok(statistics)
    });
    let statistics = match result {
        Ok(statistics) => statistics,
        Err(e) => {
            // a failed run leaves no partial output behind
            drop(output);
            if let Err(removal) = fs::remove_file(&arguments.output_file) {
                warn!(
                    "Unable to remove incomplete output file {}: {}",
                    arguments.output_file.display(),
                    removal
                );
            }
            return Err(e);
        }
    };
    info!(
        "{} {} into {}: {} bytes read, {} bytes written",
        arguments.mode,
        arguments.input_file.display(),
        arguments.output_file.display(),
        statistics.bytes_read,
        statistics.bytes_written
    );
    Ok(statistics)
}
