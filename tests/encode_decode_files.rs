use huffman_codec::huffman::{CodeTable, FrequencyTable, HuffmanTree};
use huffman_codec::{decode_file, encode_file, run, CLIParser, Error, Mode, Statistics};
use std::path::PathBuf;
use std::{env, fs};

const REFERENCE_PATH: &str = "tests/fixtures/reference.txt";
const PLAIN_PATH: &str = "tests/fixtures/plain.txt";

fn get_project_root_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn get_fixture_path(relative_path: &str) -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push(relative_path);
    root_path
}

fn get_result_path(file_name: &str) -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push("tests");
    root_path.push(file_name);
    root_path
}

fn cleanup(paths: &[&PathBuf]) {
    for path in paths {
        if path.exists() && path.is_file() {
            fs::remove_file(path).expect("Deletion of output file failed");
        }
    }
}

fn run_mode(
    mode: &str,
    reference: &PathBuf,
    input: &PathBuf,
    output: &PathBuf,
) -> huffman_codec::Result<Statistics> {
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        mode,
        reference.to_str().unwrap(),
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);
    run(&arguments)
}

#[test]
fn test_encode_then_decode_file() {
    let encoded_path = get_result_path("roundtrip_result.huff");
    let decoded_path = get_result_path("roundtrip_result.txt");
    cleanup(&[&encoded_path, &decoded_path]);
    let reference_path = get_fixture_path(REFERENCE_PATH);
    let plain_path = get_fixture_path(PLAIN_PATH);

    let encoding = run_mode("encode", &reference_path, &plain_path, &encoded_path)
        .expect("Encoding failed");
    let plain = fs::read(&plain_path).unwrap();
    assert_eq!(encoding.mode, Mode::Encode);
    assert_eq!(encoding.bytes_read, plain.len());
    let encoded_size = fs::metadata(&encoded_path).unwrap().len() as usize;
    assert_eq!(encoding.bytes_written, encoded_size);
    assert!(encoded_size < plain.len(), "Text was not compressed");

    let decoding = run_mode("decode", &reference_path, &encoded_path, &decoded_path)
        .expect("Decoding failed");
    assert_eq!(decoding.mode, Mode::Decode);
    assert_eq!(decoding.bytes_written, plain.len());
    assert_eq!(fs::read(&decoded_path).unwrap(), plain);
    cleanup(&[&encoded_path, &decoded_path]);
}

#[test]
fn test_missing_reference_file_aborts() {
    let output_path = get_result_path("missing_reference_result.huff");
    cleanup(&[&output_path]);
    let result = run_mode(
        "encode",
        &get_fixture_path("tests/fixtures/does_not_exist.txt"),
        &get_fixture_path(PLAIN_PATH),
        &output_path,
    );
    assert!(matches!(
        result,
        Err(Error::UnableToOpenInputFileForReading(_, _))
    ));
    assert!(!output_path.exists(), "Output file was created");
}

#[test]
fn test_decoding_with_other_reference_fails_or_differs() {
    let reference = fs::read(get_fixture_path(REFERENCE_PATH)).unwrap();
    let reference_table = FrequencyTable::from_sample(&reference);
    let plain = fs::read(get_fixture_path(PLAIN_PATH)).unwrap();
    let tree = HuffmanTree::from_frequency_table(&reference_table);
    let mut encoded = Vec::new();
    encode_file(plain.as_slice(), &mut encoded, &CodeTable::derive(&tree)).unwrap();

    let other_tree = HuffmanTree::from_frequency_table(&FrequencyTable::from_sample(&plain));
    let mut decoded = Vec::new();
    let result = decode_file(encoded.as_slice(), &mut decoded, &other_tree);
    assert!(result.is_err() || decoded != plain);
}

#[test]
fn test_round_trip_of_every_byte_except_sentinel() {
    let tree = HuffmanTree::from_frequency_table(&FrequencyTable::from_sample(b"aaab"));
    let code_table = CodeTable::derive(&tree);
    let data: Vec<u8> = (0..=u8::MAX)
        .filter(|&byte| byte != huffman_codec::huffman::SENTINEL)
        .cycle()
        .take(3000)
        .collect();
    let mut encoded = Vec::new();
    let encoding = encode_file(data.as_slice(), &mut encoded, &code_table).unwrap();
    assert_eq!(encoding.bytes_read, data.len());
    assert_eq!(encoding.bytes_written, encoded.len());
    let mut decoded = Vec::new();
    decode_file(encoded.as_slice(), &mut decoded, &tree).unwrap();
    assert_eq!(decoded, data);
}

#[test]
fn test_failed_decode_removes_output_file() {
    let encoded_path = get_result_path("truncated_result.huff");
    let truncated_path = get_result_path("truncated_input.huff");
    let decoded_path = get_result_path("truncated_result.txt");
    cleanup(&[&encoded_path, &truncated_path, &decoded_path]);
    let reference_path = get_fixture_path(REFERENCE_PATH);

    run_mode(
        "encode",
        &reference_path,
        &get_fixture_path(PLAIN_PATH),
        &encoded_path,
    )
    .expect("Encoding failed");
    let encoded = fs::read(&encoded_path).unwrap();
    fs::write(&truncated_path, &encoded[..encoded.len() / 2]).unwrap();

    let result = run_mode("decode", &reference_path, &truncated_path, &decoded_path);
    match result {
        Err(Error::TruncatedStream { decoded_bytes })
        | Err(Error::IncompleteCodeWord { decoded_bytes }) => assert!(decoded_bytes > 0),
        other => panic!("Expected a truncated stream, got {:?}", other.map(|s| s.mode)),
    }
    assert!(!decoded_path.exists(), "Partial output file was left behind");
    cleanup(&[&encoded_path, &truncated_path, &decoded_path]);
}
