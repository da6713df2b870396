use huffman_codec::huffman::{
    decode_to_vec, encode_to_vec, CodeTable, HuffmanTree, SENTINEL,
};
use huffman_codec::Result;

fn main() -> Result<()> {
    // symbol-weight pairs
    let syms_and_weights = vec![
        (b'a', 10),
        (b'b', 2),
        (b'c', 24),
        (b'd', 340),
        (b'e', 10),
        (SENTINEL, 1),
    ];

    let tree = HuffmanTree::new(&syms_and_weights)?;
    println!("huffman tree\n{}", tree);

    let code_table = CodeTable::derive(&tree);
    for (symbol, code) in code_table.iter() {
        println!("{:>3} {}", symbol, code);
    }

    let sequence_to_encode = b"dddcbaeddd";
    let encoded_buffer = encode_to_vec(sequence_to_encode, &code_table)?;
    println!("sequence to encode\n{:?}", sequence_to_encode);
    println!("encoded sequence\n{:?}", encoded_buffer);

    let decoded_buffer = decode_to_vec(&encoded_buffer, &tree)?;
    println!("decoded sequence\n{:?}", decoded_buffer);
    Ok(())
}
