/// Compare an API key in constant time.
///
/// Runtime depends only on the length of the inputs, not on where the
/// first differing byte is.
pub fn verify_api_key(provided: &str, expected: &str) -> bool {
    provided.len() == expected.len()
        && provided
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
