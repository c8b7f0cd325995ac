/// Length of a page token in raw bytes (hex doubles it)
pub const PAGE_TOKEN_BYTES: usize = 16;

/// Generate a fresh random page token, hex encoded
pub fn generate_page_token() -> String {
    let bytes: [u8; PAGE_TOKEN_BYTES] = rand::random();
    hex::encode(bytes)
}

/// Cheap shape check before touching the page store
pub fn is_well_formed(token: &str) -> bool {
    token.len() == PAGE_TOKEN_BYTES * 2 && token.bytes().all(|b| b.is_ascii_hexdigit())
}
