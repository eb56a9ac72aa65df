//! Splitting a concatenated PEM chain into single-certificate blocks

/// Marker every certificate block starts with
pub const CERTIFICATE_BOUNDARY: &str = "-----BEGIN CERTIFICATE-----";

/// Marker every certificate block ends with
pub const CERTIFICATE_END: &str = "-----END CERTIFICATE-----";

/// Split `text` at each certificate boundary, preserving order.
///
/// Offset 0 is always a boundary, so anything before the first marker
/// becomes a block of its own and fails later at decoding. Empty text
/// yields a single empty block.
pub fn split_pem_chain(text: &str) -> Vec<&str> {
    let mut boundaries = vec![0];
    let mut last = 0;

    while let Some(step) = text[last..].chars().next().map(char::len_utf8) {
        let from = last + step;
        match text[from..].find(CERTIFICATE_BOUNDARY) {
            Some(offset) => {
                last = from + offset;
                boundaries.push(last);
            }
            None => break,
        }
    }
    boundaries.push(text.len());

    boundaries
        .windows(2)
        .map(|pair| &text[pair[0]..pair[1]])
        .collect()
}
