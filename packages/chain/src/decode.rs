//! Quote stripping and strict percent decoding of field values

use crate::error::PercentDecodeError;

/// Remove every leading and trailing `"`
pub fn strip_quotes(raw: &str) -> &str {
    raw.trim_matches('"')
}

/// Decode `%XX` escapes, interpreting the result as UTF-8.
///
/// Unlike lenient URL decoders, a `%` not followed by two hex digits is an
/// error rather than a literal. With `plus_as_space`, `+` decodes to a space.
pub fn percent_decode(input: &str, plus_as_space: bool) -> Result<String, PercentDecodeError> {
    let bytes = input.as_bytes();
    let needs_decoding = bytes.contains(&b'%') || (plus_as_space && bytes.contains(&b'+'));
    if !needs_decoding {
        return Ok(input.to_string());
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes
                    .get(i + 1..i + 3)
                    .ok_or(PercentDecodeError::Truncated { offset: i })?;
                let mut decoded = [0u8; 1];
                hex::decode_to_slice(escape, &mut decoded)
                    .map_err(|_| PercentDecodeError::InvalidHex { offset: i })?;
                out.push(decoded[0]);
                i += 3;
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| PercentDecodeError::InvalidUtf8)
}

/// Turn a raw `Chain` value into literal PEM text
pub fn decode_chain_value(raw: &str, plus_as_space: bool) -> Result<String, PercentDecodeError> {
    percent_decode(strip_quotes(raw), plus_as_space)
}
