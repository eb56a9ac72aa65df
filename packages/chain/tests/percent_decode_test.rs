//! Quote stripping and strict percent decoding

use xfcc_chain::decode::{decode_chain_value, percent_decode, strip_quotes};
use xfcc_chain::PercentDecodeError;

#[test]
fn test_strip_quotes_removes_all_surrounding_quotes() {
    assert_eq!(strip_quotes("\"abc\""), "abc");
    assert_eq!(strip_quotes("\"\"\"abc\"\""), "abc");
    assert_eq!(strip_quotes("\"abc"), "abc");
    assert_eq!(strip_quotes("abc\""), "abc");
    assert_eq!(strip_quotes("a\"b"), "a\"b");
    assert_eq!(strip_quotes("\"\""), "");
    assert_eq!(strip_quotes(""), "");
}

#[test]
fn test_percent_decode_escapes() {
    let decoded = percent_decode("-----BEGIN%20CERTIFICATE-----%0AMIIB%2Fw%3D%3D%0a", false)
        .expect("valid escapes");
    assert_eq!(decoded, "-----BEGIN CERTIFICATE-----\nMIIB/w==\n");
}

#[test]
fn test_percent_decode_multibyte_utf8() {
    assert_eq!(percent_decode("caf%C3%A9", false), Ok("café".to_string()));
}

#[test]
fn test_percent_decode_empty_input() {
    assert_eq!(percent_decode("", false), Ok(String::new()));
    assert_eq!(decode_chain_value("\"\"", false), Ok(String::new()));
}

#[test]
fn test_plus_is_literal_unless_requested() {
    assert_eq!(percent_decode("a+b", false), Ok("a+b".to_string()));
    assert_eq!(percent_decode("a+b%2B", true), Ok("a b+".to_string()));
}

#[test]
fn test_truncated_escape_is_rejected() {
    assert_eq!(
        percent_decode("abc%4", false),
        Err(PercentDecodeError::Truncated { offset: 3 })
    );
    assert_eq!(
        percent_decode("%", false),
        Err(PercentDecodeError::Truncated { offset: 0 })
    );
}

#[test]
fn test_non_hex_escape_is_rejected() {
    assert_eq!(
        percent_decode("ab%G1", false),
        Err(PercentDecodeError::InvalidHex { offset: 2 })
    );
    assert_eq!(
        percent_decode("%2Z", false),
        Err(PercentDecodeError::InvalidHex { offset: 0 })
    );
}

#[test]
fn test_invalid_utf8_is_rejected() {
    assert_eq!(percent_decode("%FF%FE", false), Err(PercentDecodeError::InvalidUtf8));
}

#[test]
fn test_quoted_and_unquoted_decode_identically() {
    let raw = "%2D%2D%2D%2D%2DBEGIN%20CERTIFICATE%2D%2D%2D%2D%2D";
    let quoted = format!("\"{raw}\"");
    assert_eq!(
        decode_chain_value(&quoted, false),
        decode_chain_value(raw, false)
    );
    assert_eq!(
        decode_chain_value(raw, false),
        Ok("-----BEGIN CERTIFICATE-----".to_string())
    );
}
