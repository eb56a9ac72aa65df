//! Semicolon-delimited `key=value` field parsing

use std::collections::HashMap;

use crate::config::SegmentSplitMode;
use crate::error::{ExtractionError, Result};

/// URL-encoded PEM chain of the client certificate, leaf included
pub const KEY_CHAIN: &str = "Chain";
/// Hex SHA-256 digest of the client certificate
pub const KEY_HASH: &str = "Hash";
/// URL-encoded PEM of the client certificate alone
pub const KEY_CERT: &str = "Cert";
/// Subject of the client certificate
pub const KEY_SUBJECT: &str = "Subject";
/// URI SAN of the client certificate
pub const KEY_URI: &str = "URI";
/// DNS SAN of the client certificate
pub const KEY_DNS: &str = "DNS";
/// URI SAN of the proxy's own certificate
pub const KEY_BY: &str = "By";

/// Field name to value mapping built from one header, borrowing from it.
///
/// Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap<'a> {
    fields: HashMap<&'a str, &'a str>,
    segments: usize,
}

impl<'a> FieldMap<'a> {
    /// Value of `key`, matched exactly
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key).copied()
    }

    /// The raw `Chain` value
    pub fn chain(&self) -> Option<&'a str> {
        self.get(KEY_CHAIN)
    }

    /// The raw `Hash` value
    pub fn hash(&self) -> Option<&'a str> {
        self.get(KEY_HASH)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the header had no segments
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of segments parsed, duplicates included
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// All fields, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, *v))
    }
}

/// Parse a forwarded certificate header into its fields.
///
/// An empty header is an empty map. Any segment without `=` (an empty
/// segment included) fails with `MalformedSegment`.
pub fn parse_fields(header: &str, mode: SegmentSplitMode) -> Result<FieldMap<'_>> {
    let mut map = FieldMap::default();
    if header.is_empty() {
        return Ok(map);
    }

    for segment in header.split(';') {
        let (key, value) = split_segment(segment, mode)
            .ok_or_else(|| ExtractionError::malformed_segment(segment))?;
        map.fields.insert(key, value);
        map.segments += 1;
    }

    Ok(map)
}

fn split_segment(segment: &str, mode: SegmentSplitMode) -> Option<(&str, &str)> {
    match mode {
        SegmentSplitMode::FirstEquals => segment.split_once('='),
        SegmentSplitMode::Truncating => {
            // tokens past the second are dropped
            let mut tokens = segment.split('=');
            let key = tokens.next()?;
            let value = tokens.next()?;
            Some((key, value))
        }
    }
}
