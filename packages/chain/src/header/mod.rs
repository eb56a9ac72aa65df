//! Header lookup against the inbound request
//!
//! The HTTP layer is an external collaborator; [`HeaderSource`] is the only
//! thing this crate asks of it. Names are matched case-insensitively and the
//! value is returned exactly as received.

pub mod fields;

use std::collections::HashMap;
use std::hash::BuildHasher;

use tracing::debug;

use crate::error::{ExtractionError, Result};

pub use fields::{parse_fields, FieldMap};

/// Anything a header value can be looked up in
pub trait HeaderSource {
    /// Raw bytes of the first value of header `name`, or `None` when absent
    fn header_value(&self, name: &str) -> Option<&[u8]>;
}

impl HeaderSource for http::HeaderMap {
    fn header_value(&self, name: &str) -> Option<&[u8]> {
        self.get(name).map(http::HeaderValue::as_bytes)
    }
}

impl<B> HeaderSource for http::Request<B> {
    fn header_value(&self, name: &str) -> Option<&[u8]> {
        self.headers().header_value(name)
    }
}

impl<S: BuildHasher> HeaderSource for HashMap<String, String, S> {
    fn header_value(&self, name: &str) -> Option<&[u8]> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_bytes())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for [(K, V)] {
    fn header_value(&self, name: &str) -> Option<&[u8]> {
        self.iter()
            .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref().as_bytes())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for Vec<(K, V)> {
    fn header_value(&self, name: &str) -> Option<&[u8]> {
        self.as_slice().header_value(name)
    }
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    fn header_value(&self, name: &str) -> Option<&[u8]> {
        (**self).header_value(name)
    }
}

/// Retrieve the raw forwarded certificate header, untouched.
///
/// A value that is not UTF-8 fails with `InvalidHeaderEncoding` rather than
/// being altered.
pub fn locate_header<'a, S>(source: &'a S, name: &str) -> Result<Option<&'a str>>
where
    S: HeaderSource + ?Sized,
{
    let Some(raw) = source.header_value(name) else {
        debug!(header = name, "Forwarded certificate header not present");
        return Ok(None);
    };
    let value = std::str::from_utf8(raw).map_err(|_| ExtractionError::InvalidHeaderEncoding {
        header: name.to_string(),
    })?;
    debug!(header = name, len = value.len(), "Located forwarded certificate header");
    Ok(Some(value))
}
