//! Error types for forwarded client certificate extraction

use std::fmt;

use thiserror::Error;

/// Which configured bound an input exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// Raw header length in bytes
    HeaderLength,
    /// Number of PEM blocks produced by the splitter
    CertificateCount,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderLength => write!(f, "header length"),
            Self::CertificateCount => write!(f, "certificate count"),
        }
    }
}

/// Failures of the strict `%XX` decoder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercentDecodeError {
    /// Fewer than two characters follow a `%`
    #[error("incomplete percent escape at offset {offset}")]
    Truncated {
        /// Byte offset of the `%`
        offset: usize,
    },

    /// The two characters after `%` are not hex digits
    #[error("invalid hex digits in percent escape at offset {offset}")]
    InvalidHex {
        /// Byte offset of the `%`
        offset: usize,
    },

    /// The decoded bytes are not UTF-8
    #[error("percent-decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Everything that can go wrong turning a forwarded header into a certificate chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The header is absent and a client certificate is required
    #[error("header `{header}` is absent")]
    MissingHeader {
        /// Header name that was looked up
        header: String,
    },

    /// The header value is not valid UTF-8
    #[error("header `{header}` is not valid UTF-8")]
    InvalidHeaderEncoding {
        /// Header name that was looked up
        header: String,
    },

    /// The header has no `Chain` field and a client certificate is required
    #[error("`Chain` field is absent from the forwarded header")]
    ChainFieldAbsent,

    /// The `Chain` field is empty and a client certificate is required
    #[error("forwarded header carries no client certificate")]
    EmptyChain,

    /// A `;`-separated segment has no `=`
    #[error("malformed header segment without `=`: {segment:?}")]
    MalformedSegment {
        /// The offending segment, verbatim
        segment: String,
    },

    /// The `Chain` value has a bad percent escape
    #[error("percent decoding failed: {0}")]
    PercentDecode(#[from] PercentDecodeError),

    /// A PEM block is not a single well-formed certificate
    #[error("certificate block {index} could not be decoded: {reason}")]
    CertificateDecode {
        /// Zero-based position of the block in the chain
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The input exceeds a configured bound
    #[error("{kind} of {actual} exceeds the configured maximum of {max}")]
    LimitExceeded {
        /// Which bound
        kind: LimitKind,
        /// Configured maximum
        max: usize,
        /// Observed size
        actual: usize,
    },

    /// The leaf fingerprint differs from the forwarded `Hash` field
    #[error("leaf certificate fingerprint {actual} does not match forwarded hash {expected}")]
    HashMismatch {
        /// `Hash` field value
        expected: String,
        /// SHA-256 of the leaf certificate
        actual: String,
    },

    /// The configuration can never be satisfied
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ExtractionError {
    /// Create a `MalformedSegment` error
    pub fn malformed_segment(segment: impl Into<String>) -> Self {
        Self::MalformedSegment {
            segment: segment.into(),
        }
    }

    /// Create a `CertificateDecode` error for the block at `index`
    pub fn certificate_decode(index: usize, reason: impl Into<String>) -> Self {
        Self::CertificateDecode {
            index,
            reason: reason.into(),
        }
    }

    /// Create a `LimitExceeded` error
    pub fn limit_exceeded(kind: LimitKind, max: usize, actual: usize) -> Self {
        Self::LimitExceeded { kind, max, actual }
    }

    /// Create a `Configuration` error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether this kind aborts extraction under the default (optional certificate) policy.
    ///
    /// `MissingHeader`, `ChainFieldAbsent` and `EmptyChain` are only ever returned
    /// when a client certificate is required.
    pub fn is_fatal_by_default(&self) -> bool {
        !matches!(
            self,
            Self::MissingHeader { .. } | Self::ChainFieldAbsent | Self::EmptyChain
        )
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractionError>;
