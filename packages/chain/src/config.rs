//! Extractor configuration
//!
//! Provides the knobs for header lookup, segment parsing, decoding bounds and
//! the client certificate policy, with presets for common deployments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, Result};

/// Header a TLS-terminating proxy uses to forward the client certificate
pub const DEFAULT_HEADER_NAME: &str = "x-forwarded-client-cert";

/// Upper bound on the raw header length in bytes
pub const DEFAULT_MAX_HEADER_LEN: usize = 64 * 1024;

/// Upper bound on the number of certificates in one forwarded chain
pub const DEFAULT_MAX_CERTIFICATES: usize = 16;

/// How a `key=value` header segment is split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentSplitMode {
    /// Split on the first `=`; later `=` characters stay in the value
    #[default]
    FirstEquals,

    /// Split on every `=` and keep only the first two tokens.
    /// A value containing `=` is cut at its first `=`.
    Truncating,
}

/// Whether the deployment mandates a forwarded client certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateRequirement {
    /// A missing header or chain yields an empty chain plus a diagnostic
    #[default]
    Optional,

    /// A missing header, missing chain or empty chain is a fatal error
    Required,
}

impl CertificateRequirement {
    /// Parse from string (case-insensitive)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "optional" | "off" | "false" | "0" => Some(Self::Optional),
            "required" | "require" | "on" | "true" | "1" | "strict" => Some(Self::Required),
            _ => None,
        }
    }

    /// Check if this mode requires a client certificate
    pub fn requires_cert(&self) -> bool {
        matches!(self, Self::Required)
    }
}

impl fmt::Display for CertificateRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional => write!(f, "optional"),
            Self::Required => write!(f, "required"),
        }
    }
}

/// Configuration for [`ChainExtractor`](crate::ChainExtractor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Header carrying the forwarded certificate, matched case-insensitively
    pub header_name: String,
    /// Segment splitting behavior
    pub split_mode: SegmentSplitMode,
    /// Decode `+` as a space, as HTML form decoding does
    pub plus_as_space: bool,
    /// Maximum accepted header length in bytes
    pub max_header_len: usize,
    /// Maximum accepted number of certificates
    pub max_certificates: usize,
    /// Client certificate policy
    pub requirement: CertificateRequirement,
    /// Pin the leaf certificate to the forwarded `Hash` field
    pub verify_hash: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            header_name: DEFAULT_HEADER_NAME.to_string(),
            split_mode: SegmentSplitMode::FirstEquals,
            plus_as_space: false,
            max_header_len: DEFAULT_MAX_HEADER_LEN,
            max_certificates: DEFAULT_MAX_CERTIFICATES,
            requirement: CertificateRequirement::Optional,
            verify_hash: false,
        }
    }
}

impl ExtractorConfig {
    /// Reproduce the historical lookup byte for byte: values are cut at their
    /// second `=` and `+` decodes to a space.
    #[must_use]
    pub fn legacy_compatible() -> Self {
        Self {
            split_mode: SegmentSplitMode::Truncating,
            plus_as_space: true,
            ..Self::default()
        }
    }

    /// For deployments that reject requests without a client certificate
    #[must_use]
    pub fn require_client_certificate() -> Self {
        Self {
            requirement: CertificateRequirement::Required,
            ..Self::default()
        }
    }

    /// Load configuration from JSON; absent fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ExtractionError::configuration(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no request could ever satisfy
    pub fn validate(&self) -> Result<()> {
        if self.header_name.trim().is_empty() {
            return Err(ExtractionError::configuration("header_name must not be empty"));
        }
        if self.max_header_len == 0 {
            return Err(ExtractionError::configuration(
                "max_header_len must be greater than zero",
            ));
        }
        if self.max_certificates == 0 {
            return Err(ExtractionError::configuration(
                "max_certificates must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Read the certificate from a different header
    #[must_use]
    pub fn with_header_name(self, name: impl Into<String>) -> Self {
        Self {
            header_name: name.into(),
            ..self
        }
    }

    /// Set the segment splitting behavior
    #[must_use]
    pub fn with_split_mode(self, split_mode: SegmentSplitMode) -> Self {
        Self { split_mode, ..self }
    }

    /// Toggle `+` to space decoding
    #[must_use]
    pub fn with_plus_as_space(self, plus_as_space: bool) -> Self {
        Self {
            plus_as_space,
            ..self
        }
    }

    /// Bound the raw header length
    #[must_use]
    pub fn with_max_header_len(self, max_header_len: usize) -> Self {
        Self {
            max_header_len,
            ..self
        }
    }

    /// Bound the number of certificates
    #[must_use]
    pub fn with_max_certificates(self, max_certificates: usize) -> Self {
        Self {
            max_certificates,
            ..self
        }
    }

    /// Set the client certificate policy
    #[must_use]
    pub fn with_requirement(self, requirement: CertificateRequirement) -> Self {
        Self {
            requirement,
            ..self
        }
    }

    /// Toggle leaf hash pinning
    #[must_use]
    pub fn with_verify_hash(self, verify_hash: bool) -> Self {
        Self {
            verify_hash,
            ..self
        }
    }
}
