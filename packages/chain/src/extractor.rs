//! Forwarded client certificate extraction pipeline
//!
//! Locate header, parse fields, decode the `Chain` value, split it into PEM
//! blocks and decode every block. Each call is a pure function of the
//! request headers and the configuration; nothing is cached.

use std::fmt;

use tracing::{debug, warn};

use crate::certificate::{decode_all, CertificateChain};
use crate::config::ExtractorConfig;
use crate::decode::{decode_chain_value, strip_quotes};
use crate::error::{ExtractionError, LimitKind, Result};
use crate::header::{locate_header, parse_fields, FieldMap, HeaderSource};
use crate::pem::split_pem_chain;

/// A non-fatal condition met while extracting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The forwarded certificate header was not on the request
    MissingHeader {
        /// Header name that was looked up
        header: String,
    },
    /// The header had no `Chain` field
    ChainFieldAbsent,
    /// The `Chain` field decoded to nothing
    EmptyChain,
}

impl Diagnostic {
    fn into_error(self) -> ExtractionError {
        match self {
            Self::MissingHeader { header } => ExtractionError::MissingHeader { header },
            Self::ChainFieldAbsent => ExtractionError::ChainFieldAbsent,
            Self::EmptyChain => ExtractionError::EmptyChain,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader { header } => write!(f, "HTTP header `{header}` is absent"),
            Self::ChainFieldAbsent => write!(f, "Chain could not be extracted from the header"),
            Self::EmptyChain => write!(f, "Chain field is empty"),
        }
    }
}

/// Chain plus the diagnostics recorded on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Decoded certificates, possibly none
    pub chain: CertificateChain,
    /// Non-fatal conditions, in the order they were met
    pub diagnostics: Vec<Diagnostic>,
}

/// Stateless extractor; share one per configuration
#[derive(Debug, Clone, Default)]
pub struct ChainExtractor {
    config: ExtractorConfig,
}

impl ChainExtractor {
    /// Create an extractor after validating `config`
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the forwarded chain, dropping diagnostics after logging them
    pub fn extract<S>(&self, source: &S) -> Result<CertificateChain>
    where
        S: HeaderSource + ?Sized,
    {
        self.extract_with_diagnostics(source)
            .map(|extraction| extraction.chain)
    }

    /// Extract the forwarded chain and report what was absorbed along the way
    pub fn extract_with_diagnostics<S>(&self, source: &S) -> Result<Extraction>
    where
        S: HeaderSource + ?Sized,
    {
        self.run(source).inspect_err(|e| {
            debug!(error = %e, header = %self.config.header_name, "Forwarded certificate extraction failed");
        })
    }

    fn run<S>(&self, source: &S) -> Result<Extraction>
    where
        S: HeaderSource + ?Sized,
    {
        let mut diagnostics = Vec::new();

        let located = locate_header(source, &self.config.header_name)?;
        let header_present = located.is_some();
        let header = match located {
            Some(value) => value,
            None => {
                let header = self.config.header_name.clone();
                self.absorb(Diagnostic::MissingHeader { header }, &mut diagnostics)?;
                ""
            }
        };

        if header.len() > self.config.max_header_len {
            return Err(ExtractionError::limit_exceeded(
                LimitKind::HeaderLength,
                self.config.max_header_len,
                header.len(),
            ));
        }

        let fields = parse_fields(header, self.config.split_mode)?;
        debug!(segments = fields.segment_count(), "Parsed forwarded certificate fields");

        let raw_chain = match fields.chain() {
            Some(raw) => raw,
            None => {
                if header_present {
                    self.absorb(Diagnostic::ChainFieldAbsent, &mut diagnostics)?;
                }
                return Ok(Extraction {
                    chain: CertificateChain::empty(),
                    diagnostics,
                });
            }
        };

        let decoded = decode_chain_value(raw_chain, self.config.plus_as_space)?;
        if decoded.is_empty() {
            self.absorb(Diagnostic::EmptyChain, &mut diagnostics)?;
            return Ok(Extraction {
                chain: CertificateChain::empty(),
                diagnostics,
            });
        }

        let blocks = split_pem_chain(&decoded);
        if blocks.len() > self.config.max_certificates {
            return Err(ExtractionError::limit_exceeded(
                LimitKind::CertificateCount,
                self.config.max_certificates,
                blocks.len(),
            ));
        }
        debug!(blocks = blocks.len(), "Split forwarded chain into PEM blocks");

        let chain = decode_all(blocks)?;
        if self.config.verify_hash {
            verify_leaf_hash(&fields, &chain)?;
        }

        debug!(certificates = chain.len(), "Extracted forwarded certificate chain");
        Ok(Extraction { chain, diagnostics })
    }

    fn absorb(&self, diagnostic: Diagnostic, diagnostics: &mut Vec<Diagnostic>) -> Result<()> {
        if self.config.requirement.requires_cert() {
            return Err(diagnostic.into_error());
        }
        warn!(header = %self.config.header_name, "{diagnostic}");
        diagnostics.push(diagnostic);
        Ok(())
    }
}

/// Compare the forwarded `Hash` field with the leaf certificate's SHA-256.
///
/// Nothing is checked when either side is missing.
fn verify_leaf_hash(fields: &FieldMap<'_>, chain: &CertificateChain) -> Result<()> {
    let (Some(expected), Some(leaf)) = (fields.hash(), chain.leaf()) else {
        return Ok(());
    };
    let expected = strip_quotes(expected);
    if expected.eq_ignore_ascii_case(&leaf.fingerprint_sha256) {
        Ok(())
    } else {
        Err(ExtractionError::HashMismatch {
            expected: expected.to_string(),
            actual: leaf.fingerprint_sha256.clone(),
        })
    }
}

/// Extract with the default configuration
pub fn extract_certificate_chain<S>(source: &S) -> Result<CertificateChain>
where
    S: HeaderSource + ?Sized,
{
    ChainExtractor::default().extract(source)
}
