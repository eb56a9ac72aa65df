//! Forwarded client certificate chain extraction
//!
//! A TLS-terminating proxy passes the client's certificate chain to the
//! backend in a semicolon-delimited header (`x-forwarded-client-cert`), with
//! the PEM chain percent-encoded in its `Chain` field. This crate turns that
//! header back into an ordered chain of decoded X.509 certificates:
//!
//! - `header`: header lookup and `key=value` field parsing
//! - `decode`: quote stripping and strict percent decoding
//! - `pem`: splitting the PEM chain at certificate boundaries
//! - `certificate`: fail-fast decoding into [`ClientCertificate`]s
//! - `extractor`: the pipeline, limits and client certificate policy
//!
//! Trust, expiry and revocation checks are left to the caller.

#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod certificate;
pub mod config;
pub mod decode;
pub mod error;
pub mod extractor;
pub mod header;
pub mod pem;

pub use certificate::{decode_all, decode_certificate, CertificateChain, ClientCertificate};
pub use config::{CertificateRequirement, ExtractorConfig, SegmentSplitMode};
pub use error::{ExtractionError, LimitKind, PercentDecodeError, Result};
pub use extractor::{extract_certificate_chain, ChainExtractor, Diagnostic, Extraction};
pub use header::{locate_header, parse_fields, FieldMap, HeaderSource};
pub use pem::{split_pem_chain, CERTIFICATE_BOUNDARY, CERTIFICATE_END};
