//! PEM block to structured certificate

use std::io::Cursor;

use der::Decode;
use rustls_pemfile::Item;
use sha2::{Digest, Sha256};
use tracing::debug;
use x509_cert::Certificate as X509Certificate;

use crate::error::{ExtractionError, Result};
use crate::pem::{CERTIFICATE_BOUNDARY, CERTIFICATE_END};

use super::name_extraction::extract_name_attributes;
use super::ClientCertificate;

/// Decode a block holding exactly one certificate section into DER.
///
/// Only whitespace may surround the section; any other text or PEM section
/// in the block fails the whole block.
pub(crate) fn pem_block_to_der(index: usize, block: &str) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(block.as_bytes());
    let mut items = rustls_pemfile::read_all(&mut cursor);
    let first = items
        .next()
        .ok_or_else(|| ExtractionError::certificate_decode(index, "no certificate in PEM block"))?
        .map_err(|e| ExtractionError::certificate_decode(index, format!("failed to parse PEM: {e}")))?;
    let Item::X509Certificate(cert_der) = first else {
        return Err(ExtractionError::certificate_decode(
            index,
            "PEM block is not a certificate",
        ));
    };
    if items.next().is_some() {
        return Err(unexpected_content(index));
    }

    // read_all skips text outside sections, so check the surroundings directly
    if !block.trim_start().starts_with(CERTIFICATE_BOUNDARY) {
        return Err(ExtractionError::certificate_decode(
            index,
            "unexpected content before certificate",
        ));
    }
    let trailing = block
        .find(CERTIFICATE_END)
        .map(|pos| &block[pos + CERTIFICATE_END.len()..])
        .ok_or_else(|| unexpected_content(index))?;
    if !trailing.trim().is_empty() {
        return Err(unexpected_content(index));
    }

    Ok(cert_der.to_vec())
}

fn unexpected_content(index: usize) -> ExtractionError {
    ExtractionError::certificate_decode(index, "unexpected content after certificate")
}

/// Parse DER into a [`ClientCertificate`], keeping the DER it came from
pub(crate) fn parse_der_certificate(index: usize, der: Vec<u8>) -> Result<ClientCertificate> {
    let cert = X509Certificate::from_der(&der).map_err(|e| {
        ExtractionError::certificate_decode(index, format!("X.509 parsing failed: {e}"))
    })?;

    let tbs = &cert.tbs_certificate;
    let fingerprint_sha256 = hex::encode(Sha256::digest(&der));
    debug!(index, fingerprint = %fingerprint_sha256, "Decoded forwarded certificate");

    Ok(ClientCertificate {
        subject: tbs.subject.to_string(),
        subject_attributes: extract_name_attributes(&tbs.subject),
        issuer: tbs.issuer.to_string(),
        issuer_attributes: extract_name_attributes(&tbs.issuer),
        serial_number: tbs.serial_number.as_bytes().to_vec(),
        not_before: tbs.validity.not_before.to_system_time(),
        not_after: tbs.validity.not_after.to_system_time(),
        fingerprint_sha256,
        der,
    })
}
