//! Certificate decoding
//!
//! Each PEM block is decoded on its own; a chain decodes all-or-nothing so a
//! caller never receives a chain with a certificate silently missing.

mod name_extraction;
mod parser;

use std::collections::HashMap;
use std::time::SystemTime;

use crate::error::Result;

/// A decoded X.509 certificate from the forwarded chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCertificate {
    /// Raw DER encoding
    pub der: Vec<u8>,
    /// Subject in RFC 4514 form
    pub subject: String,
    /// Well-known subject attributes (`CN`, `O`, `OU`, `C`, `ST`, `L`)
    pub subject_attributes: HashMap<String, String>,
    /// Issuer in RFC 4514 form
    pub issuer: String,
    /// Well-known issuer attributes
    pub issuer_attributes: HashMap<String, String>,
    /// Serial number bytes as encoded
    pub serial_number: Vec<u8>,
    /// Start of validity
    pub not_before: SystemTime,
    /// End of validity
    pub not_after: SystemTime,
    /// Lowercase hex SHA-256 of `der`
    pub fingerprint_sha256: String,
}

impl ClientCertificate {
    /// Subject common name, if present
    pub fn common_name(&self) -> Option<&str> {
        self.subject_attributes.get("CN").map(String::as_str)
    }

    /// Serial number as lowercase hex
    pub fn serial_hex(&self) -> String {
        hex::encode(&self.serial_number)
    }
}

/// Certificates in the order the proxy forwarded them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateChain(Vec<ClientCertificate>);

impl CertificateChain {
    /// A chain with no certificates: no client certificate was presented
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// First certificate in forwarded order
    pub fn leaf(&self) -> Option<&ClientCertificate> {
        self.0.first()
    }

    /// Number of certificates
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no certificate was forwarded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in forwarded order
    pub fn iter(&self) -> std::slice::Iter<'_, ClientCertificate> {
        self.0.iter()
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[ClientCertificate] {
        &self.0
    }

    /// Take ownership of the certificates
    pub fn into_vec(self) -> Vec<ClientCertificate> {
        self.0
    }
}

impl From<Vec<ClientCertificate>> for CertificateChain {
    fn from(certs: Vec<ClientCertificate>) -> Self {
        Self(certs)
    }
}

impl IntoIterator for CertificateChain {
    type Item = ClientCertificate;
    type IntoIter = std::vec::IntoIter<ClientCertificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CertificateChain {
    type Item = &'a ClientCertificate;
    type IntoIter = std::slice::Iter<'a, ClientCertificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Decode one single-certificate PEM block.
///
/// Errors report block index 0; use [`decode_all`] for positional errors.
pub fn decode_certificate(block: &str) -> Result<ClientCertificate> {
    decode_block(0, block)
}

/// Decode every block in order, failing on the first bad one.
pub fn decode_all<'b, I>(blocks: I) -> Result<CertificateChain>
where
    I: IntoIterator<Item = &'b str>,
{
    blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| decode_block(index, block))
        .collect::<Result<Vec<_>>>()
        .map(CertificateChain::from)
}

fn decode_block(index: usize, block: &str) -> Result<ClientCertificate> {
    let der = parser::pem_block_to_der(index, block)?;
    parser::parse_der_certificate(index, der)
}
