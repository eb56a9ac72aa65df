//! Shared fixtures: freshly minted certificates and header builders

#![allow(dead_code)]

use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};

/// A self-signed certificate in both encodings
pub struct TestCert {
    pub pem: String,
    pub der: Vec<u8>,
}

/// Mint a self-signed certificate whose subject CN is `common_name`
pub fn self_signed(common_name: &str) -> TestCert {
    let mut params = CertificateParams::new(vec![common_name.to_string()])
        .expect("Failed to create certificate parameters");

    let mut distinguished_name = DistinguishedName::new();
    distinguished_name.push(DnType::CommonName, common_name);
    distinguished_name.push(DnType::OrganizationName, "Forwarding Test");
    params.distinguished_name = distinguished_name;

    let key_pair = KeyPair::generate().expect("Failed to generate key pair");
    let cert = params
        .self_signed(&key_pair)
        .expect("Failed to create self-signed certificate");

    TestCert {
        pem: cert.pem(),
        der: cert.der().to_vec(),
    }
}

/// Percent-encode everything but RFC 3986 unreserved characters
pub fn url_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Header in the shape Envoy forwards, `Chain` quoted and encoded
pub fn forwarded_header(chain_pem: &str) -> String {
    format!(
        "By=spiffe://cluster.local/ns/default/sa/backend;\
         Hash=468ed33be74eee6556d90c0149c1309e9ba61d6425303443c0748a02dd8de688;\
         Subject=\"CN=Test Client,OU=Lyft,L=San Francisco,ST=CA,C=US\";\
         URI=spiffe://cluster.local/ns/default/sa/client;\
         Chain=\"{}\"",
        url_encode(chain_pem)
    )
}

/// Header list holding only the forwarded certificate header
pub fn headers_with(value: &str) -> Vec<(&'static str, String)> {
    vec![("x-forwarded-client-cert", value.to_string())]
}
