//! Distinguished name attribute extraction

use std::collections::HashMap;

use der::asn1::{Ia5StringRef, PrintableStringRef, Utf8StringRef};
use der::Any;
use x509_cert::name::Name;

// (OID, short name) for the attributes consumers usually key on
const NAME_ATTRIBUTES: [(&str, &str); 6] = [
    ("2.5.4.3", "CN"),
    ("2.5.4.10", "O"),
    ("2.5.4.11", "OU"),
    ("2.5.4.6", "C"),
    ("2.5.4.8", "ST"),
    ("2.5.4.7", "L"),
];

/// Collect the well-known attributes of `name` keyed by short name.
///
/// When an attribute repeats, the last RDN wins. Values in string types
/// other than Printable, UTF8 and IA5 are skipped.
pub(crate) fn extract_name_attributes(name: &Name) -> HashMap<String, String> {
    let mut attrs = HashMap::new();

    for rdn in &name.0 {
        for atv in rdn.0.iter() {
            let oid = atv.oid.to_string();
            let Some((_, short)) = NAME_ATTRIBUTES.iter().find(|(known, _)| *known == oid) else {
                continue;
            };
            if let Some(value) = attribute_string(&atv.value) {
                attrs.insert((*short).to_string(), value);
            }
        }
    }

    attrs
}

fn attribute_string(value: &Any) -> Option<String> {
    if let Ok(ps) = PrintableStringRef::try_from(value) {
        Some(ps.to_string())
    } else if let Ok(utf8) = Utf8StringRef::try_from(value) {
        Some(utf8.to_string())
    } else if let Ok(ia5) = Ia5StringRef::try_from(value) {
        Some(ia5.to_string())
    } else {
        None
    }
}
