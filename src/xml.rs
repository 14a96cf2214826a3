//! `API3G` XML encoding.

use serde::{Serialize, de::DeserializeOwned};

/// Declaration every request document must start with.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// Root element of every request and response document.
pub const ROOT: &str = "API3G";

/// Serialize `value` under an `API3G` root with the XML declaration prepended.
///
/// `pretty` indents nested elements by four spaces.
pub fn to_xml<T: Serialize>(value: &T, pretty: bool) -> Result<String, quick_xml::SeError> {
    let mut document = String::from(XML_HEADER);
    let mut serializer = quick_xml::se::Serializer::with_root(&mut document, Some(ROOT))?;
    if pretty {
        serializer.indent(' ', 4);
    }
    value.serialize(serializer)?;
    Ok(document)
}

/// Parse an `API3G` document. The declaration is optional.
pub fn from_xml<T: DeserializeOwned>(body: &str) -> Result<T, quick_xml::DeError> {
    quick_xml::de::from_str(body)
}
