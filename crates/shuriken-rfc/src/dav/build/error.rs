//! `{DAV:}error` XML body serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::dav::error::ErrorBody;
use crate::dav::namespace::DAV_NS;

/// Serializes an error body to the `{DAV:}error` XML envelope (§6).
///
/// ## Errors
/// Returns an error if XML writing fails or the generated bytes are not
/// valid UTF-8 (which should never happen with well-formed input).
pub fn serialize_error(error: &ErrorBody) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut elem = BytesStart::new("D:error");
    elem.push_attribute(("xmlns:D", DAV_NS));
    writer.write_event(Event::Start(elem))?;

    if let Some(condition) = &error.condition {
        let name = format!("D:{condition}");
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:error")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| {
        tracing::error!("generated invalid UTF-8 in error XML: {e}");
        quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "invalid UTF-8 in XML output",
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_supported_report_error() {
        let xml = serialize_error(&ErrorBody::unsupported_report()).unwrap();
        assert!(xml.contains("<D:error"));
        assert!(xml.contains("<D:supported-report/>"));
    }

    #[test]
    fn serialize_error_without_condition() {
        let xml = serialize_error(&ErrorBody::new(404, "missing")).unwrap();
        assert!(xml.contains("<D:error"));
        assert!(!xml.contains("D:supported-report"));
    }
}
