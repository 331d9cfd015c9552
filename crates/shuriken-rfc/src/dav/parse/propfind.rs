//! PROPFIND request XML parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::{ParseError, ParseResult};
use crate::dav::namespace::{Namespace, QName};
use crate::dav::propfind::{PropfindRequest, PropfindType};

/// Parses a PROPFIND request body.
///
/// ## Summary
/// Parses the XML body of a PROPFIND request. An empty body means `allprop`,
/// per RFC 4918 §9.1. Any `D:include` element nested under `D:allprop` is
/// accepted but ignored, since the response to `allprop` is always the
/// server's fixed property enumeration.
///
/// ## Errors
/// Returns an error if the XML is malformed.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_propfind(xml: &[u8]) -> ParseResult<PropfindRequest> {
    if xml.is_empty() {
        tracing::debug!("empty PROPFIND body, returning allprop");
        return Ok(PropfindRequest::allprop());
    }

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut namespaces: Vec<(String, String)> = Vec::new();
    let mut in_propfind = false;
    let mut in_prop = false;
    let mut propfind_type: Option<PropfindType> = None;
    let mut properties: Vec<QName> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                let local_name = std::str::from_utf8(e.local_name().as_ref())?.to_owned();

                for attr in e.attributes().flatten() {
                    let key = std::str::from_utf8(attr.key.as_ref())?;
                    let value = std::str::from_utf8(&attr.value)?;
                    if let Some(prefix) = key.strip_prefix("xmlns:") {
                        namespaces.push((prefix.to_string(), value.to_string()));
                    } else if key == "xmlns" {
                        namespaces.push((String::new(), value.to_string()));
                    }
                }

                match local_name.as_str() {
                    "propfind" => in_propfind = true,
                    "allprop" if in_propfind => propfind_type = Some(PropfindType::AllProp),
                    "propname" if in_propfind => propfind_type = Some(PropfindType::PropName),
                    "prop" if in_propfind => {
                        in_prop = true;
                        if propfind_type.is_none() {
                            propfind_type = Some(PropfindType::Prop(Vec::new()));
                        }
                    }
                    _ if in_prop => properties.push(resolve_qname(e, &namespaces)?),
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                match std::str::from_utf8(e.local_name().as_ref())? {
                    "propfind" => in_propfind = false,
                    "prop" => in_prop = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(match propfind_type {
        Some(PropfindType::AllProp) => PropfindRequest::allprop(),
        Some(PropfindType::PropName) => PropfindRequest::propname(),
        Some(PropfindType::Prop(_)) => PropfindRequest::prop(properties),
        None => PropfindRequest::allprop(),
    })
}

/// Resolves a `QName` from an element, defaulting an unresolved prefix to
/// `DAV:` per the engine's namespace-safe comparison policy.
pub(super) fn resolve_qname(
    e: &quick_xml::events::BytesStart<'_>,
    namespaces: &[(String, String)],
) -> ParseResult<QName> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_owned();

    let (prefix, local_name) = name
        .find(':')
        .map_or((String::new(), name.clone()), |colon| {
            (name[..colon].to_owned(), name[colon + 1..].to_owned())
        });

    let namespace = namespaces
        .iter()
        .rev()
        .find(|(p, _)| *p == prefix)
        .map_or("DAV:", |(_, ns)| ns.as_str());

    Ok(QName::new(Namespace::new(namespace.to_string()), local_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_body() {
        let req = parse_propfind(b"").unwrap();
        assert!(req.is_allprop());
    }

    #[test]
    fn parse_allprop() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:allprop/>
</D:propfind>"#;
        assert!(parse_propfind(xml).unwrap().is_allprop());
    }

    #[test]
    fn parse_propname() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:propname/>
</D:propfind>"#;
        assert!(parse_propfind(xml).unwrap().is_propname());
    }

    #[test]
    fn parse_prop() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:prop>
    <D:displayname/>
    <D:resourcetype/>
    <C:calendar-data/>
  </D:prop>
</D:propfind>"#;
        let req = parse_propfind(xml).unwrap();
        let props = req.requested_properties().unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].local_name(), "displayname");
        assert_eq!(props[2].local_name(), "calendar-data");
        assert!(props[2].is_caldav());
    }

    #[test]
    fn parse_allprop_ignores_include() {
        let xml = br#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:allprop/>
  <D:include>
    <C:calendar-data/>
  </D:include>
</D:propfind>"#;
        assert!(parse_propfind(xml).unwrap().is_allprop());
    }
}
