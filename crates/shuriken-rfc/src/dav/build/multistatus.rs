//! Multistatus XML serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::dav::multistatus::{Multistatus, PropstatResponse};
use crate::dav::namespace::{CALDAV_NS, CARDDAV_NS, CS_NS, DAV_NS, ICAL_NS, ME_NS};
use crate::dav::property::{DavProperty, PropertyValue};

/// Serializes a multistatus response to XML.
///
/// ## Errors
/// Returns an error if XML writing fails or the generated bytes are not
/// valid UTF-8 (which should never happen with well-formed input).
pub fn serialize_multistatus(multistatus: &Multistatus) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut elem = BytesStart::new("D:multistatus");
    elem.push_attribute(("xmlns:D", DAV_NS));
    elem.push_attribute(("xmlns:C", CALDAV_NS));
    elem.push_attribute(("xmlns:CR", CARDDAV_NS));
    elem.push_attribute(("xmlns:CS", CS_NS));
    writer.write_event(Event::Start(elem))?;

    for response in &multistatus.responses {
        write_response(&mut writer, response)?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:multistatus")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| {
        tracing::error!("generated invalid UTF-8 in multistatus XML: {e}");
        quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "invalid UTF-8 in XML output",
        )))
    })
}

fn write_response<W: std::io::Write>(
    writer: &mut Writer<W>,
    response: &PropstatResponse,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("D:response")))?;
    write_text_element(writer, "D:href", response.href.as_str())?;

    if let Some(status) = response.status {
        write_text_element(writer, "D:status", &status.status_line())?;
    }

    for propstat in &response.propstats {
        writer.write_event(Event::Start(BytesStart::new("D:propstat")))?;
        writer.write_event(Event::Start(BytesStart::new("D:prop")))?;
        for prop in &propstat.properties {
            write_property(writer, prop)?;
        }
        writer.write_event(Event::End(BytesEnd::new("D:prop")))?;
        write_text_element(writer, "D:status", &propstat.status.status_line())?;
        writer.write_event(Event::End(BytesEnd::new("D:propstat")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("D:response")))?;
    Ok(())
}

#[expect(clippy::too_many_lines)]
fn write_property<W: std::io::Write>(writer: &mut Writer<W>, prop: &DavProperty) -> Result<(), quick_xml::Error> {
    let prefix = namespace_prefix(prop.name.namespace_uri());
    let elem_name = format!("{prefix}:{}", prop.name.local_name());

    match &prop.value {
        Some(PropertyValue::Text(text) | PropertyValue::ContentData(text)) => {
            write_text_element(writer, &elem_name, text)?;
        }
        Some(PropertyValue::Href(href)) => {
            writer.write_event(Event::Start(BytesStart::new(&elem_name)))?;
            write_text_element(writer, "D:href", href)?;
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(PropertyValue::HrefSet(hrefs)) => {
            writer.write_event(Event::Start(BytesStart::new(&elem_name)))?;
            for href in hrefs {
                write_text_element(writer, "D:href", href)?;
            }
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(PropertyValue::Integer(n)) => {
            write_text_element(writer, &elem_name, &n.to_string())?;
        }
        Some(PropertyValue::ResourceType(types)) => {
            writer.write_event(Event::Start(BytesStart::new(&elem_name)))?;
            for rt in types {
                let rt_name = format!("{}:{}", namespace_prefix(rt.namespace_uri()), rt.local_name());
                writer.write_event(Event::Empty(BytesStart::new(&rt_name)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(PropertyValue::Privileges(privileges)) => {
            writer.write_event(Event::Start(BytesStart::new(&elem_name)))?;
            for privilege in privileges {
                writer.write_event(Event::Start(BytesStart::new("D:privilege")))?;
                writer.write_event(Event::Empty(BytesStart::new(format!("D:{privilege}"))))?;
                writer.write_event(Event::End(BytesEnd::new("D:privilege")))?;
            }
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(PropertyValue::SupportedReports(reports)) => {
            writer.write_event(Event::Start(BytesStart::new(&elem_name)))?;
            for report in reports {
                writer.write_event(Event::Start(BytesStart::new("D:supported-report")))?;
                writer.write_event(Event::Start(BytesStart::new("D:report")))?;
                let r_name = format!("{}:{}", namespace_prefix(report.namespace_uri()), report.local_name());
                writer.write_event(Event::Empty(BytesStart::new(&r_name)))?;
                writer.write_event(Event::End(BytesEnd::new("D:report")))?;
                writer.write_event(Event::End(BytesEnd::new("D:supported-report")))?;
            }
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(PropertyValue::SupportedComponents(components)) => {
            writer.write_event(Event::Start(BytesStart::new(&elem_name)))?;
            for comp in components {
                let mut comp_elem = BytesStart::new("C:comp");
                comp_elem.push_attribute(("name", *comp));
                writer.write_event(Event::Empty(comp_elem))?;
            }
            writer.write_event(Event::End(BytesEnd::new(&elem_name)))?;
        }
        Some(PropertyValue::Empty) | None => {
            writer.write_event(Event::Empty(BytesStart::new(&elem_name)))?;
        }
    }

    Ok(())
}

fn write_text_element<W: std::io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Maps a namespace URI to its conventional prefix, falling back to `X` for
/// anything outside the fixed registry this engine knows about.
fn namespace_prefix(ns: &str) -> &'static str {
    match ns {
        DAV_NS => "D",
        CALDAV_NS => "C",
        CARDDAV_NS => "CR",
        CS_NS => "CS",
        ICAL_NS => "ICAL",
        ME_NS => "ME",
        _ => "X",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dav::multistatus::{Propstat, Status};
    use crate::dav::{Href, QName};

    #[test]
    fn serialize_simple_multistatus() {
        let propstat = Propstat::new(Status::Ok, vec![DavProperty::text(QName::dav("displayname"), "My Calendar")]);
        let response = PropstatResponse::new(Href::new("/calendars/user/default/"), vec![propstat]);
        let multistatus = Multistatus {
            responses: vec![response],
        };

        let xml = serialize_multistatus(&multistatus).unwrap();

        assert!(xml.contains("D:multistatus"));
        assert!(xml.contains("D:response"));
        assert!(xml.contains("D:displayname"));
        assert!(xml.contains("My Calendar"));
        assert!(xml.contains("HTTP/1.1 200 OK"));
    }

    #[test]
    fn serialize_bare_status_response() {
        let response = PropstatResponse::bare_status(Href::new("/calendars/user/missing.ics"), Status::NotFound);
        let multistatus = Multistatus {
            responses: vec![response],
        };

        let xml = serialize_multistatus(&multistatus).unwrap();

        assert!(xml.contains("HTTP/1.1 404 Not Found"));
        assert!(!xml.contains("D:propstat"));
    }
}
