//! DAV property value types.

use super::namespace::QName;

/// A DAV property with name and optional value.
#[derive(Debug, Clone)]
pub struct DavProperty {
    /// The property name.
    pub name: QName,
    /// The property value (`None` means the property was requested but is
    /// not available — it is reported in a 404 propstat group).
    pub value: Option<PropertyValue>,
}

impl DavProperty {
    /// Creates a property with no value (for 404 responses).
    #[must_use]
    pub fn not_found(name: QName) -> Self {
        Self { name, value: None }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(PropertyValue::Text(value.into())),
        }
    }

    /// Creates a property with an href value.
    #[must_use]
    pub fn href(name: QName, href: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(PropertyValue::Href(href.into())),
        }
    }

    /// Creates a property with multiple href values.
    #[must_use]
    pub fn href_set(name: QName, hrefs: Vec<String>) -> Self {
        Self {
            name,
            value: Some(PropertyValue::HrefSet(hrefs)),
        }
    }

    /// Creates a property with an integer value.
    #[must_use]
    pub fn integer(name: QName, value: i64) -> Self {
        Self {
            name,
            value: Some(PropertyValue::Integer(value)),
        }
    }

    /// Creates a resourcetype property, empty for a plain item.
    #[must_use]
    pub fn resourcetype(types: Vec<QName>) -> Self {
        Self {
            name: QName::dav("resourcetype"),
            value: Some(PropertyValue::ResourceType(types)),
        }
    }

    /// Creates the current-user-privilege-set property.
    #[must_use]
    pub fn privilege_set(privileges: Vec<&'static str>) -> Self {
        Self {
            name: QName::dav("current-user-privilege-set"),
            value: Some(PropertyValue::Privileges(privileges)),
        }
    }

    /// Creates the supported-report-set property.
    #[must_use]
    pub fn supported_report_set(reports: Vec<QName>) -> Self {
        Self {
            name: QName::dav("supported-report-set"),
            value: Some(PropertyValue::SupportedReports(reports)),
        }
    }

    /// Creates an empty element (for propname responses).
    #[must_use]
    pub fn empty(name: QName) -> Self {
        Self {
            name,
            value: Some(PropertyValue::Empty),
        }
    }

    /// Creates a property holding a serialized calendar/address object.
    #[must_use]
    pub fn content_data(name: QName, data: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(PropertyValue::ContentData(data.into())),
        }
    }
}

/// A property value.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// Empty element, used for `propname` responses.
    Empty,
    /// Text content.
    Text(String),
    /// Single href.
    Href(String),
    /// Multiple hrefs.
    HrefSet(Vec<String>),
    /// Integer value.
    Integer(i64),
    /// Resource types (collection, calendar, addressbook, etc.); empty for a
    /// plain resource.
    ResourceType(Vec<QName>),
    /// `current-user-privilege-set`: a flat list of `D:`-prefixed privilege
    /// local names, always containing at least `"read"`.
    Privileges(Vec<&'static str>),
    /// `supported-report-set`: the reports this collection declares support
    /// for.
    SupportedReports(Vec<QName>),
    /// Calendar/address data (serialized object body).
    ContentData(String),
    /// Supported component set (`VEVENT`, etc.).
    SupportedComponents(Vec<&'static str>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_text() {
        let prop = DavProperty::text(QName::dav("displayname"), "My Calendar");
        assert_eq!(prop.name.local_name(), "displayname");
        assert!(matches!(prop.value, Some(PropertyValue::Text(_))));
    }

    #[test]
    fn property_resourcetype_collection() {
        let prop = DavProperty::resourcetype(vec![QName::dav("collection"), QName::caldav("calendar")]);
        match prop.value {
            Some(PropertyValue::ResourceType(types)) => assert_eq!(types.len(), 2),
            _ => panic!("expected ResourceType"),
        }
    }
}
