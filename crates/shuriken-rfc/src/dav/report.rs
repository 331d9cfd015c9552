//! REPORT request types.

use super::namespace::QName;

/// A parsed REPORT request body.
#[derive(Debug, Clone)]
pub enum ReportRequest {
    /// `{urn:ietf:params:xml:ns:caldav}calendar-multiget`: retrieve the
    /// named hrefs from a calendar collection.
    CalendarMultiget {
        hrefs: Vec<String>,
        properties: Vec<QName>,
    },
    /// `{urn:ietf:params:xml:ns:carddav}addressbook-multiget`: retrieve the
    /// named hrefs from an addressbook collection.
    AddressbookMultiget {
        hrefs: Vec<String>,
        properties: Vec<QName>,
    },
    /// `{DAV:}sync-collection`, and any report tag this engine does not
    /// otherwise recognize: behaves as a multiget over the single href that
    /// was reported on, since no real sync token is computed.
    SyncCollection { properties: Vec<QName> },
    /// A report this engine answers with an empty 207, for interoperability
    /// with clients that probe `principal-search-property-set`,
    /// `principal-property-search`, or `expand-property` defensively.
    NoOp,
}

impl ReportRequest {
    /// The requested property list, for the variants that carry one.
    #[must_use]
    pub fn properties(&self) -> &[QName] {
        match self {
            Self::CalendarMultiget { properties, .. } | Self::AddressbookMultiget { properties, .. } => properties,
            Self::SyncCollection { properties } => properties,
            Self::NoOp => &[],
        }
    }
}
