//! Multistatus response types.

use super::href::Href;
use super::property::DavProperty;

/// A multistatus response (RFC 4918 §13).
#[derive(Debug, Clone, Default)]
pub struct Multistatus {
    /// Individual responses.
    pub responses: Vec<PropstatResponse>,
}

impl Multistatus {
    /// Creates an empty multistatus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a response.
    pub fn add_response(&mut self, response: PropstatResponse) {
        self.responses.push(response);
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// A single response within a multistatus.
#[derive(Debug, Clone)]
pub struct PropstatResponse {
    /// The resource href.
    pub href: Href,
    /// Property statuses grouped by status code, in the order they should
    /// be emitted.
    pub propstats: Vec<Propstat>,
    /// A bare top-level status instead of propstats, used by the REPORT
    /// engine for hrefs that resolved to nothing.
    pub status: Option<Status>,
}

impl PropstatResponse {
    /// Creates a response carrying grouped propstats.
    #[must_use]
    pub fn new(href: impl Into<Href>, propstats: Vec<Propstat>) -> Self {
        Self {
            href: href.into(),
            propstats,
            status: None,
        }
    }

    /// Creates a response with found and not-found properties, in that
    /// order (200 group first, then 404 group), dropping empty groups.
    #[must_use]
    pub fn with_found_and_not_found(
        href: impl Into<Href>,
        found: Vec<DavProperty>,
        not_found: Vec<DavProperty>,
    ) -> Self {
        let mut propstats = Vec::new();
        if !found.is_empty() {
            propstats.push(Propstat::new(Status::Ok, found));
        }
        if !not_found.is_empty() {
            propstats.push(Propstat::new(Status::NotFound, not_found));
        }
        Self::new(href, propstats)
    }

    /// Creates a bare-status response (no propstats), used when the
    /// requested resource itself was not found.
    #[must_use]
    pub fn bare_status(href: impl Into<Href>, status: Status) -> Self {
        Self {
            href: href.into(),
            propstats: Vec::new(),
            status: Some(status),
        }
    }
}

/// Property status grouping.
#[derive(Debug, Clone)]
pub struct Propstat {
    /// HTTP status.
    pub status: Status,
    /// Properties with this status.
    pub properties: Vec<DavProperty>,
}

impl Propstat {
    /// Creates a new propstat.
    #[must_use]
    pub fn new(status: Status, properties: Vec<DavProperty>) -> Self {
        Self { status, properties }
    }
}

/// HTTP status for propstat / bare response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// Custom status
    Custom(u16),
}

impl Status {
    /// Returns the status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NotFound => 404,
            Self::Custom(code) => *code,
        }
    }

    /// Returns the status line, e.g. `HTTP/1.1 200 OK`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("HTTP/1.1 {} {}", self.code(), self.reason_phrase())
    }

    /// Returns the reason phrase.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NotFound => "Not Found",
            Self::Custom(_) => "Unknown",
        }
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        match code {
            200 => Self::Ok,
            404 => Self::NotFound,
            _ => Self::Custom(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dav::QName;

    #[test]
    fn multistatus_new() {
        let ms = Multistatus::new();
        assert!(ms.is_empty());
    }

    #[test]
    fn propstat_response_with_not_found() {
        let resp = PropstatResponse::with_found_and_not_found(
            "/calendars/user/cal/",
            vec![DavProperty::text(QName::dav("displayname"), "My Calendar")],
            vec![DavProperty::not_found(QName::dav("getetag"))],
        );
        assert_eq!(resp.propstats.len(), 2);
        assert_eq!(resp.propstats[0].status, Status::Ok);
        assert_eq!(resp.propstats[1].status, Status::NotFound);
    }

    #[test]
    fn status_line() {
        assert_eq!(Status::Ok.status_line(), "HTTP/1.1 200 OK");
        assert_eq!(Status::NotFound.status_line(), "HTTP/1.1 404 Not Found");
    }
}
