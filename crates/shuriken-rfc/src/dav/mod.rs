//! `WebDAV` / `CalDAV` / `CardDAV` XML vocabulary.
//!
//! This module defines the core types for `PROPFIND` and `REPORT` requests
//! and multistatus responses: namespaces, qualified names, hrefs, property
//! values, and the XML parsers/serializers that move between wire format
//! and these types.

pub mod build;
mod depth;
mod error;
mod href;
mod multistatus;
mod namespace;
pub mod parse;
mod property;
mod propfind;
mod report;

pub use depth::Depth;
pub use error::ErrorBody;
pub use href::Href;
pub use multistatus::{Multistatus, Propstat, PropstatResponse, Status};
pub use namespace::{
    CALDAV_NS, CARDDAV_NS, CS_NS, DAV_NS, ICAL_NS, ME_NS, Namespace, QName, collection_props, dav_props,
};
pub use property::{DavProperty, PropertyValue};
pub use propfind::{PropfindRequest, PropfindType};
pub use report::ReportRequest;
