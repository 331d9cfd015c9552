//! The REPORT engine (§4.7): `calendar-multiget`, `addressbook-multiget`,
//! and `sync-collection` dispatch, href resolution, and property extraction.
//! Any report tag this engine doesn't otherwise recognize is parsed as
//! [`ReportRequest::SyncCollection`] and behaves identically to
//! `sync-collection` — a single-href multiget over the request path.

use shuriken_rfc::dav::{CALDAV_NS, CARDDAV_NS, DAV_NS, DavProperty, ErrorBody, Multistatus, PropstatResponse, QName, ReportRequest, Status};

use crate::error::DavResult;
use crate::path;
use crate::storage::{Collection, Item, Storage};
use crate::xml;

/// The outcome of running a REPORT: either a multistatus body (`207`) or a
/// `{DAV:}error` body with its own status (typically `403`).
pub enum ReportOutcome {
    Multistatus(Multistatus),
    Error(ErrorBody),
}

/// Parses the REPORT body; an empty body yields [`ReportRequest::NoOp`],
/// which renders as an empty `207` multistatus (§4.7).
pub fn parse_request(body: &str) -> DavResult<ReportRequest> {
    shuriken_rfc::dav::parse::parse_report(body.as_bytes())
        .map_err(|e| crate::error::DavError::BadRequest(e.to_string()))
}

fn item_uri(collection: &Collection, href: &str) -> String {
    path::unstrip(&format!("{}/{href}", collection.slug), false)
}

/// Resolves the non-content-body properties (§4.7's table minus
/// `calendar-data`/`address-data`, handled separately since it needs an
/// async storage call the others don't).
fn resolve_property(item: &Item, tag: &QName, etag: &str) -> Option<DavProperty> {
    match (tag.namespace_uri(), tag.local_name()) {
        (DAV_NS, "getetag") => Some(DavProperty::text(tag.clone(), etag)),
        (DAV_NS, "getcontenttype") => Some(DavProperty::text(tag.clone(), xml::item_content_type(item.tag))),
        _ => None,
    }
}

/// Runs the requested report against its owning collection.
///
/// ## Errors
/// Propagates storage failures.
pub async fn run(storage: &dyn Storage, request_path: &str, collection: &Collection, request: &ReportRequest) -> DavResult<ReportOutcome> {
    if matches!(request, ReportRequest::NoOp) {
        return Ok(ReportOutcome::Multistatus(Multistatus::new()));
    }

    let unsupported = matches!(request, ReportRequest::CalendarMultiget { .. } if !collection.is_calendar())
        || matches!(request, ReportRequest::AddressbookMultiget { .. } if !collection.is_address_book())
        || matches!(request, ReportRequest::SyncCollection { .. } if !collection.is_leaf());
    if unsupported {
        return Ok(ReportOutcome::Error(ErrorBody::unsupported_report()));
    }

    let hrefs: Vec<String> = match request {
        ReportRequest::CalendarMultiget { hrefs, .. } | ReportRequest::AddressbookMultiget { hrefs, .. } => hrefs
            .iter()
            .map(|h| path::sanitize(h))
            .filter(|h| h.starts_with('/'))
            .collect(),
        ReportRequest::SyncCollection { .. } => vec![request_path.to_string()],
        ReportRequest::NoOp => Vec::new(),
    };
    let properties = request.properties();

    let mut multistatus = Multistatus::new();
    let mut collection_requested = false;
    let mut item_hrefs = Vec::new();

    for href in &hrefs {
        let (slug, rest) = path::split(href);
        if slug != collection.slug {
            multistatus.add_response(PropstatResponse::bare_status(href.clone(), Status::NotFound));
            continue;
        }
        match rest {
            Some(item_href) => item_hrefs.push(item_href),
            None => collection_requested = true,
        }
    }

    let collection_items = storage.collection_items(collection).await?;
    let mut items_to_emit = Vec::new();

    for href in item_hrefs {
        match collection_items.iter().find(|i| i.href == href) {
            Some(item) => items_to_emit.push(item.clone()),
            None => multistatus.add_response(PropstatResponse::bare_status(item_uri(collection, &href), Status::NotFound)),
        }
    }

    if collection_requested {
        items_to_emit.extend(collection_items.iter().cloned());
    }

    for item in &items_to_emit {
        let etag = storage.item_etag(item).await?;
        let mut found = Vec::new();
        let mut not_found = Vec::new();
        for tag in properties {
            let is_content_prop = matches!(
                (tag.namespace_uri(), tag.local_name()),
                (CALDAV_NS, "calendar-data") | (CARDDAV_NS, "address-data")
            );
            if is_content_prop {
                found.push(DavProperty::content_data(tag.clone(), storage.item_serialize(item).await?));
            } else if let Some(prop) = resolve_property(item, tag, &etag) {
                found.push(prop);
            } else {
                not_found.push(DavProperty::not_found(tag.clone()));
            }
        }
        multistatus.add_response(PropstatResponse::with_found_and_not_found(
            item_uri(&item.collection, &item.href),
            found,
            not_found,
        ));
    }

    Ok(ReportOutcome::Multistatus(multistatus))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use shuriken_core::types::CollectionTag;

    use super::*;

    struct FixtureStorage {
        collection: Collection,
        items: Vec<Item>,
    }

    #[async_trait]
    impl Storage for FixtureStorage {
        async fn user(&self) -> String {
            "alice".to_string()
        }
        async fn collection_list(&self) -> anyhow::Result<Vec<Collection>> {
            Ok(vec![self.collection.clone()])
        }
        async fn collection_get(&self, slug: &str) -> anyhow::Result<Option<Collection>> {
            Ok((slug == self.collection.slug).then(|| self.collection.clone()))
        }
        async fn collection_items(&self, _collection: &Collection) -> anyhow::Result<Vec<Item>> {
            Ok(self.items.clone())
        }
        async fn item_get(&self, href: &str, _collection: &Collection) -> anyhow::Result<Option<Item>> {
            Ok(self.items.iter().find(|i| i.href == href).cloned())
        }
        async fn item_serialize(&self, item: &Item) -> anyhow::Result<String> {
            Ok(format!("BEGIN:{}\nEND", item.tag.as_str()))
        }
        async fn item_upload(
            &self,
            _href: &str,
            _existing: Option<&Item>,
            _collection: &Collection,
            _body: &[u8],
        ) -> anyhow::Result<Option<Item>> {
            unimplemented!("not exercised by REPORT tests")
        }
        async fn item_delete(&self, _item: &Item) -> anyhow::Result<()> {
            unimplemented!("not exercised by REPORT tests")
        }
        async fn collection_etag(&self, _collection: &Collection) -> anyhow::Result<String> {
            Ok("\"collection-etag\"".to_string())
        }
        async fn item_etag(&self, item: &Item) -> anyhow::Result<String> {
            Ok(format!("\"{}\"", item.href))
        }
    }

    fn fixture() -> FixtureStorage {
        let collection = Collection {
            slug: "cal1".to_string(),
            name: String::new(),
            tag: Some(CollectionTag::Calendar),
        };
        let item = Item {
            tag: shuriken_core::types::ItemTag::VEvent,
            href: "e1.ics".to_string(),
            collection: collection.clone(),
            last_modified: Utc::now(),
        };
        FixtureStorage { collection, items: vec![item] }
    }

    #[tokio::test]
    async fn multiget_emits_found_and_missing_responses() {
        let storage = fixture();
        let request = ReportRequest::CalendarMultiget {
            hrefs: vec!["/cal1/e1.ics".to_string(), "/cal1/missing.ics".to_string()],
            properties: vec![QName::dav("getetag")],
        };
        let outcome = run(&storage, "/cal1/", &storage.collection, &request).await.unwrap();
        let ReportOutcome::Multistatus(ms) = outcome else {
            panic!("expected multistatus");
        };
        assert_eq!(ms.responses.len(), 2);
        assert!(ms.responses.iter().any(|r| r.status == Some(Status::NotFound)));
    }

    #[tokio::test]
    async fn multiget_against_wrong_collection_shape_is_forbidden() {
        let storage = fixture();
        let request = ReportRequest::AddressbookMultiget {
            hrefs: vec!["/cal1/e1.ics".to_string()],
            properties: Vec::new(),
        };
        let outcome = run(&storage, "/cal1/", &storage.collection, &request).await.unwrap();
        assert!(matches!(outcome, ReportOutcome::Error(_)));
    }

    #[tokio::test]
    async fn sync_collection_behaves_as_single_href_multiget() {
        let storage = fixture();
        let request = ReportRequest::SyncCollection {
            properties: vec![QName::caldav("calendar-data")],
        };
        let outcome = run(&storage, "/cal1/e1.ics", &storage.collection, &request).await.unwrap();
        let ReportOutcome::Multistatus(ms) = outcome else {
            panic!("expected multistatus");
        };
        assert_eq!(ms.responses.len(), 1);
    }
}
