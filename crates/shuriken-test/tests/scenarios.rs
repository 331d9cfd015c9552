//! The six end-to-end scenarios from §8, run against the real dispatcher
//! and an in-memory `Storage`, plus a handful of targeted regression tests.

use std::collections::HashMap;
use std::sync::Arc;

use shuriken_dav::{CollectionTag, MemoryStorage, Storage};

fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_ascii_lowercase(), (*v).to_string())).collect()
}

async fn alice_with_calendar() -> Arc<dyn Storage> {
    let storage = MemoryStorage::new("alice");
    storage.add_collection("cal1", "", CollectionTag::Calendar).await;
    Arc::new(storage)
}

#[test_log::test(tokio::test)]
async fn scenario_1_options_advertises_compliance_and_allowed_methods() {
    let storage = alice_with_calendar().await;
    let response = shuriken_dav::dispatch("OPTIONS", "/", HashMap::new(), Vec::new(), storage).await;

    assert_eq!(response.status, 200);
    assert!(response.body.is_empty());

    let header = |name: &str| response.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.clone());
    let dav = header("DAV").expect("DAV header present");
    assert_eq!(dav, "1, 2, 3, calendar-access, addressbook, extended-mkcol");

    let allow = header("Allow").expect("Allow header present");
    for method in ["DELETE", "GET", "HEAD", "OPTIONS", "PROPFIND", "PUT", "REPORT"] {
        assert!(allow.contains(method), "Allow header missing {method}: {allow}");
    }
}

#[test_log::test(tokio::test)]
async fn scenario_2_propfind_depth_one_lists_principal_and_calendar() {
    let storage = alice_with_calendar().await;
    let body = br#"<D:propfind xmlns:D="DAV:"><D:prop><D:displayname/><D:resourcetype/></D:prop></D:propfind>"#.to_vec();

    let response = shuriken_dav::dispatch("PROPFIND", "/alice/", headers(&[("Depth", "1")]), body, storage).await;

    assert_eq!(response.status, 207);
    let xml = String::from_utf8(response.body).unwrap();

    assert_eq!(xml.matches("<D:response>").count(), 2);
    assert!(xml.contains("<D:href>/alice/</D:href>"));
    assert!(xml.contains("<D:href>/alice/cal1/</D:href>"));

    // alice's resourcetype: principal + collection.
    let alice_section = &xml[xml.find("/alice/</D:href>").unwrap()..xml.find("/alice/cal1/</D:href>").unwrap()];
    assert!(alice_section.contains("D:principal"));
    assert!(alice_section.contains("D:collection"));
    // alice has no name, so displayname falls into a 404 group.
    assert!(alice_section.contains("HTTP/1.1 404 Not Found"));

    let cal_section = &xml[xml.find("/alice/cal1/</D:href>").unwrap()..];
    assert!(cal_section.contains("C:calendar"));
    assert!(cal_section.contains("D:collection"));
}

#[test_log::test(tokio::test)]
async fn propfind_getctag_404s_on_an_address_book_collection() {
    let storage = MemoryStorage::new("alice");
    storage.add_collection("book1", "", CollectionTag::AddressBook).await;
    let storage: Arc<dyn Storage> = Arc::new(storage);

    let body = br#"<D:propfind xmlns:D="DAV:" xmlns:CS="http://calendarserver.org/ns/"><D:prop><CS:getctag/></D:prop></D:propfind>"#.to_vec();
    let response = shuriken_dav::dispatch("PROPFIND", "/alice/book1/", headers(&[("Depth", "0")]), body, storage).await;

    assert_eq!(response.status, 207);
    let xml = String::from_utf8(response.body).unwrap();
    assert!(xml.contains("CS:getctag"));
    assert!(xml.contains("HTTP/1.1 404 Not Found"));
}

#[test_log::test(tokio::test)]
async fn scenario_3_put_then_conditional_put_conflicts() {
    let storage = alice_with_calendar().await;
    let body = b"BEGIN:VEVENT\r\nUID:e1\r\nEND:VEVENT\r\n".to_vec();

    let response = shuriken_dav::dispatch("PUT", "/alice/cal1/e1.ics", HashMap::new(), body.clone(), storage.clone()).await;
    assert_eq!(response.status, 201);
    let etag = response.headers.iter().find(|(n, _)| n == "ETag").map(|(_, v)| v.clone()).expect("ETag header");

    let collection = storage.collection_get("cal1").await.unwrap().unwrap();
    let item = storage.item_get("e1.ics", &collection).await.unwrap().unwrap();
    assert_eq!(storage.item_etag(&item).await.unwrap(), etag);

    let conflicting = shuriken_dav::dispatch(
        "PUT",
        "/alice/cal1/e1.ics",
        headers(&[("If-None-Match", "*")]),
        body,
        storage,
    )
    .await;
    assert_eq!(conflicting.status, 412);
}

#[test_log::test(tokio::test)]
async fn scenario_4_delete_honors_if_match_precondition() {
    let storage = alice_with_calendar().await;
    let body = b"BEGIN:VEVENT\r\nUID:e1\r\nEND:VEVENT\r\n".to_vec();
    shuriken_dav::dispatch("PUT", "/alice/cal1/e1.ics", HashMap::new(), body, storage.clone()).await;

    let mismatched = shuriken_dav::dispatch(
        "DELETE",
        "/alice/cal1/e1.ics",
        headers(&[("If-Match", "\"not-the-etag\"")]),
        Vec::new(),
        storage.clone(),
    )
    .await;
    assert_eq!(mismatched.status, 412);

    let deleted = shuriken_dav::dispatch(
        "DELETE",
        "/alice/cal1/e1.ics",
        headers(&[("If-Match", "*")]),
        Vec::new(),
        storage,
    )
    .await;
    assert_eq!(deleted.status, 200);
    let xml = String::from_utf8(deleted.body).unwrap();
    assert!(xml.contains("HTTP/1.1 200 OK"));
    assert!(xml.contains("/alice/cal1/e1.ics"));
}

#[test_log::test(tokio::test)]
async fn scenario_5_report_multiget_reports_found_and_missing() {
    let storage = alice_with_calendar().await;
    let body = b"BEGIN:VEVENT\r\nUID:e1\r\nEND:VEVENT\r\n".to_vec();
    shuriken_dav::dispatch("PUT", "/alice/cal1/e1.ics", HashMap::new(), body, storage.clone()).await;

    let report_body = br#"<C:calendar-multiget xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
        <D:prop><D:getetag/></D:prop>
        <D:href>/alice/cal1/e1.ics</D:href>
        <D:href>/alice/cal1/missing.ics</D:href>
    </C:calendar-multiget>"#
        .to_vec();

    let response = shuriken_dav::dispatch("REPORT", "/alice/cal1/", HashMap::new(), report_body, storage).await;
    assert_eq!(response.status, 207);
    let xml = String::from_utf8(response.body).unwrap();

    assert_eq!(xml.matches("<D:response>").count(), 2);
    assert!(xml.contains("/alice/cal1/e1.ics"));
    assert!(xml.contains("/alice/cal1/missing.ics"));
    assert!(xml.contains("HTTP/1.1 404 Not Found"));
    assert!(xml.contains("D:getetag"));
}

#[test_log::test(tokio::test)]
async fn report_with_unrecognized_tag_behaves_as_sync_collection() {
    let storage = alice_with_calendar().await;
    let body = b"BEGIN:VEVENT\r\nUID:e1\r\nEND:VEVENT\r\n".to_vec();
    shuriken_dav::dispatch("PUT", "/alice/cal1/e1.ics", HashMap::new(), body, storage.clone()).await;

    let report_body = br#"<X:some-unknown-report xmlns:D="DAV:" xmlns:X="urn:example:x">
        <D:prop><D:getetag/></D:prop>
    </X:some-unknown-report>"#
        .to_vec();

    let response = shuriken_dav::dispatch("REPORT", "/alice/cal1/e1.ics", HashMap::new(), report_body, storage).await;
    assert_eq!(response.status, 207);
    let xml = String::from_utf8(response.body).unwrap();

    assert_eq!(xml.matches("<D:response>").count(), 1);
    assert!(xml.contains("/alice/cal1/e1.ics"));
    assert!(xml.contains("D:getetag"));
}

#[test_log::test(tokio::test)]
async fn scenario_6_get_on_calendar_collection_serves_attachment() {
    let storage = alice_with_calendar().await;
    let body = b"BEGIN:VEVENT\r\nUID:e1\r\nEND:VEVENT\r\n".to_vec();
    shuriken_dav::dispatch("PUT", "/alice/cal1/e1.ics", HashMap::new(), body.clone(), storage.clone()).await;

    let response = shuriken_dav::dispatch("GET", "/alice/cal1/", HashMap::new(), Vec::new(), storage).await;
    assert_eq!(response.status, 200);

    let header = |name: &str| response.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.clone());
    assert_eq!(header("Content-Type").unwrap(), "text/calendar; charset=utf-8");
    assert_eq!(header("Content-Disposition").unwrap(), "attachment; filename*=utf-8''cal1.ics");
    assert_eq!(response.body, body);
}
