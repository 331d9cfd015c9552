//! The PROPFIND property-resolution engine (§4.6).
//!
//! Every requested (or, for `allprop`/`propname`, server-enumerated)
//! property is resolved against one discovered entity into a `200`- or
//! `404`-grouped value, modeled as a closed dispatch over `QName` rather
//! than open-class polymorphism — the `_ => 404` arm is the default case
//! (§9 design note).

use shuriken_rfc::dav::{CALDAV_NS, CARDDAV_NS, CS_NS, DAV_NS, DavProperty, PropertyValue, PropfindRequest, PropstatResponse, QName};

use crate::context::Context;
use crate::error::DavResult;
use crate::path;
use crate::storage::{Collection, Entity, Item, Storage};
use crate::xml;

struct EntityView<'a> {
    is_collection: bool,
    is_leaf: bool,
    collection: &'a Collection,
    item: Option<&'a Item>,
    uri: String,
}

fn view(entity: &Entity) -> EntityView<'_> {
    match entity {
        Entity::Collection(collection) => EntityView {
            is_collection: true,
            is_leaf: collection.is_leaf(),
            collection,
            item: None,
            uri: path::unstrip(&collection.slug, true),
        },
        Entity::Item(item) => EntityView {
            is_collection: false,
            is_leaf: false,
            collection: &item.collection,
            item: Some(item),
            uri: path::unstrip(&format!("{}/{}", item.collection.slug, item.href), false),
        },
    }
}

/// The fixed property enumeration an `allprop`/`propname` request answers
/// with, depending on entity shape (§4.6).
fn fixed_properties(view: &EntityView<'_>) -> Vec<QName> {
    let mut props = vec![
        QName::dav("principal-collection-set"),
        QName::dav("current-user-principal"),
        QName::dav("current-user-privilege-set"),
        QName::dav("supported-report-set"),
        QName::dav("resourcetype"),
        QName::dav("owner"),
    ];

    if view.is_collection && view.collection.is_principal() {
        props.push(QName::caldav("calendar-user-address-set"));
        props.push(QName::dav("principal-URL"));
        props.push(QName::carddav("addressbook-home-set"));
        props.push(QName::caldav("calendar-home-set"));
    }

    if !view.is_collection || view.is_leaf {
        props.push(QName::dav("getetag"));
        props.push(QName::dav("getlastmodified"));
        props.push(QName::dav("getcontenttype"));
        props.push(QName::dav("getcontentlength"));
    }

    if view.is_collection {
        if view.is_leaf {
            props.push(QName::dav("displayname"));
        }
        if view.collection.is_calendar() {
            props.push(QName::cs("getctag"));
            props.push(QName::caldav("supported-calendar-component-set"));
        }
    }

    props
}

/// Resolves one property tag against one entity: `Ok(Some(value))` on a
/// computed value, `Ok(None)` for the closed policy table's 404 arm.
async fn resolve_property(
    storage: &dyn Storage,
    view: &EntityView<'_>,
    user: &str,
    request_path: &str,
    tag: &QName,
) -> DavResult<Option<PropertyValue>> {
    let is_leaf_or_item = !view.is_collection || view.is_leaf;

    Ok(match (tag.namespace_uri(), tag.local_name()) {
        (DAV_NS, "getetag") if is_leaf_or_item => Some(PropertyValue::Text(match view.item {
            Some(item) => storage.item_etag(item).await?,
            None => storage.collection_etag(view.collection).await?,
        })),
        (DAV_NS, "getlastmodified") if is_leaf_or_item => {
            let entity = match view.item {
                Some(item) => Entity::Item(item.clone()),
                None => Entity::Collection(view.collection.clone()),
            };
            Some(PropertyValue::Text(storage.get_last_modified(&entity).await?))
        }
        (DAV_NS, "principal-collection-set") => Some(PropertyValue::Href("/".to_string())),
        (CALDAV_NS, "calendar-user-address-set" | "calendar-home-set")
        | (DAV_NS, "principal-URL")
        | (CARDDAV_NS, "addressbook-home-set")
            if view.is_collection && view.collection.is_principal() =>
        {
            Some(PropertyValue::Href(request_path.to_string()))
        }
        (CALDAV_NS, "supported-calendar-component-set") if view.is_collection && view.is_leaf => {
            Some(PropertyValue::SupportedComponents(vec!["VEVENT"]))
        }
        (DAV_NS, "current-user-principal") => Some(PropertyValue::Href(format!("/{user}/"))),
        (DAV_NS, "current-user-privilege-set") => {
            Some(PropertyValue::Privileges(vec!["read", "all", "write", "write-properties", "write-content"]))
        }
        (DAV_NS, "supported-report-set") => {
            let mut reports = vec![
                QName::dav("expand-property"),
                QName::dav("principal-search-property-set"),
                QName::dav("principal-property-search"),
            ];
            if view.is_collection && view.is_leaf {
                reports.push(QName::dav("sync-collection"));
                if view.collection.is_address_book() {
                    reports.push(QName::carddav("addressbook-multiget"));
                    reports.push(QName::carddav("addressbook-query"));
                } else if view.collection.is_calendar() {
                    reports.push(QName::caldav("calendar-multiget"));
                    reports.push(QName::caldav("calendar-query"));
                }
            }
            Some(PropertyValue::SupportedReports(reports))
        }
        (DAV_NS, "getcontentlength") if is_leaf_or_item => {
            let entity = match view.item {
                Some(item) => Entity::Item(item.clone()),
                None => Entity::Collection(view.collection.clone()),
            };
            Some(PropertyValue::Integer(storage.serialize(&entity).await?.len() as i64))
        }
        (DAV_NS, "owner") => Some(PropertyValue::Href(format!("/{user}/"))),
        (DAV_NS, "getcontenttype") if view.is_collection => {
            if view.is_leaf {
                view.collection.tag.map(|tag| PropertyValue::Text(xml::collection_mime(tag).to_string()))
            } else {
                None
            }
        }
        (DAV_NS, "getcontenttype") => view.item.map(|item| PropertyValue::Text(xml::item_content_type(item.tag))),
        (DAV_NS, "resourcetype") if view.is_collection => {
            let mut types = Vec::new();
            if view.collection.is_principal() {
                types.push(QName::dav("principal"));
            }
            if view.is_leaf {
                if view.collection.is_address_book() {
                    types.push(QName::carddav("addressbook"));
                } else if view.collection.is_calendar() {
                    types.push(QName::caldav("calendar"));
                }
            }
            types.push(QName::dav("collection"));
            Some(PropertyValue::ResourceType(types))
        }
        (DAV_NS, "resourcetype") => Some(PropertyValue::ResourceType(Vec::new())),
        (DAV_NS, "displayname") if view.is_collection => {
            let name = if view.collection.name.is_empty() && view.is_leaf {
                &view.collection.slug
            } else {
                &view.collection.name
            };
            Some(PropertyValue::Text(name.clone()))
        }
        (CS_NS, "getctag") if view.is_collection && view.is_leaf && view.collection.is_calendar() => {
            Some(PropertyValue::Text(storage.collection_etag(view.collection).await?))
        }
        _ => None,
    })
}

/// Resolves the requested (or fixed, for allprop/propname) properties for
/// one entity into a single `{DAV:}response` element.
async fn entity_response(
    storage: &dyn Storage,
    request: &PropfindRequest,
    user: &str,
    request_path: &str,
    entity: &Entity,
) -> DavResult<PropstatResponse> {
    let entity_view = view(entity);

    if request.is_propname() {
        let props = fixed_properties(&entity_view);
        let found = props.into_iter().map(DavProperty::empty).collect();
        return Ok(PropstatResponse::with_found_and_not_found(entity_view.uri, found, Vec::new()));
    }

    let requested: Vec<QName> = if request.is_allprop() {
        fixed_properties(&entity_view)
    } else {
        request.requested_properties().unwrap_or_default().to_vec()
    };

    let mut found = Vec::new();
    let mut not_found = Vec::new();
    for tag in requested {
        match resolve_property(storage, &entity_view, user, request_path, &tag).await? {
            Some(value) => found.push(DavProperty {
                name: tag,
                value: Some(value),
            }),
            None => not_found.push(DavProperty::not_found(tag)),
        }
    }

    Ok(PropstatResponse::with_found_and_not_found(entity_view.uri, found, not_found))
}

/// Builds the full multistatus for a PROPFIND request over a set of
/// already-discovered entities.
pub async fn build_multistatus(
    storage: &dyn Storage,
    request: &PropfindRequest,
    user: &str,
    request_path: &str,
    entities: &[Entity],
) -> DavResult<shuriken_rfc::dav::Multistatus> {
    let mut multistatus = shuriken_rfc::dav::Multistatus::new();
    for entity in entities {
        multistatus.add_response(entity_response(storage, request, user, request_path, entity).await?);
    }
    Ok(multistatus)
}

/// Parses the PROPFIND body, honoring an empty body as `allprop` (§4.6).
/// `PropfindType` being a closed enum rather than separate flags rules out
/// the donor's "prop + allprop" contradictory-request case by construction.
pub fn parse_request(body: &str) -> DavResult<PropfindRequest> {
    shuriken_rfc::dav::parse::parse_propfind(body.as_bytes())
        .map_err(|e| crate::error::DavError::BadRequest(e.to_string()))
}
