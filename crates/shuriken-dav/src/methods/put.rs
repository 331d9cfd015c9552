//! PUT (§4.8): conditional-request preconditions, then `item_upload`.

use crate::body::decode_request_body;
use crate::context::Context;
use crate::error::{DavError, DavResult};
use crate::path;
use crate::response::Response;

#[tracing::instrument(skip(ctx), fields(path = %ctx.path))]
pub async fn handle(ctx: &Context) -> DavResult<Response> {
    let body = decode_request_body(&ctx.body, ctx.content_type())?;

    let (slug, href) = path::split(&ctx.path);
    let Some(collection) = ctx.storage.collection_get(&slug).await? else {
        return Err(DavError::Conflict(format!("no such collection: {slug}")));
    };
    let Some(href) = href else {
        return Err(DavError::Conflict("PUT target must name an item, not a collection".to_string()));
    };

    let existing = ctx.storage.item_get(&href, &collection).await?;

    if let Some(if_match) = ctx.if_match() {
        match &existing {
            None => return Err(DavError::PreconditionFailed),
            Some(item) => {
                if ctx.storage.item_etag(item).await? != if_match {
                    return Err(DavError::PreconditionFailed);
                }
            }
        }
    }
    if ctx.if_none_match() == Some("*") && existing.is_some() {
        return Err(DavError::PreconditionFailed);
    }

    let uploaded = ctx
        .storage
        .item_upload(&href, existing.as_ref(), &collection, body.as_bytes())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "storage rejected upload");
            DavError::BadRequest(e.to_string())
        })?;
    let Some(item) = uploaded else {
        return Err(DavError::BadRequest("upload was not accepted".to_string()));
    };

    let etag = ctx.storage.item_etag(&item).await?;
    Ok(Response::new(201).with_header("ETag", etag))
}
