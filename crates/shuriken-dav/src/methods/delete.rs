//! DELETE (§4.8): `If-Match` precondition, then `item_delete`, answered with
//! a one-response multistatus (RFC 4918 §9.6).

use shuriken_rfc::dav::{Multistatus, PropstatResponse, Status};

use crate::context::Context;
use crate::error::{DavError, DavResult};
use crate::response::Response;
use crate::xml;

#[tracing::instrument(skip(ctx), fields(path = %ctx.path))]
pub async fn handle(ctx: &Context) -> DavResult<Response> {
    let Some(item) = ctx.storage.item_get_from_path(&ctx.path).await? else {
        return Ok(Response::plain_text(404, "The requested resource could not be found."));
    };

    let etag = ctx.storage.item_etag(&item).await?;
    let if_match = ctx.if_match().unwrap_or("*");
    if if_match != "*" && if_match != etag {
        return Err(DavError::PreconditionFailed);
    }

    ctx.storage.item_delete(&item).await?;

    let mut multistatus = Multistatus::new();
    multistatus.add_response(PropstatResponse::bare_status(xml::make_href(&ctx.path), Status::Ok));
    let body = shuriken_rfc::dav::build::serialize_multistatus(&multistatus)
        .map_err(|e| DavError::BadRequest(e.to_string()))?;

    Ok(Response::new(200).with_text_body("text/xml", body))
}
